use super::{Baseline, Reading};

/// One of the three measurement axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Mean and standard deviation of one axis, as far as the baseline has them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisStats {
    pub mean: Option<f64>,
    pub standard_deviation: Option<f64>,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn title(self) -> &'static str {
        match self {
            Axis::X => "Eixo X",
            Axis::Y => "Eixo Y",
            Axis::Z => "Eixo Z",
        }
    }

    pub fn value(self, reading: &Reading) -> f64 {
        match self {
            Axis::X => reading.x_value,
            Axis::Y => reading.y_value,
            Axis::Z => reading.z_value,
        }
    }

    pub fn stats(self, baseline: &Baseline) -> AxisStats {
        let (mean, standard_deviation) = match self {
            Axis::X => (baseline.x_mean, baseline.x_standard_deviation),
            Axis::Y => (baseline.y_mean, baseline.y_standard_deviation),
            Axis::Z => (baseline.z_mean, baseline.z_standard_deviation),
        };
        AxisStats { mean, standard_deviation }
    }
}

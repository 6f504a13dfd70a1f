use crate::types::{Axis, Baseline, Reading};
use crate::utils::round_to_decimals;

/// Decimal places kept on plotted values.
const VALUE_DECIMALS: usize = 8;

pub const VALUE_SERIES: &str = "Valor";
pub const MEAN_SERIES: &str = "Média";
pub const UPPER_BAND_SERIES: &str = "Desvio Padrão Superior";
pub const LOWER_BAND_SERIES: &str = "Desvio Padrão Inferior";

/// Y-axis range of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayLimits {
    pub min: f64,
    pub max: f64,
}

impl DisplayLimits {
    pub fn has_span(&self) -> bool {
        self.max > self.min
    }
}

/// The four parallel series drawn on one axis chart.
///
/// `upper_band` and `lower_band` stay empty until a baseline arrives, so
/// "no baseline yet" is distinguishable from "baseline with zero deviation".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySeries {
    pub value: Vec<f64>,
    pub mean: Vec<f64>,
    pub upper_band: Vec<f64>,
    pub lower_band: Vec<f64>,
}

impl DisplaySeries {
    pub fn named(&self) -> [(&'static str, &[f64]); 4] {
        [
            (VALUE_SERIES, self.value.as_slice()),
            (MEAN_SERIES, self.mean.as_slice()),
            (UPPER_BAND_SERIES, self.upper_band.as_slice()),
            (LOWER_BAND_SERIES, self.lower_band.as_slice()),
        ]
    }
}

/// Everything one axis panel needs to draw its chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisChart {
    pub axis: Axis,
    pub series: DisplaySeries,
    pub limits: DisplayLimits,
}

/// Fixed ±3.5σ window around the mean: 3σ plus a half-σ margin.
///
/// `_values` is accepted to keep the chart-building call uniform; the bounds
/// never depend on the plotted data.
pub fn calculate_dynamic_limits(_values: &[f64], mean: f64, standard_deviation: f64) -> DisplayLimits {
    let margin = standard_deviation * 0.5;
    DisplayLimits {
        min: mean - 3.0 * standard_deviation - margin,
        max: mean + 3.0 * standard_deviation + margin,
    }
}

pub fn build_series(axis: Axis, readings: &[Reading], baseline: Option<&Baseline>) -> DisplaySeries {
    let count = readings.len();
    let stats = baseline.map(|b| axis.stats(b)).unwrap_or_default();

    let value = readings
        .iter()
        .map(|reading| round_to_decimals(axis.value(reading), VALUE_DECIMALS))
        .collect();
    let mean = vec![stats.mean.unwrap_or(0.0); count];

    let (upper_band, lower_band) = match (baseline, stats.mean, stats.standard_deviation) {
        (Some(_), Some(m), Some(sd)) => (vec![m + sd; count], vec![m - sd; count]),
        _ => (Vec::new(), Vec::new()),
    };

    DisplaySeries { value, mean, upper_band, lower_band }
}

pub fn build_axis_chart(axis: Axis, readings: &[Reading], baseline: Option<&Baseline>) -> AxisChart {
    let series = build_series(axis, readings, baseline);
    let stats = baseline.map(|b| axis.stats(b)).unwrap_or_default();
    let limits = calculate_dynamic_limits(
        &series.value,
        stats.mean.unwrap_or(0.0),
        stats.standard_deviation.unwrap_or(0.0),
    );

    AxisChart { axis, series, limits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(n: usize) -> Vec<Reading> {
        (0..n)
            .map(|i| Reading::new(format!("2024-05-01T10:00:{:02}", i), i as f64, 2.0 * i as f64, 0.1))
            .collect()
    }

    #[test]
    fn test_limits_are_three_and_a_half_sigma() {
        let limits = calculate_dynamic_limits(&[], 10.0, 2.0);
        assert_eq!(limits, DisplayLimits { min: 3.0, max: 17.0 });
    }

    #[test]
    fn test_limits_ignore_data() {
        let wide = calculate_dynamic_limits(&[-1e9, 1e9], 1.0, 0.0);
        assert_eq!(wide, DisplayLimits { min: 1.0, max: 1.0 });
        assert!(!wide.has_span());
    }

    #[test]
    fn test_no_baseline_gives_zero_limits() {
        let chart = build_axis_chart(Axis::X, &readings(3), None);
        assert_eq!(chart.limits, DisplayLimits { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_series_without_baseline() {
        let series = build_series(Axis::Y, &readings(4), None);
        assert_eq!(series.value, vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(series.mean, vec![0.0; 4]);
        assert!(series.upper_band.is_empty());
        assert!(series.lower_band.is_empty());
    }

    #[test]
    fn test_series_with_baseline() {
        let baseline = Baseline::uniform(5.0, 1.0);
        let series = build_series(Axis::Z, &readings(3), Some(&baseline));
        assert_eq!(series.mean, vec![5.0; 3]);
        assert_eq!(series.upper_band, vec![6.0; 3]);
        assert_eq!(series.lower_band, vec![4.0; 3]);
    }

    #[test]
    fn test_zero_deviation_band_is_not_empty() {
        let baseline = Baseline::uniform(2.0, 0.0);
        let series = build_series(Axis::X, &readings(2), Some(&baseline));
        assert_eq!(series.upper_band, vec![2.0; 2]);
        assert_eq!(series.lower_band, vec![2.0; 2]);
    }

    #[test]
    fn test_missing_deviation_defaults() {
        let baseline = Baseline { x_mean: Some(3.0), ..Default::default() };
        let chart = build_axis_chart(Axis::X, &readings(2), Some(&baseline));
        assert_eq!(chart.series.mean, vec![3.0; 2]);
        assert!(chart.series.upper_band.is_empty());
        assert_eq!(chart.limits, DisplayLimits { min: 3.0, max: 3.0 });
    }

    #[test]
    fn test_values_rounded_to_eight_places() {
        let reading = Reading::new("t", 0.123456789123, 0.0, 0.0);
        let series = build_series(Axis::X, &[reading], None);
        assert_eq!(series.value, vec![0.12345679]);
    }

    #[test]
    fn test_empty_readings() {
        let baseline = Baseline::uniform(5.0, 1.0);
        let chart = build_axis_chart(Axis::X, &[], Some(&baseline));
        assert!(chart.series.value.is_empty());
        assert!(chart.series.mean.is_empty());
        assert!(chart.series.upper_band.is_empty());
        assert_eq!(chart.limits, DisplayLimits { min: 1.5, max: 8.5 });
    }
}

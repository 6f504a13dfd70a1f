use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::StatusConfig;
use crate::types::{Axis, Baseline, Reading};

/// Health of the selected device as shown in the status box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Ok,
    Failed,
    Unknown,
}

impl DeviceStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Ok => "Ok",
            DeviceStatus::Failed => "Falha",
            DeviceStatus::Unknown => "Desconhecido",
        }
    }

    pub fn fill_color(self) -> Color32 {
        match self {
            DeviceStatus::Ok => Color32::from_rgb(46, 125, 50),
            DeviceStatus::Failed => Color32::from_rgb(198, 40, 40),
            DeviceStatus::Unknown => Color32::from_rgb(97, 97, 97),
        }
    }
}

/// Derives the device status from the data currently on screen.
pub trait StatusEvaluator: Send {
    fn evaluate(&self, readings: &[Reading], baseline: Option<&Baseline>) -> DeviceStatus;
}

/// Reports `Unknown` until real health criteria are agreed on.
#[derive(Debug, Default)]
pub struct UnknownStatus;

impl StatusEvaluator for UnknownStatus {
    fn evaluate(&self, _readings: &[Reading], _baseline: Option<&Baseline>) -> DeviceStatus {
        DeviceStatus::Unknown
    }
}

/// Always reports the same status regardless of data.
#[derive(Debug)]
pub struct FixedStatus(pub DeviceStatus);

impl StatusEvaluator for FixedStatus {
    fn evaluate(&self, _readings: &[Reading], _baseline: Option<&Baseline>) -> DeviceStatus {
        self.0
    }
}

/// Fails when any recent reading leaves the `mean ± sigma·stddev` band on any axis.
#[derive(Debug)]
pub struct BandStatus {
    pub sigma: f64,
    pub window: usize,
}

impl StatusEvaluator for BandStatus {
    fn evaluate(&self, readings: &[Reading], baseline: Option<&Baseline>) -> DeviceStatus {
        let Some(baseline) = baseline else {
            return DeviceStatus::Unknown;
        };
        if readings.is_empty() {
            return DeviceStatus::Unknown;
        }

        let mut bands = Vec::with_capacity(Axis::ALL.len());
        for axis in Axis::ALL {
            let stats = axis.stats(baseline);
            match (stats.mean, stats.standard_deviation) {
                (Some(mean), Some(sd)) => bands.push((axis, mean - self.sigma * sd, mean + self.sigma * sd)),
                _ => return DeviceStatus::Unknown,
            }
        }

        let recent = &readings[readings.len().saturating_sub(self.window)..];
        let outside = recent.iter().any(|reading| {
            bands.iter().any(|&(axis, low, high)| {
                let v = axis.value(reading);
                v < low || v > high
            })
        });

        if outside {
            DeviceStatus::Failed
        } else {
            DeviceStatus::Ok
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMode {
    Unknown,
    PlaceholderFailure,
    Band,
}

pub fn evaluator_from_config(config: &StatusConfig) -> Box<dyn StatusEvaluator> {
    match config.mode {
        StatusMode::Unknown => Box::new(UnknownStatus),
        StatusMode::PlaceholderFailure => Box::new(FixedStatus(DeviceStatus::Failed)),
        StatusMode::Band => Box::new(BandStatus {
            sigma: config.sigma,
            window: config.window,
        }),
    }
}

use super::DeviceId;

/// One timestamped triaxial SAC-DM sample, as published by the feed.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct Reading {
    pub timestamp: String,
    pub x_value: f64,
    pub y_value: f64,
    pub z_value: f64,
    #[serde(default)]
    pub device_id: Option<u32>,
}

#[cfg(test)]
impl Reading {
    pub fn new(timestamp: impl Into<String>, x_value: f64, y_value: f64, z_value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            x_value,
            y_value,
            z_value,
            device_id: None,
        }
    }
}

impl Reading {
    /// Untagged readings belong to whichever device is selected.
    pub fn belongs_to(&self, device: DeviceId) -> bool {
        self.device_id.map_or(true, |id| id == device.get())
    }
}

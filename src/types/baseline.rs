/// Per-device statistical baseline served by the backend.
///
/// Every field is optional: a missing or `null` value is kept as `None` and
/// each consumer decides how to default it. Unknown fields in the payload
/// (row id, vehicle id, ...) are ignored.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq)]
pub struct Baseline {
    #[serde(default)]
    pub x_mean: Option<f64>,
    #[serde(default)]
    pub x_standard_deviation: Option<f64>,
    #[serde(default)]
    pub y_mean: Option<f64>,
    #[serde(default)]
    pub y_standard_deviation: Option<f64>,
    #[serde(default)]
    pub z_mean: Option<f64>,
    #[serde(default)]
    pub z_standard_deviation: Option<f64>,
}

#[cfg(test)]
impl Baseline {
    pub fn uniform(mean: f64, standard_deviation: f64) -> Self {
        Self {
            x_mean: Some(mean),
            x_standard_deviation: Some(standard_deviation),
            y_mean: Some(mean),
            y_standard_deviation: Some(standard_deviation),
            z_mean: Some(mean),
            z_standard_deviation: Some(standard_deviation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_decodes_backend_row() {
        let json = r#"{
            "id": 3,
            "vehicle_id": 1,
            "x_mean": 0.5,
            "x_standard_deviation": 0.1,
            "y_mean": 0.25,
            "y_standard_deviation": 0.05,
            "z_mean": 1.0,
            "z_standard_deviation": 0.2
        }"#;
        let baseline: Baseline = serde_json::from_str(json).unwrap();
        assert_eq!(baseline.x_mean, Some(0.5));
        assert_eq!(baseline.z_standard_deviation, Some(0.2));
    }

    #[test]
    fn test_baseline_missing_and_null_fields() {
        let json = r#"{ "x_mean": 2.0, "y_mean": null }"#;
        let baseline: Baseline = serde_json::from_str(json).unwrap();
        assert_eq!(baseline.x_mean, Some(2.0));
        assert_eq!(baseline.x_standard_deviation, None);
        assert_eq!(baseline.y_mean, None);
    }
}

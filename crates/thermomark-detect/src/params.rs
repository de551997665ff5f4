use serde::{Deserialize, Serialize};

/// Caller-tunable detection settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Intensity cutoff: pixels darker than this become foreground.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Contours below this area are discarded as noise.
    #[serde(default = "default_min_area")]
    pub min_area_px: f64,
}

fn default_threshold() -> u8 {
    90
}

fn default_min_area() -> f64 {
    150.0
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_area_px: default_min_area(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_json_fields_take_defaults() {
        let params: DetectionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.threshold, 90);
        assert_eq!(params.min_area_px, 150.0);
    }
}

use serde::{Deserialize, Serialize};

use thermomark_core::Severity;

/// Defect counts at which the qualitative summary changes tier.
const SUMMARY_MINOR_MAX: usize = 5;

/// One auto-detected defect.
///
/// Serialized in the legacy wire shape consumers of the detector expect:
/// `x`/`y` in pixels, `size` in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedDefect {
    /// 1-based rank after the size-descending sort.
    pub id: u32,
    /// Contour centroid, pixels.
    pub x: i32,
    pub y: i32,
    /// Estimated diameter in millimeters under the nominal scale.
    #[serde(rename = "size")]
    pub size_mm: f64,
    pub severity: Severity,
    /// Mean grayscale intensity inside the contour.
    pub brightness: f64,
}

/// Detection output for one image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionReport {
    pub defects: Vec<DetectedDefect>,
    pub image_width: u32,
    pub image_height: u32,
    pub total_defects: usize,
    pub summary: String,
}

/// Three-tier qualitative assessment by defect count.
pub fn summary_for_count(count: usize) -> &'static str {
    match count {
        0 => "no defects",
        n if n <= SUMMARY_MINOR_MAX => "minor defects",
        _ => "inspection required",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tiers() {
        assert_eq!(summary_for_count(0), "no defects");
        assert_eq!(summary_for_count(1), "minor defects");
        assert_eq!(summary_for_count(5), "minor defects");
        assert_eq!(summary_for_count(6), "inspection required");
    }

    #[test]
    fn defect_serializes_in_the_legacy_shape() {
        let defect = DetectedDefect {
            id: 1,
            x: 40,
            y: 50,
            size_mm: 12.5,
            severity: Severity::Medium,
            brightness: 33.0,
        };
        let json = serde_json::to_value(defect).unwrap();
        assert_eq!(json["x"], 40);
        assert_eq!(json["size"], 12.5);
        assert_eq!(json["severity"], "medium");
        assert!(json.get("size_mm").is_none());
    }
}

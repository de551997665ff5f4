use serde::{Deserialize, Serialize};

use crate::coords::{mm_to_px, PanelScale};

/// Nominal defect diameter assumed when a record carries none.
pub const DEFAULT_DIAMETER_MM: f64 = 10.0;

/// Qualitative defect-size tier. Drives marker color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Lenient parse: case-insensitive, anything unrecognized is `Medium`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Where a defect sits, as supplied by the caller.
///
/// The wire format is an untagged union resolved by key presence (mm keys
/// win); it is decided once at parse time and never re-probed downstream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefectPosition {
    /// Preferred format: millimeter coordinates on the panel.
    Millimeters { x_mm: f64, y_mm: f64 },
    /// Legacy format: pixel coordinates on the image.
    Pixels { x: f64, y: f64 },
}

impl DefectPosition {
    /// Resolve to an on-canvas pixel position. Done once before rendering;
    /// the resolved position is never mutated afterward.
    pub fn resolve(&self, scale: &PanelScale) -> (i32, i32) {
        match *self {
            Self::Millimeters { x_mm, y_mm } => (mm_to_px(x_mm, scale.x), mm_to_px(y_mm, scale.y)),
            Self::Pixels { x, y } => (x.round() as i32, y.round() as i32),
        }
    }

    pub fn is_millimeters(&self) -> bool {
        matches!(self, Self::Millimeters { .. })
    }
}

/// One known defect to annotate on the panel image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Defect {
    /// Display id; defaults to the 1-based position in the input list.
    pub id: u32,
    pub position: DefectPosition,
    pub diameter_mm: f64,
    pub severity: Severity,
    /// Auxiliary metadata carried through from the source, if any.
    pub temperature: Option<f64>,
    pub brightness: Option<f64>,
}

impl Defect {
    pub fn new(id: u32, position: DefectPosition) -> Self {
        Self {
            id,
            position,
            diameter_mm: DEFAULT_DIAMETER_MM,
            severity: Severity::Medium,
            temperature: None,
            brightness: None,
        }
    }

    pub fn with_diameter_mm(mut self, diameter_mm: f64) -> Self {
        self.diameter_mm = diameter_mm;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelSpec;

    #[test]
    fn severity_parse_is_lenient() {
        assert_eq!(Severity::parse("HIGH"), Severity::High);
        assert_eq!(Severity::parse(" low "), Severity::Low);
        assert_eq!(Severity::parse("medium"), Severity::Medium);
        assert_eq!(Severity::parse("critical"), Severity::Medium);
        assert_eq!(Severity::parse(""), Severity::Medium);
    }

    #[test]
    fn millimeter_position_resolves_through_the_scale() {
        let scale = PanelScale::for_image(&PanelSpec::new(100.0, 100.0), 1000, 1000).unwrap();
        let pos = DefectPosition::Millimeters {
            x_mm: 10.0,
            y_mm: 10.0,
        };
        assert_eq!(pos.resolve(&scale), (100, 100));
    }

    #[test]
    fn pixel_position_passes_through_unscaled() {
        let scale = PanelScale::for_image(&PanelSpec::new(100.0, 100.0), 1000, 1000).unwrap();
        let pos = DefectPosition::Pixels { x: 42.4, y: 17.6 };
        assert_eq!(pos.resolve(&scale), (42, 18));
    }

    #[test]
    fn untagged_position_prefers_mm_keys() {
        let mm: DefectPosition = serde_json::from_str(r#"{"x_mm": 5.0, "y_mm": 6.0}"#).unwrap();
        assert!(mm.is_millimeters());
        let px: DefectPosition = serde_json::from_str(r#"{"x": 5.0, "y": 6.0}"#).unwrap();
        assert!(!px.is_millimeters());
    }
}

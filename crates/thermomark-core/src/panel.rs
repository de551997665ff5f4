use serde::{Deserialize, Serialize};

/// Physical dimensions of the inspected panel, in millimeters.
///
/// Supplied per call; together with the image pixel dimensions it defines
/// the px/mm scale used for every grid label and marker position in that
/// call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PanelSpec {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }
}

impl Default for PanelSpec {
    /// The 500×400 mm panel the service historically assumed.
    fn default() -> Self {
        Self {
            width_mm: 500.0,
            height_mm: 400.0,
        }
    }
}

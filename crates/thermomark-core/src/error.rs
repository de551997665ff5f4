/// Errors produced when deriving a px/mm scale.
#[derive(thiserror::Error, Debug)]
pub enum ScaleError {
    #[error("non-positive panel dimension (width_mm={width_mm}, height_mm={height_mm})")]
    NonPositivePanelDimension { width_mm: f64, height_mm: f64 },
}

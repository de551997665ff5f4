use thermomark_core::ScaleError;

/// Errors returned by the grid and marker renderers.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("grid step must be positive (step_small_px={step_small_px}, step_large_px={step_large_px})")]
    ZeroGridStep {
        step_small_px: u32,
        step_large_px: u32,
    },
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

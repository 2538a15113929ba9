use thiserror::Error;

/// Errors originating from the core rendering pipeline.
///
/// Every variant is raised before any grid is produced: the pipeline never
/// emits degraded output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid configuration value (charset, animation parameters, grid size).
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Malformed pixel input.
    #[error("Entrée invalide : {0}")]
    InvalidInput(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

impl CoreError {
    /// `true` for configuration errors, `false` for input errors.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

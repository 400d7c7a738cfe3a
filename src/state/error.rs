//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// State was assembled without a theme
    #[error("Theme state must be provided before building application state")]
    ThemeProviderMissing,

    /// State was assembled without a store
    #[error("Store must be provided before building application state")]
    StoreMissing,

    /// Network request could not be handed to the network thread
    #[error("Failed to dispatch network event: {0}")]
    DispatchFailed(String),
}

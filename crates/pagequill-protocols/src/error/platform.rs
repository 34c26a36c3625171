//! Platform surface errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("Window query failed: {0}")]
    WindowQuery(String),

    #[error("Tab query failed: {0}")]
    TabQuery(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Action UI error: {0}")]
    ActionUi(String),
}

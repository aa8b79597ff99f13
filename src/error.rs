use thiserror::Error;

#[derive(Error, Debug)]
pub enum EspError {
    #[error("No device found: {0}")]
    DeviceNotFound(String),

    #[error("Toolchain unavailable: {0}")]
    ToolchainUnavailable(String),

    #[error("Step failed: {0}")]
    StepFailure(String),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type EspResult<T> = std::result::Result<T, EspError>;

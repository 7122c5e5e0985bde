use thiserror::Error;

#[derive(Debug, Error)]
pub enum AfskError {
    #[error("invalid baud rate: {0}")]
    InvalidBaud(u32),

    #[error("invalid capture thresholds: start {start} must be in (end, 32768)")]
    InvalidThresholds { start: u16, end: u16 },

    #[error("audio I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AfskError>;

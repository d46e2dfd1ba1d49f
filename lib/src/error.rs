use thiserror::Error;

/// Precondition violations detected before a transform touches the buffer.
///
/// Every variant is raised up front; a buffer handed to a failing call is
/// left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Channel {channel} is out of range (image has {channels} channels)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("Split count must be at least 1, got {0}")]
    InvalidSplitCount(usize),

    #[error("Invalid grayscale weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

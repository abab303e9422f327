#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("store needs at least one channel")]
    NoChannels,
    #[error("expected {expected} channel values, got {actual}")]
    ChannelCount { expected: usize, actual: usize },
    #[error("timestamp {0} is not finite")]
    NonFiniteTimestamp(f64),
    #[error("channel {channel} value {value} is not finite")]
    NonFiniteValue { channel: usize, value: f64 },
    #[error("smoothing factor {0} outside [0, 1)")]
    SmoothingFactor(f64),
    #[error("cannot shrink store from {current} to {requested} channels")]
    ChannelShrink { current: usize, requested: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("timestamp {timestamp} is older than last stored timestamp {last}")]
pub struct OrderingError {
    pub last: f64,
    pub timestamp: f64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, StoreError::Ordering(_))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PacketError {
    #[error("frame length {0} is not a multiple of 4 bytes")]
    Misaligned(usize),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

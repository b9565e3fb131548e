use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Enabled channels do not share exactly 100 % of the R1 target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel distribution totals {total}% (off by {delta:+})")]
pub struct DistributionError {
    pub total: u32,
    /// `total - 100`.
    pub delta: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("month index {0} is out of range (0-11)")]
    MonthOutOfRange(usize),
    #[error("week index {0} is out of range (0-3)")]
    WeekOutOfRange(usize),
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error("channel name cannot be empty")]
    EmptyChannelName,
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize state: {0}")]
    Serialization(#[from] serde_json::Error),
}

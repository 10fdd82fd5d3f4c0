use thiserror::Error;

/// Error type that captures plumbing failures around the ledger state.
///
/// Data problems inside the ledger itself never surface here: the reducer and
/// the normalizers repair them instead.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}

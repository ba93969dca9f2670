use super::domain::{Submission, SubmissionId};

/// Storage abstraction owned by the data-access layer. The engine issues no
/// queries of its own; it asks the store for already-denormalized submission
/// records (account, broker, towers, and loss history joined in).
pub trait SubmissionStore: Send + Sync {
    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError>;
}

/// Error enumeration for store failures. Absence is `Ok(None)`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission store unavailable: {0}")]
    Unavailable(String),
}

use std::collections::HashSet;

use crate::workflows::underwriting::domain::{Submission, SubmissionId};
use crate::workflows::underwriting::repository::{StoreError, SubmissionStore};

/// Failures while materializing a renewal chain.
#[derive(Debug, thiserror::Error)]
pub enum RenewalError {
    /// A `prior_submission_id` loop. Traversal aborts instead of spinning.
    #[error("corrupt renewal chain: submission {} appears more than once", at.0)]
    CorruptChain { at: SubmissionId },
    #[error("renewal chain references missing submission {}", id.0)]
    MissingPrior { id: SubmissionId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Load the full renewal chain into a list, newest first, starting from the
/// given submission. The whole chain is materialized once so the calculators
/// operate on plain data; a visited set turns any cycle in the stored
/// foreign-key references into a detected error.
pub fn load_chain<S: SubmissionStore>(
    store: &S,
    first: Submission,
) -> Result<Vec<Submission>, RenewalError> {
    let mut visited: HashSet<SubmissionId> = HashSet::new();
    visited.insert(first.id.clone());

    let mut chain = vec![first];

    loop {
        let prior_id = match chain
            .last()
            .and_then(|submission| submission.prior_submission_id.clone())
        {
            Some(id) => id,
            None => break,
        };

        if !visited.insert(prior_id.clone()) {
            return Err(RenewalError::CorruptChain { at: prior_id });
        }

        let prior = store
            .fetch(&prior_id)?
            .ok_or(RenewalError::MissingPrior { id: prior_id })?;
        chain.push(prior);
    }

    Ok(chain)
}

/// Premium and loss totals for one bound policy year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundYear {
    pub premium: u64,
    pub paid: u64,
    pub incurred: u64,
}

/// Collect every bound ancestor's premium and losses, walking from the
/// evaluated policy toward the oldest link. Years without a sold premium are
/// skipped but do not terminate the walk: a gap year must not break the chain.
pub fn bound_years(chain_tail: &[Submission]) -> Vec<BoundYear> {
    chain_tail
        .iter()
        .filter_map(|submission| {
            let premium = submission.bound_premium()?;
            let (paid, incurred) = submission.loss_history.iter().fold(
                (0u64, 0u64),
                |(paid, incurred), record| (paid + record.paid, incurred + record.incurred()),
            );
            Some(BoundYear {
                premium,
                paid,
                incurred,
            })
        })
        .collect()
}

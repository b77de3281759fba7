// Sequential batching of mutation sets larger than one transaction.
//
// Each batch is one atomic transaction. Batches are committed one after the other and the
// first failing batch stops the run; batches committed before it stay committed. The
// outcome says which of these happened instead of leaving callers to guess.

use serde::Serialize;
use tracing::{error, info};

use super::{DocumentStore, MAX_MUTATIONS_PER_TRANSACTION, Mutation, StoreError, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BulkOutcome {
    /// Every batch committed.
    Committed { count: usize, batches: usize },
    /// Batches before `failed_batch` (1-based) committed, the rest did not run.
    PartiallyCommitted {
        committed: usize,
        committed_batches: usize,
        failed_batch: usize,
        #[serde(skip)]
        reason: String,
    },
    /// Preconditions failed, nothing was sent to the store.
    Rejected { offending_ids: Vec<String> },
}

impl BulkOutcome {
    /// Number of mutations (one per target document) that reached the store.
    pub fn committed_count(&self) -> usize {
        match self {
            BulkOutcome::Committed { count, .. } => *count,
            BulkOutcome::PartiallyCommitted { committed, .. } => *committed,
            BulkOutcome::Rejected { .. } => 0,
        }
    }
}

/// Commit `mutations` in transactions of at most MAX_MUTATIONS_PER_TRANSACTION.
///
/// A failure of the very first batch is returned as an error since nothing was written.
pub async fn commit_in_batches<S>(
    store: &S,
    mutations: Vec<Mutation>,
) -> Result<BulkOutcome, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let total_batches = mutations.len().div_ceil(MAX_MUTATIONS_PER_TRANSACTION);
    let mut committed = 0;
    for (index, chunk) in mutations.chunks(MAX_MUTATIONS_PER_TRANSACTION).enumerate() {
        let size = chunk.len();
        if let Err(e) = store.commit(Transaction::from(chunk.to_vec())).await {
            if index == 0 {
                return Err(e);
            }
            error!(
                batch = index + 1,
                total_batches, committed, "batch commit failed: {e}"
            );
            return Ok(BulkOutcome::PartiallyCommitted {
                committed,
                committed_batches: index,
                failed_batch: index + 1,
                reason: e.to_string(),
            });
        }
        committed += size;
        info!(batch = index + 1, total_batches, size, "batch committed");
    }
    Ok(BulkOutcome::Committed {
        count: committed,
        batches: total_batches,
    })
}

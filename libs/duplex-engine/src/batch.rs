use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use duplex_api::ConversionError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

// ════════════════════════════════════════════════════════════════
//  Batch options
// ════════════════════════════════════════════════════════════════

/// Лимиты fan-out для одного batch-вызова.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Максимум одновременно работающих units. `None` → все сразу.
    pub max_concurrency: Option<NonZeroUsize>,
}

impl BatchOptions {
    pub fn unbounded() -> Self {
        Self { max_concurrency: None }
    }

    /// `0` means unbounded.
    pub fn with_max_concurrency(limit: usize) -> Self {
        Self { max_concurrency: NonZeroUsize::new(limit) }
    }
}

// ════════════════════════════════════════════════════════════════
//  Fan-out / fan-in
// ════════════════════════════════════════════════════════════════

/// Run every unit as its own tokio task and collect the results in
/// input order.
///
/// Each task is tagged with the position of its unit; results are put
/// back into that position regardless of completion order. The call is a
/// barrier: it returns once every unit has finished, or at the first
/// failure. On failure the remaining units are aborted and no partial
/// result is returned.
///
/// Must be polled inside a tokio runtime.
pub async fn join_indexed<T, F, I>(units: I, options: BatchOptions) -> Result<Vec<T>, ConversionError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, ConversionError>> + Send + 'static,
    T: Send + 'static,
{
    let permits = options
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.get())));

    let mut set = JoinSet::new();
    for (index, unit) in units.into_iter().enumerate() {
        let permits = permits.clone();
        set.spawn(async move {
            let _permit = match permits {
                Some(sem) => match sem.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(e) => return (index, Err(ConversionError::Task(e.to_string()))),
                },
                None => None,
            };
            (index, unit.await)
        });
    }

    let total = set.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    tracing::debug!(units = total, limit = ?options.max_concurrency, "batch fan-out");

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, Ok(value))) => slots[index] = Some(value),
            Ok((index, Err(e))) => {
                tracing::debug!(index, pending = set.len(), error = %e, "batch unit failed, aborting siblings");
                set.abort_all();
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(pending = set.len(), error = %e, "batch unit did not complete");
                set.abort_all();
                return Err(ConversionError::Task(e.to_string()));
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| ConversionError::Task(format!("batch unit {index} produced no result")))
        })
        .collect()
}

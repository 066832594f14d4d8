//! Async sequence operations on tokio's blocking pool.
//!
//! Shuffling or sampling a large collection is CPU-bound, so these wrappers
//! move the generator and the items onto [`tokio::task::spawn_blocking`] and
//! hand the generator back together with the result. A [`CancellationToken`]
//! is checked when the call is made and again when the blocking task starts;
//! once the work has begun it runs to completion.
//!
//! ```
//! use fortress_random::engines::Sfc64;
//! use fortress_random::task::{shuffle_async, CancellationToken};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), fortress_random::RandomError> {
//! let token = CancellationToken::new();
//! let (rng, deck) = shuffle_async(Sfc64::new(1, 2, 3, 4), (0..52).collect::<Vec<u32>>(), &token).await?;
//! assert_eq!(deck.len(), 52);
//! # drop(rng);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RandomError;
use crate::rng::Rng;

/// A cloneable cancellation flag shared between a caller and its pending tasks.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every task holding a clone of this token that has not started yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`CancellationToken::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn check(&self) -> Result<(), RandomError> {
        if self.is_cancelled() {
            return Err(RandomError::Cancelled);
        }
        Ok(())
    }
}

/// Runs `work` on the blocking pool unless `token` is cancelled first.
async fn run_blocking<R, T, F>(
    rng: R,
    items: Vec<T>,
    token: &CancellationToken,
    work: F,
) -> Result<(R, Vec<T>), RandomError>
where
    R: Rng + Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut R, Vec<T>) -> Result<Vec<T>, RandomError> + Send + 'static,
{
    token.check()?;
    let token = token.clone();
    let handle = tokio::task::spawn_blocking(move || {
        token.check()?;
        let mut rng = rng;
        let result = work(&mut rng, items)?;
        Ok((rng, result))
    });
    handle.await.map_err(|err| RandomError::InternalError {
        context: format!("blocking sequence task failed: {}", err),
    })?
}

/// Shuffles `items` with Fisher-Yates on the blocking pool.
///
/// # Errors
/// [`RandomError::Cancelled`] if `token` is cancelled before the shuffle starts.
pub async fn shuffle_async<R, T>(
    rng: R,
    items: Vec<T>,
    token: &CancellationToken,
) -> Result<(R, Vec<T>), RandomError>
where
    R: Rng + Send + 'static,
    T: Send + 'static,
{
    run_blocking(rng, items, token, |rng, mut items| {
        rng.shuffle_in_place(&mut items);
        Ok(items)
    })
    .await
}

/// Reservoir-samples `select` items on the blocking pool, see [`Rng::sample`].
///
/// # Errors
/// [`RandomError::Cancelled`] if `token` is cancelled before sampling starts,
/// otherwise the errors of [`Rng::sample`].
pub async fn sample_async<R, T>(
    rng: R,
    items: Vec<T>,
    select: usize,
    token: &CancellationToken,
) -> Result<(R, Vec<T>), RandomError>
where
    R: Rng + Send + 'static,
    T: Clone + Send + 'static,
{
    run_blocking(rng, items, token, move |rng, items| rng.sample(&items, select)).await
}

/// Picks `select` items with replacement on the blocking pool, see [`Rng::choice_multiple`].
///
/// # Errors
/// [`RandomError::Cancelled`] if `token` is cancelled before the work starts,
/// otherwise the errors of [`Rng::choice_multiple`].
pub async fn choice_multiple_async<R, T>(
    rng: R,
    items: Vec<T>,
    select: usize,
    token: &CancellationToken,
) -> Result<(R, Vec<T>), RandomError>
where
    R: Rng + Send + 'static,
    T: Clone + Send + 'static,
{
    run_blocking(rng, items, token, move |rng, items| {
        rng.choice_multiple(&items, select)
    })
    .await
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::engines::{Pcg32XshRr, RomuDuoJr};

    #[tokio::test]
    async fn test_shuffle_async_matches_sync() {
        let items: Vec<u32> = (0..100).collect();
        let token = CancellationToken::new();
        let (rng, shuffled) = shuffle_async(Pcg32XshRr::new(42, 54), items.clone(), &token)
            .await
            .unwrap();

        let mut sync_rng = Pcg32XshRr::new(42, 54);
        assert_eq!(shuffled, sync_rng.shuffle(&items));
        assert_eq!(rng, sync_rng);
    }

    #[tokio::test]
    async fn test_sample_and_choice_async() {
        let items: Vec<u32> = (0..50).collect();
        let token = CancellationToken::new();
        let (rng, picked) = sample_async(RomuDuoJr::seed_from_u64(1), items.clone(), 7, &token)
            .await
            .unwrap();
        assert_eq!(picked.len(), 7);

        let (_, chosen) = choice_multiple_async(rng, items.clone(), 3, &token)
            .await
            .unwrap();
        assert_eq!(chosen.len(), 3);
        assert!(chosen.iter().all(|c| items.contains(c)));
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_work() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        let result = shuffle_async(RomuDuoJr::default(), vec![1, 2, 3], &token).await;
        assert_eq!(result.unwrap_err(), RandomError::Cancelled);
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let token = CancellationToken::new();
        let result = sample_async(RomuDuoJr::default(), Vec::<u8>::new(), 2, &token).await;
        assert_eq!(result.unwrap_err(), RandomError::EmptyItems);
        let result = choice_multiple_async(RomuDuoJr::default(), vec![1u8], 2, &token).await;
        assert!(matches!(
            result.unwrap_err(),
            RandomError::InvalidSelection { select: 2, length: 1 }
        ));
    }
}

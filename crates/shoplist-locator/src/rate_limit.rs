//! Retry with exponential backoff for transient catalog fetch errors.
//!
//! Network failures and 429 / 5xx statuses are retried. Everything else
//! (decode errors, 4xx, validation) is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::LocatorError;

fn is_retriable(err: &LocatorError) -> bool {
    match err {
        LocatorError::Http(_) => true,
        LocatorError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Executes `operation`, retrying retriable errors up to `max_retries` more
/// times. The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, LocatorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LocatorError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient catalog error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

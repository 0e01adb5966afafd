use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Delays before each retry: 2s, 4s, 6s, 8s, then 10s for the rest.
#[must_use]
pub fn backoff_schedule(max_retries: usize) -> Vec<Duration> {
    (1..=max_retries)
        .map(|attempt| Duration::from_secs((2 * attempt as u64).min(10)))
        .collect()
}

/// Retry an async operation with backoff.
///
/// The operation runs once, then once more after each delay in `delays` for
/// as long as `is_retryable` accepts the error.
///
/// # Returns
/// The first success, or the last error seen.
pub async fn retry_with_backoff<F, Fut, T, E, R>(
    mut operation: F,
    delays: &[Duration],
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
    R: Fn(&E) -> bool,
{
    let total = delays.len() + 1;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let Some(delay) = delays.get(attempt - 1) else {
                    return Err(e);
                };
                if !is_retryable(&e) {
                    return Err(e);
                }
                warn!(
                    "Request failed (attempt {attempt}/{total}): {e}. Retrying after {}ms...",
                    delay.as_millis()
                );
                sleep(*delay).await;
                attempt += 1;
            }
        }
    }
}

use std::future::Future;

use tracing::warn;

use crate::domain::generation::{
    errors::GenerationError,
    value_objects::{CancellationToken, GenerationOptions, GenerationSettings},
};

/// Runs `call` under the per-attempt timeout, retrying transient failures
/// with exponential backoff until the attempt budget is spent.
///
/// Cancellation is observed before each attempt, while the attempt is in
/// flight and during backoff.
pub async fn run_with_retry<T, F, Fut>(
    operation: &'static str,
    settings: &GenerationSettings,
    options: &GenerationOptions,
    mut call: F,
) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let timeout = options.timeout.unwrap_or(settings.timeout);
    let max_attempts = settings.retry.max_attempts.max(1);
    let cancellation = options.cancellation.as_ref();
    let mut attempt = 1;

    loop {
        let result = cancellable(cancellation, async {
            match tokio::time::timeout(timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout(timeout)),
            }
        })
        .await;

        match result {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < max_attempts => {
                let delay = settings.retry.backoff_for(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient generation failure, retrying"
                );

                cancellable(cancellation, async {
                    tokio::time::sleep(delay).await;
                    Ok(())
                })
                .await?;

                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn cancellable<T>(
    token: Option<&CancellationToken>,
    future: impl Future<Output = Result<T, GenerationError>>,
) -> Result<T, GenerationError> {
    let Some(token) = token else {
        return future.await;
    };

    if token.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(GenerationError::Cancelled),
        result = future => result,
    }
}

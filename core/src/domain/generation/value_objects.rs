use std::{sync::Arc, time::Duration};

use tokio::sync::watch;

use crate::domain::common::entities::app_errors::CoreError;

pub const SUPPORTED_IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Backoff schedule for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before the attempt following `attempt` (1-based), doubling each time.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }
}

/// Service-wide defaults applied to every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

/// Per-call knobs supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Overrides the per-attempt timeout from [`GenerationSettings`].
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl GenerationOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Caller-owned cancellation signal shared between clones.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

/// An image attached to a vision request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageInput {
    data: Vec<u8>,
    mime_type: String,
}

impl ImageInput {
    pub fn new(data: Vec<u8>, mime_type: impl AsRef<str>) -> Result<Self, CoreError> {
        let mime_type = mime_type.as_ref().trim().to_ascii_lowercase();

        if data.is_empty() {
            return Err(CoreError::InvalidInput("image is empty".to_string()));
        }

        if !SUPPORTED_IMAGE_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(CoreError::InvalidInput(format!(
                "unsupported image type '{}'",
                mime_type
            )));
        }

        Ok(Self { data, mime_type })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 6,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(3),
        };
        assert_eq!(policy.backoff_for(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(4), Duration::from_secs(3));
        assert_eq!(policy.backoff_for(40), Duration::from_secs(3));
    }

    #[test]
    fn test_image_input_normalizes_mime_type() {
        let image = ImageInput::new(vec![0xFF, 0xD8], " Image/JPEG ").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.data(), &[0xFF, 0xD8]);
    }

    #[test]
    fn test_image_input_rejects_empty_and_unsupported() {
        assert!(matches!(
            ImageInput::new(Vec::new(), "image/png"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            ImageInput::new(vec![1, 2, 3], "application/pdf"),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_cancellation_token_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        let waiter = tokio::spawn(async move { clone.cancelled().await });
        token.cancel();

        waiter.await.unwrap();
        assert!(token.is_cancelled());
    }
}

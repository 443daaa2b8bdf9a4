//! Error type returned by the retry executor

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during retry execution
///
/// Generic over `E`, the error type of the operation being retried.
#[derive(Debug)]
pub enum RetryError<E> {
    /// All attempts failed with retryable errors
    Exhausted {
        attempts: u32,
        source: E,
        total_duration: Duration,
    },

    /// The predicate rejected the error; no further attempts were made
    NonRetryable { attempt: u32, source: E },
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted {
                attempts,
                source,
                total_duration,
            } => write!(
                f,
                "retry exhausted after {} attempts over {:.2}s: {}",
                attempts,
                total_duration.as_secs_f64(),
                source
            ),
            RetryError::NonRetryable { source, .. } => write!(f, "{}", source),
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::Exhausted { source, .. } | RetryError::NonRetryable { source, .. } => {
                Some(source)
            }
        }
    }
}

impl<E> RetryError<E> {
    /// The error from the final attempt
    pub fn into_source(self) -> E {
        match self {
            RetryError::Exhausted { source, .. } | RetryError::NonRetryable { source, .. } => {
                source
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display() {
        let err: RetryError<String> = RetryError::Exhausted {
            attempts: 3,
            source: "connection refused".to_string(),
            total_duration: Duration::from_millis(1500),
        };
        let display = err.to_string();
        assert!(display.contains("3 attempts"));
        assert!(display.contains("connection refused"));
        assert!(matches!(err, RetryError::Exhausted { attempts: 3, .. }));
    }

    #[test]
    fn test_non_retryable_is_transparent() {
        let err: RetryError<String> = RetryError::NonRetryable {
            attempt: 1,
            source: "HTTP 404".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(err.into_source(), "HTTP 404");
    }
}

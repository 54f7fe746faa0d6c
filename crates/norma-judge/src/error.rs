//! Judge API client error types.

/// Errors from judge chat-completion calls.
#[derive(Debug, thiserror::Error)]
pub enum JudgeApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// Provider returned a non-2xx status that is not retryable.
    #[error("judge API {endpoint} returned {status}: {body}")]
    Api {
        /// Endpoint that was being called.
        endpoint: String,
        /// HTTP status code returned.
        status: u16,
        /// Response body returned by the provider.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying deserialization error.
        source: reqwest::Error,
    },
    /// Completion arrived with no choices.
    #[error("judge API returned an empty completion")]
    EmptyCompletion,
    /// Retry budget spent without a usable response.
    #[error("judge call failed after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
    /// Every credential in the pool is marked degraded.
    #[error("no usable judge credential remains in the pool")]
    NoUsableCredential,
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = JudgeApiError::Api {
            endpoint: "POST /chat/completions".to_string(),
            status: 422,
            body: "unprocessable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("unprocessable"));
    }

    #[test]
    fn attempts_exhausted_display_includes_count() {
        let err = JudgeApiError::AttemptsExhausted { attempts: 3 };
        assert!(err.to_string().contains("3 attempts"));
    }

    #[test]
    fn no_usable_credential_display() {
        let err = JudgeApiError::NoUsableCredential;
        assert!(err.to_string().contains("credential"));
    }
}

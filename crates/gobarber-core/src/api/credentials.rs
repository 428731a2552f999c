//! Source of the bearer token attached to outgoing requests.

/// Supplies the live bearer token for each request.
///
/// The API client asks the provider on every request instead of keeping a
/// copy of the token, so signing in or out takes effect on the next call
/// without touching the client.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token, or `None` when unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn bearer_token(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_closure_provider() {
        let provider: Arc<dyn CredentialProvider> = Arc::new(|| Some("abc".to_string()));
        assert_eq!(provider.bearer_token(), Some("abc".to_string()));

        let anonymous: Arc<dyn CredentialProvider> = Arc::new(|| None);
        assert_eq!(anonymous.bearer_token(), None);
    }
}

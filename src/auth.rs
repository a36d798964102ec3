use crate::error::{PolarError, PolarResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Named bearer credential schemes accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialScheme {
    /// Personal access token, `pat`
    PersonalAccessToken,
    /// Organization access token, `oat`
    OrganizationAccessToken,
}

impl CredentialScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalAccessToken => "pat",
            Self::OrganizationAccessToken => "oat",
        }
    }
}

impl std::fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the schemes declared on an operation are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Stop at the first scheme that yields a token.
    #[default]
    FirstMatch,
    /// Ask every scheme; the last one that yields a token is used.
    LastMatch,
}

/// Source of bearer tokens, consulted on every call
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return the token for `scheme`, or `None` if this provider has none
    async fn token(&self, scheme: CredentialScheme) -> PolarResult<Option<String>>;
}

/// Resolve the bearer token for an operation's schemes under `policy`.
///
/// Schemes are queried strictly in the given order. Empty tokens count as
/// absent.
pub async fn resolve_bearer(
    provider: &dyn CredentialProvider,
    schemes: &[CredentialScheme],
    policy: CredentialPolicy,
) -> PolarResult<Option<String>> {
    let mut resolved = None;

    for scheme in schemes {
        match provider.token(*scheme).await? {
            Some(token) if !token.is_empty() => {
                log::trace!("credential resolved via {} scheme", scheme);
                resolved = Some(token);
                if policy == CredentialPolicy::FirstMatch {
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(resolved)
}

/// Insert `Authorization: Bearer <token>`, replacing any existing value
pub(crate) fn apply_bearer(headers: &mut HeaderMap, token: &str) -> PolarResult<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| PolarError::auth_error(format!("Invalid auth header: {}", e)))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// No credentials; every operation is sent anonymously
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait::async_trait]
impl CredentialProvider for NoCredentials {
    async fn token(&self, _scheme: CredentialScheme) -> PolarResult<Option<String>> {
        Ok(None)
    }
}

/// A fixed token, answered for every scheme or only for one
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
    scheme: Option<CredentialScheme>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: None,
        }
    }

    /// Only answer for `scheme`
    pub fn for_scheme(token: impl Into<String>, scheme: CredentialScheme) -> Self {
        Self {
            token: token.into(),
            scheme: Some(scheme),
        }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self, scheme: CredentialScheme) -> PolarResult<Option<String>> {
        match self.scheme {
            Some(only) if only != scheme => Ok(None),
            _ => Ok(Some(self.token.clone())),
        }
    }
}

/// Shared, rotatable tokens keyed by scheme.
///
/// Clones share the same storage, so a token set after re-authentication is
/// seen by the next call of every client holding this store.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Arc<RwLock<HashMap<CredentialScheme, String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, scheme: CredentialScheme, token: impl Into<String>) {
        self.tokens.write().await.insert(scheme, token.into());
    }

    pub async fn clear(&self, scheme: CredentialScheme) {
        self.tokens.write().await.remove(&scheme);
    }

    pub async fn clear_all(&self) {
        self.tokens.write().await.clear();
    }
}

#[async_trait::async_trait]
impl CredentialProvider for TokenStore {
    async fn token(&self, scheme: CredentialScheme) -> PolarResult<Option<String>> {
        Ok(self.tokens.read().await.get(&scheme).cloned())
    }
}

/// Adapts an async closure into a provider
pub struct FnProvider<F> {
    f: F,
}

impl<F, Fut> FnProvider<F>
where
    F: Fn(CredentialScheme) -> Fut + Send + Sync,
    Fut: Future<Output = PolarResult<Option<String>>> + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F, Fut> CredentialProvider for FnProvider<F>
where
    F: Fn(CredentialScheme) -> Fut + Send + Sync,
    Fut: Future<Output = PolarResult<Option<String>>> + Send,
{
    async fn token(&self, scheme: CredentialScheme) -> PolarResult<Option<String>> {
        (self.f)(scheme).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const BOTH: &[CredentialScheme] = &[
        CredentialScheme::PersonalAccessToken,
        CredentialScheme::OrganizationAccessToken,
    ];

    #[test]
    fn first_match_stops_after_first_token() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();
        let provider = FnProvider::new(move |scheme| {
            seen.lock().unwrap().push(scheme);
            async move { Ok(Some(format!("{}-token", scheme))) }
        });

        let token = tokio_test::block_on(resolve_bearer(
            &provider,
            BOTH,
            CredentialPolicy::FirstMatch,
        ))
        .unwrap();

        assert_eq!(token.as_deref(), Some("pat-token"));
        assert_eq!(*calls.lock().unwrap(), vec![CredentialScheme::PersonalAccessToken]);
    }

    #[test]
    fn last_match_lets_later_scheme_overwrite() {
        let provider = FnProvider::new(|scheme| async move { Ok(Some(format!("{}-token", scheme))) });

        let token =
            tokio_test::block_on(resolve_bearer(&provider, BOTH, CredentialPolicy::LastMatch))
                .unwrap();

        assert_eq!(token.as_deref(), Some("oat-token"));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let provider = FnProvider::new(|scheme| async move {
            Ok(match scheme {
                CredentialScheme::PersonalAccessToken => Some(String::new()),
                CredentialScheme::OrganizationAccessToken => Some("oat".to_string()),
            })
        });

        let token =
            tokio_test::block_on(resolve_bearer(&provider, BOTH, CredentialPolicy::FirstMatch))
                .unwrap();

        assert_eq!(token.as_deref(), Some("oat"));
    }

    #[tokio::test]
    async fn token_store_rotation_is_visible_to_clones() {
        let store = TokenStore::new();
        let shared = store.clone();

        store.set(CredentialScheme::PersonalAccessToken, "old").await;
        store.set(CredentialScheme::PersonalAccessToken, "new").await;

        let token = shared.token(CredentialScheme::PersonalAccessToken).await.unwrap();
        assert_eq!(token.as_deref(), Some("new"));

        store.clear_all().await;
        assert!(shared.token(CredentialScheme::PersonalAccessToken).await.unwrap().is_none());
    }

    #[test]
    fn scoped_static_token_ignores_other_schemes() {
        let provider = StaticToken::for_scheme("org", CredentialScheme::OrganizationAccessToken);
        let pat = tokio_test::block_on(provider.token(CredentialScheme::PersonalAccessToken)).unwrap();
        assert!(pat.is_none());
    }
}

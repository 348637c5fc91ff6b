//! Extract the access credential from the `token` query parameter.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Optional credential from `?token=...`. Never rejects; the guard decides.
#[derive(Clone, Debug)]
pub struct Credential(pub Option<String>);

impl Credential {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token);
        Ok(Credential(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Credential {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Credential::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_token_param() {
        assert_eq!(extract("/post?token=t0k3n").await.as_deref(), Some("t0k3n"));
        assert_eq!(extract("/post?other=1&token=a%20b").await.as_deref(), Some("a b"));
    }

    #[tokio::test]
    async fn missing_token_is_none() {
        assert_eq!(extract("/post").await.as_deref(), None);
        assert_eq!(extract("/post?tok=x").await.as_deref(), None);
    }
}

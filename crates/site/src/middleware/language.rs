//! Visitor language selection.
//!
//! `?lang=ru|kk` on any page switches the language and persists the
//! choice in the session; unknown values are ignored.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tower_sessions::Session;

use jungle_park_core::Lang;

use crate::models::session::keys;

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// Extractor resolving the visitor's language.
///
/// Order of precedence: a valid `?lang=` query parameter (which is also
/// persisted), the stored session choice, then the default.
pub struct VisitorLang(pub Lang);

impl<S> FromRequestParts<S> for VisitorLang
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned();

        let requested = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|query| query.0.lang)
            .and_then(|value| value.parse::<Lang>().ok());

        if let Some(lang) = requested {
            if let Some(session) = &session {
                if let Err(e) = session.insert(keys::LANG, lang).await {
                    tracing::warn!("Failed to persist language choice: {e}");
                }
            }
            return Ok(Self(lang));
        }

        let stored = match &session {
            Some(session) => session.get::<Lang>(keys::LANG).await.ok().flatten(),
            None => None,
        };

        Ok(Self(stored.unwrap_or_default()))
    }
}

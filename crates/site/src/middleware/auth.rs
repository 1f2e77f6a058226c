//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring staff authentication and per-route
//! roles in admin handlers. Menu screens admit Administrator and
//! Bartender, program screens Administrator and Cashier; everything else
//! is Administrator-only. An Administrator passes every gate.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use jungle_park_core::{Lang, Role};

use crate::models::session::{CurrentUser, keys};
use crate::routes::ErrorPage;
use crate::state::AppState;

/// Path of the forced password-change screen.
pub const PASSWORD_CHANGE_PATH: &str = "/admin/change-password";

/// Path of the logout action, reachable even under a forced change.
const LOGOUT_PATH: &str = "/admin/logout";

/// Extractor that requires a logged-in staff member.
///
/// Unauthenticated HTML requests are redirected to the login screen;
/// API requests get a plain 401. While the account is flagged for a
/// forced password change, every admin page except the password-change
/// screen (and logout) redirects there.
pub struct RequireStaff(pub CurrentUser);

/// Extractor that requires the Administrator role.
pub struct RequireAdmin(pub CurrentUser);

/// Extractor for menu management screens (Administrator or Bartender).
pub struct RequireMenuStaff(pub CurrentUser);

/// Extractor for program management screens (Administrator or Cashier).
pub struct RequireProgramStaff(pub CurrentUser);

/// Extractor that optionally gets the current staff member.
///
/// Unlike `RequireStaff`, this does not reject the request when nobody
/// is logged in.
pub struct OptionalStaff(pub Option<CurrentUser>);

/// Error returned when an auth requirement is not met.
pub enum AuthRejection {
    /// Redirect to the login screen (for HTML requests).
    RedirectToLogin,
    /// Redirect to the forced password-change screen.
    RedirectToPasswordChange,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Role check failed; renders the localized 403 page.
    Forbidden(ErrorPage),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin").into_response(),
            Self::RedirectToPasswordChange => {
                Redirect::to(PASSWORD_CHANGE_PATH).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden(page) => (StatusCode::FORBIDDEN, page).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await.ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        })?;

        let path = parts.uri.path();
        if user.must_change_password && path != PASSWORD_CHANGE_PATH && path != LOGOUT_PATH {
            return Err(AuthRejection::RedirectToPasswordChange);
        }

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for OptionalStaff
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Administrator)
            .await
            .map(Self)
    }
}

impl FromRequestParts<AppState> for RequireMenuStaff {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Bartender).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireProgramStaff {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Cashier).await.map(Self)
    }
}

/// Check the session identity against a required role.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    required: Role,
) -> Result<CurrentUser, AuthRejection> {
    let RequireStaff(user) = RequireStaff::from_request_parts(parts, state).await?;

    if !user.role.permits(required) {
        let lang = stored_lang(parts).await;
        return Err(AuthRejection::Forbidden(ErrorPage::forbidden(
            lang,
            state.translations(),
        )));
    }

    Ok(user)
}

/// Get the current staff member from the session, if logged in.
async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session.get(keys::CURRENT_USER).await.ok().flatten()
}

/// The visitor language stored in the session, defaulting to Russian.
async fn stored_lang(parts: &Parts) -> Lang {
    match parts.extensions.get::<Session>() {
        Some(session) => session
            .get::<Lang>(keys::LANG)
            .await
            .ok()
            .flatten()
            .unwrap_or_default(),
        None => Lang::default(),
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}

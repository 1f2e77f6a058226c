//! Admin authentication route handlers.
//!
//! Login with username and password; a fresh `root` account lands on the
//! forced password-change screen before anything else.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{
    OptionalStaff, RequireStaff, VisitorLang, clear_current_user, set_current_user,
};
use crate::models::CurrentUser;
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub ctx: PageCtx,
    pub error_message: Option<String>,
}

/// Forced password change template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/change_password.html")]
pub struct ChangePasswordTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Password change form body.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Where a fresh login should land.
fn post_login_target(user: &CurrentUser) -> Redirect {
    if user.must_change_password {
        Redirect::to("/admin/change-password?error=changePasswordPrompt")
    } else {
        Redirect::to("/admin/dashboard")
    }
}

/// Render the login page.
///
/// GET /admin
#[instrument(skip(state, user))]
pub async fn login_page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
    Query(params): Query<FlashParams>,
) -> Result<Response> {
    // Already signed in, go straight to the panel.
    if let Some(user) = user {
        return Ok(post_login_target(&user).into_response());
    }

    let ctx = PageCtx::load(&state, lang, None).await?;
    let (_, error_message) = flash_messages(&params, &ctx);
    Ok(LoginTemplate { ctx, error_message }.into_response())
}

/// Verify credentials and store the identity in the session.
///
/// POST /admin
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.store());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            let current = CurrentUser::from(&user);
            set_current_user(&session, &current).await?;
            tracing::info!(username = %current.username, "staff login");
            Ok(post_login_target(&current))
        }
        Err(AuthError::InvalidCredentials | AuthError::UserNotFound) => {
            Ok(Redirect::to("/admin?error=invalidCredentials"))
        }
        Err(error) => {
            tracing::error!("Login failed: {error}");
            Ok(Redirect::to("/admin?error=serverError"))
        }
    }
}

/// Clear the session identity.
///
/// GET /admin/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    Ok(Redirect::to("/admin"))
}

/// Render the password change page.
///
/// GET /admin/change-password
#[instrument(skip(state, user))]
pub async fn change_password_page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireStaff(user): RequireStaff,
    Query(params): Query<FlashParams>,
) -> Result<ChangePasswordTemplate> {
    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);
    Ok(ChangePasswordTemplate {
        ctx,
        success_message,
        error_message,
    })
}

/// Change the signed-in user's password.
///
/// POST /admin/change-password
#[instrument(skip(state, session, form))]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(user): RequireStaff,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.store());

    let outcome = auth
        .change_password(
            user.id,
            &form.current_password,
            &form.new_password,
            &form.confirm_password,
        )
        .await;

    match outcome {
        Ok(()) => {
            // The session copy still carries the forced-change flag.
            let refreshed = CurrentUser {
                must_change_password: false,
                ..user
            };
            set_current_user(&session, &refreshed).await?;
            Ok(Redirect::to("/admin/dashboard?success=passwordUpdated"))
        }
        Err(AuthError::WrongCurrentPassword) => Ok(Redirect::to(
            "/admin/change-password?error=currentPasswordInvalid",
        )),
        Err(AuthError::WeakPassword(_)) => Ok(Redirect::to(
            "/admin/change-password?error=passwordTooShort",
        )),
        Err(AuthError::PasswordMismatch) => Ok(Redirect::to(
            "/admin/change-password?error=passwordMismatch",
        )),
        Err(error) => {
            tracing::error!("Password change failed: {error}");
            Ok(Redirect::to("/admin/change-password?error=serverError"))
        }
    }
}

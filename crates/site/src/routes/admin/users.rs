//! Staff account management (Administrator only).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use jungle_park_core::{Role, UserId};

use crate::error::Result;
use crate::middleware::{RequireAdmin, VisitorLang};
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;
use crate::store::{StoreError, UserRepository};

/// One staff account row.
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub role_value: String,
    pub role_label: &'static str,
    /// The root account shows no role select and no delete control.
    pub is_root: bool,
}

/// A role the create/update selects offer.
pub struct RoleOption {
    pub value: String,
    pub label: &'static str,
}

/// Staff accounts template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub users: Vec<UserRow>,
    pub roles: Vec<RoleOption>,
}

/// Create form body.
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Role update form body.
#[derive(Debug, Deserialize)]
pub struct SetRoleForm {
    pub role: Role,
}

/// Display the staff accounts screen.
///
/// GET /admin/users
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireAdmin(user): RequireAdmin,
    Query(params): Query<FlashParams>,
) -> Result<UsersTemplate> {
    let users = UserRepository::new(state.store())
        .list()
        .await?
        .iter()
        .map(|u| UserRow {
            id: u.id.to_string(),
            username: u.username.clone(),
            role_value: u.role.to_string(),
            role_label: u.role.label_ru(),
            is_root: u.is_root(),
        })
        .collect();

    let roles = Role::ALL
        .iter()
        .map(|role| RoleOption {
            value: role.to_string(),
            label: role.label_ru(),
        })
        .collect();

    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);

    Ok(UsersTemplate {
        ctx,
        success_message,
        error_message,
        users,
        roles,
    })
}

/// Create a staff account.
///
/// POST /admin/users/create
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Form(form): Form<CreateUserForm>,
) -> Redirect {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Redirect::to("/admin/users?error=missingFields");
    }

    let auth = AuthService::new(state.store());
    match auth.create_user(username, &form.password, form.role).await {
        Ok(_) => Redirect::to("/admin/users?success=userCreated"),
        Err(AuthError::UserAlreadyExists) => Redirect::to("/admin/users?error=userExists"),
        Err(AuthError::WeakPassword(_)) => Redirect::to("/admin/users?error=passwordTooShort"),
        Err(error) => {
            tracing::error!("Failed to create user: {error}");
            Redirect::to("/admin/users?error=serverError")
        }
    }
}

/// Change a staff account's role.
///
/// POST /admin/users/{id}/role
#[instrument(skip(state, form))]
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<SetRoleForm>,
) -> Redirect {
    let Ok(user_id) = id.parse::<UserId>() else {
        return Redirect::to("/admin/users?error=notFound");
    };

    match UserRepository::new(state.store())
        .set_role(user_id, form.role)
        .await
    {
        Ok(()) => Redirect::to("/admin/users?success=userUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/users?error=notFound"),
        Err(StoreError::Conflict(_)) => Redirect::to("/admin/users?error=rootProtected"),
        Err(error) => {
            tracing::error!("Failed to update user role: {error}");
            Redirect::to("/admin/users?error=serverError")
        }
    }
}

/// Delete a staff account.
///
/// POST /admin/users/{id}/delete
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<String>,
) -> Redirect {
    let Ok(user_id) = id.parse::<UserId>() else {
        return Redirect::to("/admin/users?error=notFound");
    };

    match UserRepository::new(state.store()).delete(user_id).await {
        Ok(()) => Redirect::to("/admin/users?success=userDeleted"),
        Err(StoreError::NotFound) => Redirect::to("/admin/users?error=notFound"),
        Err(StoreError::Conflict(_)) => Redirect::to("/admin/users?error=rootProtected"),
        Err(error) => {
            tracing::error!("Failed to delete user: {error}");
            Redirect::to("/admin/users?error=serverError")
        }
    }
}

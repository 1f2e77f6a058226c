//! Program management (Administrator or Cashier).

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use jungle_park_core::{LocalizedText, ProgramId, Tenge};

use crate::error::Result;
use crate::middleware::{RequireProgramStaff, VisitorLang};
use crate::models::Program;
use crate::routes::PageCtx;
use crate::routes::admin::{FlashParams, flash_messages};
use crate::state::AppState;
use crate::store::{ProgramRepository, StoreError};

/// One program row with its pre-filled edit form.
pub struct ProgramRow {
    pub id: String,
    pub title_ru: String,
    pub title_kk: String,
    pub description_ru: String,
    pub description_kk: String,
    pub price: i64,
    pub available: bool,
    /// Comma-joined for the edit input.
    pub costumes: String,
}

impl From<&Program> for ProgramRow {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id.to_string(),
            title_ru: program.title.ru.clone(),
            title_kk: program.title.kk.clone(),
            description_ru: program.description.ru.clone(),
            description_kk: program.description.kk.clone(),
            price: program.price.amount(),
            available: program.available,
            costumes: program.costumes.join(", "),
        }
    }
}

/// Program management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/programs.html")]
pub struct AdminProgramsTemplate {
    pub ctx: PageCtx,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub programs: Vec<ProgramRow>,
}

/// Create/update form body.
#[derive(Debug, Deserialize)]
pub struct ProgramForm {
    pub title_ru: String,
    #[serde(default)]
    pub title_kk: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub description_kk: String,
    pub price: String,
    #[serde(default)]
    pub available: Option<String>,
    /// Comma-separated costume list.
    #[serde(default)]
    pub costumes: String,
}

impl ProgramForm {
    #[allow(clippy::type_complexity)]
    fn parse(&self) -> Option<(LocalizedText, LocalizedText, Tenge, bool, Vec<String>)> {
        let title_ru = self.title_ru.trim();
        if title_ru.is_empty() {
            return None;
        }
        let price: i64 = self.price.trim().parse().ok()?;
        if price < 0 {
            return None;
        }
        let costumes = self
            .costumes
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect();
        Some((
            LocalizedText::new(title_ru, self.title_kk.trim()),
            LocalizedText::new(self.description_ru.trim(), self.description_kk.trim()),
            Tenge::new(price),
            self.available.is_some(),
            costumes,
        ))
    }
}

/// Display the program management screen.
///
/// GET /admin/programs
#[instrument(skip(state, user))]
pub async fn page(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    RequireProgramStaff(user): RequireProgramStaff,
    Query(params): Query<FlashParams>,
) -> Result<AdminProgramsTemplate> {
    let programs = ProgramRepository::new(state.store())
        .list()
        .await?
        .iter()
        .map(ProgramRow::from)
        .collect();

    let ctx = PageCtx::load(&state, lang, Some(user)).await?;
    let (success_message, error_message) = flash_messages(&params, &ctx);

    Ok(AdminProgramsTemplate {
        ctx,
        success_message,
        error_message,
        programs,
    })
}

/// Add a program.
///
/// POST /admin/programs/create
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireProgramStaff(_user): RequireProgramStaff,
    Form(form): Form<ProgramForm>,
) -> Redirect {
    let Some((title, description, price, available, costumes)) = form.parse() else {
        return Redirect::to("/admin/programs?error=missingFields");
    };

    let program = Program {
        id: ProgramId::generate(),
        title,
        description,
        price,
        available,
        costumes,
    };

    match ProgramRepository::new(state.store()).create(program).await {
        Ok(_) => Redirect::to("/admin/programs?success=programUpdated"),
        Err(error) => {
            tracing::error!("Failed to create program: {error}");
            Redirect::to("/admin/programs?error=serverError")
        }
    }
}

/// Replace a program.
///
/// POST /admin/programs/{id}/update
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireProgramStaff(_user): RequireProgramStaff,
    Path(id): Path<String>,
    Form(form): Form<ProgramForm>,
) -> Redirect {
    let Ok(program_id) = id.parse::<ProgramId>() else {
        return Redirect::to("/admin/programs?error=notFound");
    };
    let Some((title, description, price, available, costumes)) = form.parse() else {
        return Redirect::to("/admin/programs?error=missingFields");
    };

    let program = Program {
        id: program_id,
        title,
        description,
        price,
        available,
        costumes,
    };

    match ProgramRepository::new(state.store()).put(program).await {
        Ok(()) => Redirect::to("/admin/programs?success=programUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/programs?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to update program: {error}");
            Redirect::to("/admin/programs?error=serverError")
        }
    }
}

/// Delete a program.
///
/// POST /admin/programs/{id}/delete
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireProgramStaff(_user): RequireProgramStaff,
    Path(id): Path<String>,
) -> Redirect {
    let Ok(program_id) = id.parse::<ProgramId>() else {
        return Redirect::to("/admin/programs?error=notFound");
    };

    match ProgramRepository::new(state.store()).delete(program_id).await {
        Ok(()) => Redirect::to("/admin/programs?success=programUpdated"),
        Err(StoreError::NotFound) => Redirect::to("/admin/programs?error=notFound"),
        Err(error) => {
            tracing::error!("Failed to delete program: {error}");
            Redirect::to("/admin/programs?error=serverError")
        }
    }
}

//! Program listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use jungle_park_core::Lang;

use crate::error::Result;
use crate::middleware::{OptionalStaff, VisitorLang};
use crate::models::Program;
use crate::routes::PageCtx;
use crate::state::AppState;
use crate::store::ProgramRepository;

/// Program display data with its booking form.
pub struct ProgramView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub costumes: Vec<String>,
}

impl ProgramView {
    fn new(program: &Program, lang: Lang) -> Self {
        Self {
            id: program.id.to_string(),
            title: program.title.get(lang).to_owned(),
            description: program.description.get(lang).to_owned(),
            price: program.price.to_string(),
            costumes: program.costumes.clone(),
        }
    }
}

/// Program listing template.
#[derive(Template, WebTemplate)]
#[template(path = "programs.html")]
pub struct ProgramsTemplate {
    pub ctx: PageCtx,
    pub programs: Vec<ProgramView>,
}

/// Display available programs with their booking forms.
///
/// GET /programs
#[instrument(skip(state, user))]
pub async fn programs(
    State(state): State<AppState>,
    VisitorLang(lang): VisitorLang,
    OptionalStaff(user): OptionalStaff,
) -> Result<ProgramsTemplate> {
    let programs = ProgramRepository::new(state.store()).available().await?;

    Ok(ProgramsTemplate {
        ctx: PageCtx::load(&state, lang, user).await?,
        programs: programs
            .iter()
            .map(|p| ProgramView::new(p, lang))
            .collect(),
    })
}

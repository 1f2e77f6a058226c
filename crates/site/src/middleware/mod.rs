//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with in-memory store)
//! 3. Maintenance gate (divert public traffic while the flag is set)

pub mod auth;
pub mod language;
pub mod maintenance;
pub mod session;

pub use auth::{
    OptionalStaff, RequireAdmin, RequireMenuStaff, RequireProgramStaff, RequireStaff,
    clear_current_user, set_current_user,
};
pub use language::VisitorLang;
pub use maintenance::maintenance_gate;
pub use session::create_session_layer;

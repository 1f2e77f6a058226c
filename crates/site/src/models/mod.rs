//! Domain models for the café site.
//!
//! These are the shapes persisted in the JSON documents under `DATA_DIR`
//! plus the session-stored identity. Shared value types (ids, prices,
//! localized text, roles, the cart) live in `jungle-park-core`.

pub mod banner;
pub mod menu_item;
pub mod notification;
pub mod program;
pub mod session;
pub mod settings;
pub mod user;

pub use banner::{Banner, BannerKind};
pub use menu_item::MenuItem;
pub use notification::{NotificationEntry, NotificationKind};
pub use program::Program;
pub use session::CurrentUser;
pub use settings::Settings;
pub use user::{ROOT_USERNAME, User};

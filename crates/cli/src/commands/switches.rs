//! Toggle site-wide switches from the command line.

use tracing::info;

use jungle_park_site::store::SettingsRepository;

use super::open_store;

/// Set the owner authorization flag.
///
/// While the flag is off the site accepts no orders, booking requests,
/// or banner signups; this is the kill switch for the notification
/// pipeline as a whole.
///
/// # Errors
///
/// Returns an error when the settings document cannot be read or written.
pub async fn authorize(enabled: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let store = open_store()?;
    let settings = SettingsRepository::new(&store)
        .set_owner_authorized(enabled)
        .await?;

    info!(
        "Owner authorization is now {}",
        if settings.owner_authorized { "ON" } else { "OFF" }
    );
    Ok(())
}

/// Set the maintenance flag.
///
/// # Errors
///
/// Returns an error when the settings document cannot be read or written.
pub async fn maintenance(enabled: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let store = open_store()?;
    let settings = SettingsRepository::new(&store)
        .set_maintenance(enabled)
        .await?;

    info!(
        "Maintenance mode is now {}",
        if settings.maintenance { "ON" } else { "OFF" }
    );
    Ok(())
}

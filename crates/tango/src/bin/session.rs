//! Shows whether this device has an unlocked admin session, or clears it with `--clear`.

use eyre::Context;
use tango::{
    auth::SESSION_KEY,
    config::Config,
    storage::{FileStorage, LocalStorage},
};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let storage = FileStorage::open(&config.storage_path).wrap_err_with(|| {
        format!(
            "Failed to open local storage at '{}'",
            config.storage_path.display()
        )
    })?;

    if std::env::args().any(|arg| arg == "--clear") {
        storage
            .remove(SESSION_KEY)
            .wrap_err("Failed to clear session")?;
        tracing::info!("Cleared session in {}", storage.path().display());
        return Ok(());
    }

    match storage.get(SESSION_KEY)? {
        Some(marker) => println!("{SESSION_KEY} = {marker}"),
        None => println!("No session"),
    }
    Ok(())
}

//! Prints the digest to store in the auth record for the given admin password.
//! The password is read from the first argument or `TANGO_ADMIN_PASSWORD`.

use eyre::ContextCompat;
use tango::config::Config;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let password = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TANGO_ADMIN_PASSWORD").ok())
        .wrap_err("Missing password, pass it as an argument or set TANGO_ADMIN_PASSWORD")?;
    if password.trim().is_empty() {
        eyre::bail!("The password cannot be empty");
    }

    let config = Config::from_env();
    tracing::info!("Store the digest in the 'digest' field of {}", config.auth_document);
    println!("{}", tango::auth::digest(&password));
    Ok(())
}

//! CLI command implementations.

pub mod demo;
pub mod migrate;
pub mod token;

use secrecy::SecretString;

/// Load the storefront database URL from the environment.
///
/// Checks `STOREFRONT_DATABASE_URL` first, then the generic `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_DATABASE_URL not set".into())
}

//! Bearer token commands.

use chrono::Duration;
use secrecy::SecretString;

use driftline_core::UserId;
use driftline_storefront::services::TokenService;

/// Sign a bearer token for `user_id`, valid for `ttl_hours`.
///
/// Prints the token to stdout so it can be piped straight into a curl
/// invocation.
///
/// # Errors
///
/// Returns an error if the signing secret is missing or signing fails.
pub fn issue(user_id: &str, ttl_hours: i64) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("STOREFRONT_TOKEN_SECRET")
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_TOKEN_SECRET not set")?;

    let token = TokenService::new(&secret)
        .issue_with_ttl(&UserId::new(user_id), Duration::hours(ttl_hours))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }

    Ok(())
}

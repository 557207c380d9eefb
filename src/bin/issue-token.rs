//! Mint an access token for local testing against the API.
//!
//! Usage: issue-token --user-id ID [--role admin|coach|member] [--ttl SECONDS]
//!   Reads JWT_SECRET (and JWT_EXPIRY_SECONDS as the default TTL) from the environment.

use clap::Parser;

use gymdesk_api::config::jwt_expiry_seconds;
use gymdesk_api::models::user::UserRole;
use gymdesk_api::services::auth::issue_access_token;

#[derive(Parser)]
#[command(name = "issue-token", about = "Issue a signed access token for the gymdesk API")]
struct Args {
    /// Subject of the token: coach id for staff, member id for members
    #[arg(long)]
    user_id: String,

    /// One of admin, coach, member
    #[arg(long, default_value = "coach")]
    role: UserRole,

    /// Lifetime in seconds (defaults to JWT_EXPIRY_SECONDS, then 3600)
    #[arg(long)]
    ttl: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("Missing required env var: JWT_SECRET"))?;
    let ttl = match args.ttl {
        Some(ttl) => ttl,
        None => jwt_expiry_seconds()?,
    };

    let token = issue_access_token(&args.user_id, args.role, &secret, ttl)?;
    tracing::info!("Issued {} token for {} (ttl {}s)", args.role, args.user_id, ttl);
    println!("{token}");
    Ok(())
}

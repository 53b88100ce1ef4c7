use anyhow::{bail, Context};
use clap::Args;
use serde_json::json;

use crate::auth::{permissions, sign_hs256, Role, TokenClaims};
use crate::cli::output::output_success;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "Role preset: packager or supervisor")]
    pub role: Option<Role>,

    #[arg(long = "permission", help = "Explicit permission, repeatable")]
    pub permissions: Vec<String>,

    #[arg(long, default_value = "shipping-cli", help = "Token subject")]
    pub subject: String,

    #[arg(long, help = "Lifetime in minutes (defaults to AUTH_TOKEN_TTL_MINUTES)")]
    pub ttl: Option<i64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let auth = &config().auth;
    if auth.algorithm != "HS256" {
        bail!("tokens can only be minted locally when AUTH_ALGORITHM is HS256");
    }

    let mut granted: Vec<&str> = args.role.map(|r| r.permissions().to_vec()).unwrap_or_default();
    for requested in &args.permissions {
        let known = permissions::ALL
            .iter()
            .find(|p| **p == requested.as_str())
            .with_context(|| format!("unknown permission '{}'", requested))?;
        if !granted.contains(known) {
            granted.push(*known);
        }
    }

    let ttl = chrono::Duration::minutes(args.ttl.unwrap_or(auth.token_ttl_minutes));
    let issuer = auth.expected_issuer();
    let claims = TokenClaims::new(args.subject, issuer.as_deref(), &auth.audience, &granted, ttl);
    let token = sign_hs256(&claims, &auth.jwt_secret)?;

    output_success(
        output_format,
        &token,
        json!({ "token": token, "permissions": granted, "expires_at": claims.exp }),
    )
}

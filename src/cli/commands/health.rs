use anyhow::Context;
use serde_json::{json, Value};

use crate::cli::output::output_success;
use crate::cli::OutputFormat;

pub async fn handle(base: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = url::Url::parse(base)
        .and_then(|u| u.join("health"))
        .with_context(|| format!("invalid server URL '{}'", base))?;

    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("failed to reach {}", url))?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        anyhow::bail!("{} answered {}: {}", url, status, body);
    }

    output_success(
        output_format,
        &format!("{} is healthy", base),
        json!({ "url": url.as_str(), "status": status.as_u16(), "body": body }),
    )
}

//! Drive upload and authorization commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use decora_core::credential::CredentialManager;
use decora_infra::auth::{ClientSecret, FileTokenCache, GoogleAuthClient};
use decora_infra::clock::SystemClock;
use decora_types::config::AppConfig;

use crate::state::AppState;

/// Upload a file and print its shareable URL.
pub async fn upload(state: &AppState, path: &Path, mime: Option<&str>, json: bool) -> Result<()> {
    let upload = state
        .upload
        .as_ref()
        .context("Drive client secret is not provisioned (see [drive] in config.toml)")?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let mime_type = mime
        .map(str::to_string)
        .unwrap_or_else(|| guess_mime(&filename).to_string());

    let url = upload.upload(bytes, &filename, &mime_type).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "url": url }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Uploaded {}",
        style("✓").green().bold(),
        style(&filename).bold()
    );
    println!("  {}", style(&url).cyan());
    println!();
    Ok(())
}

/// Ensure a valid Drive credential is cached, refreshing or running the
/// interactive flow as needed.
pub async fn authorize(config: &AppConfig, json: bool) -> Result<()> {
    let secret = ClientSecret::load(Path::new(&config.drive.client_secret_path))
        .await
        .context("load the Drive OAuth client secret")?;

    let manager = CredentialManager::new(
        SystemClock,
        FileTokenCache::new(&config.drive.token_cache_path),
        GoogleAuthClient::new(secret),
    );
    let credential = manager.obtain().await?;

    if json {
        let out = serde_json::json!({
            "token_cache": config.drive.token_cache_path,
            "expiry": credential.expiry.to_rfc3339(),
            "scopes": credential.scopes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Credential cached in {}",
        style("✓").green().bold(),
        style(&config.drive.token_cache_path).bold()
    );
    println!(
        "  Valid until {}",
        style(credential.expiry.to_rfc3339()).dim()
    );
    println!();
    Ok(())
}

/// Map a filename extension to a MIME type; unknown extensions fall back
/// to `application/octet-stream`.
fn guess_mime(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

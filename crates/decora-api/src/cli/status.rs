//! Configuration and credential status command.

use anyhow::Result;
use chrono::Utc;
use console::style;

use decora_core::credential::TokenCache;
use decora_infra::auth::FileTokenCache;
use decora_types::config::AppConfig;
use decora_types::credential::StoredCredential;

/// Display the resolved configuration and the Drive credential state.
pub async fn run(config: &AppConfig, json: bool) -> Result<()> {
    let client_secret_exists = tokio::fs::try_exists(&config.drive.client_secret_path)
        .await
        .unwrap_or(false);
    let cached = FileTokenCache::new(&config.drive.token_cache_path)
        .load()
        .await
        .ok()
        .flatten();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "server": {
                "host": config.server.host,
                "port": config.server.port,
            },
            "gemini": {
                "chat_model": config.gemini.chat_model,
                "image_model": config.gemini.image_model,
                "api_key_set": std::env::var(&config.gemini.api_key_env).is_ok(),
            },
            "diffusion": {
                "base_url": config.diffusion.base_url,
                "steps": config.diffusion.steps,
                "strength": config.diffusion.strength,
                "image_size": config.diffusion.image_size,
            },
            "drive": {
                "client_secret_provisioned": client_secret_exists,
                "credential": credential_state(cached.as_ref()),
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Decora v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Server ──").dim());
    println!(
        "  Listen:   {}:{}",
        config.server.host, config.server.port
    );
    println!();

    println!("  {}", style("── Backends ──").dim());
    println!("  Chat model:  {}", config.gemini.chat_model);
    println!("  Image model: {}", config.gemini.image_model);
    let key_set = std::env::var(&config.gemini.api_key_env).is_ok();
    println!(
        "  API key:     {} ({})",
        if key_set {
            style("set").green()
        } else {
            style("missing").red()
        },
        config.gemini.api_key_env
    );
    println!("  Diffusion:   {}", config.diffusion.base_url);
    println!();

    println!("  {}", style("── Drive ──").dim());
    println!(
        "  Client secret: {}",
        if client_secret_exists {
            style("provisioned").green()
        } else {
            style("missing").red()
        }
    );
    println!(
        "  Credential:    {}",
        match credential_state(cached.as_ref()) {
            "valid" => style("valid").green(),
            "expired" => style("expired").yellow(),
            _ => style("absent").dim(),
        }
    );
    println!();

    Ok(())
}

fn credential_state(credential: Option<&StoredCredential>) -> &'static str {
    match credential {
        Some(credential) if credential.expiry > Utc::now() => "valid",
        Some(_) => "expired",
        None => "absent",
    }
}

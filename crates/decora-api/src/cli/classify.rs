//! Intent classification command.

use anyhow::Result;
use console::style;

use decora_core::intent::classify;
use decora_types::intent::Intent;

/// Classify a message and print the resulting intent.
pub fn run(message: &str, json: bool) -> Result<()> {
    let intent = classify(message);

    if json {
        let out = serde_json::json!({
            "message": message,
            "intent": intent,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let label = match intent {
        Intent::Image => style("image").magenta().bold(),
        Intent::Text => style("text").cyan().bold(),
    };
    println!("  {label}");
    Ok(())
}

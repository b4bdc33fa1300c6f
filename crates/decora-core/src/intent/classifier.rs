//! Heuristic text/image intent classifier.
//!
//! An explicit ordered list of case-insensitive regex rules, each mapping to
//! [`Intent::Image`]. Any rule matching classifies the message as an image
//! request; no rule matching leaves it a text question. There are no negative
//! rules: a message like "I don't want a picture of this" still classifies
//! as an image request.

use std::sync::LazyLock;

use regex::Regex;

use decora_types::intent::Intent;

/// One classification rule: a compiled pattern and the intent it produces.
struct Rule {
    pattern: Regex,
    intent: Intent,
}

/// Ordered rule table, compiled once on first use.
///
/// Verb-object rules first (a generation verb followed by an optional
/// article and an image noun), then the bare "visualize" token, then the
/// "<noun> of" fallback that catches phrasings like "a picture of my
/// living room".
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    const IMAGE_RULES: &[&str] = &[
        r"show (me )?(an?|the)? ?(image|picture|photo|render|drawing)",
        r"generate (an?|the)? ?(image|picture|photo|render|drawing)",
        r"draw (an?|the)? ?(image|picture|photo|render|drawing)",
        r"create (an?|the)? ?(image|picture|photo|render|drawing)",
        r"visualize",
        r"(picture|image|photo|drawing) of",
    ];

    IMAGE_RULES
        .iter()
        .map(|p| Rule {
            pattern: Regex::new(&format!("(?i){p}"))
                .expect("classifier rule patterns are static and must compile"),
            intent: Intent::Image,
        })
        .collect()
});

/// Classify a free-text message as a text question or an image request.
///
/// Total and pure: never fails, and the same input always yields the same
/// output. The empty string classifies as [`Intent::Text`].
pub fn classify(message: &str) -> Intent {
    for rule in RULES.iter() {
        if rule.pattern.is_match(message) {
            return rule.intent;
        }
    }
    Intent::Text
}

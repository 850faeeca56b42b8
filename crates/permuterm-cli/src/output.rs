//! Text and JSON rendering for CLI results.

use anyhow::Result;
use colored::Colorize;
use permuterm_core::{permute, KeySelectivity, QueryKeys, SearchKey};
use serde_json::{json, Value};

use crate::OutputFormat;

/// Rotation keys of `word`, one per line (`$` marks the sentinel).
pub fn render_permute(word: &str, format: OutputFormat) -> Result<String> {
    let rotations = permute(word);
    match format {
        OutputFormat::Text => Ok(rotations.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "word": word,
            "rotations": rotations,
        }))?),
    }
}

/// Search keys of a pattern with their mode and selectivity.
pub fn render_keys(
    pattern: &str,
    strategy: &str,
    query: &QueryKeys,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut lines = vec![format!(
                "{} {:?} ({} keys, pruning: {strategy})",
                "pattern".bold(),
                pattern,
                query.len()
            )];
            for (i, key) in query.iter().enumerate() {
                let mode = if key.partial_match {
                    "partial".cyan()
                } else {
                    "exact".green()
                };
                lines.push(format!(
                    "{i:>3}  {:<24} {mode:<8} {:?}",
                    key.key.to_string(),
                    KeySelectivity::classify(key)
                ));
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "pattern": pattern,
            "pruning": strategy,
            "keys": query.iter().map(key_json).collect::<Vec<_>>(),
        }))?),
    }
}

/// Candidate words of a `match` run.
pub fn render_match(pattern: &str, candidates: &[&str], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text if candidates.is_empty() => Ok("no candidates".dimmed().to_string()),
        OutputFormat::Text => Ok(candidates.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "pattern": pattern,
            "candidates": candidates,
        }))?),
    }
}

fn key_json(key: &SearchKey) -> Value {
    json!({
        "key": key.key.to_string(),
        "encoded": hex(&key.key.encode()),
        "flags": key.key.flags().to_string(),
        "partial_match": key.partial_match,
        "selectivity": format!("{:?}", KeySelectivity::classify(key)),
    })
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

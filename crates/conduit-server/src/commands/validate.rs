use std::path::Path;

use anyhow::{Context, bail};
use conduit_schema::{CandidateRevision, SchemaError, SchemaRegistry};

/// Handle `conduit validate`. Prints the normalized record, or every field
/// issue followed by a non-zero exit.
pub fn handle(shape: &str, file: &Path, revision: Option<&str>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let registry = SchemaRegistry::new()?;
    let result = match revision {
        Some(name) => {
            let revision: CandidateRevision = name.parse()?;
            registry.validate_revision(shape, revision, &raw)
        }
        None => registry.validate_detected(shape, &raw),
    };

    match result {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record.to_value()?)?);
            Ok(())
        }
        Err(SchemaError::Invalid(invalid)) => {
            for issue in &invalid.issues {
                eprintln!("  {issue}");
            }
            bail!("{} is not a valid {shape} ({} issues)", file.display(), invalid.issues.len())
        }
        Err(other) => Err(other.into()),
    }
}

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use reel_model::Entry;

/// Sequential pool with tickets `1..=count`.
pub fn generate(count: usize) -> Vec<Entry> {
    (1..=count)
        .map(|i| {
            Entry::new(i.to_string(), format!("Entrant{i}"), format!("No{i}"))
        })
        .collect()
}

/// Read a JSON array of entries (`ticketId`, `displayFirst`, `displayLast`).
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read pool {}", path.display()))?;
    let entries: Vec<Entry> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid pool file {}", path.display()))?;
    Ok(entries)
}

pub fn resolve(
    entries: Option<usize>,
    pool: Option<&Path>,
) -> Result<Vec<Entry>> {
    match (entries, pool) {
        (_, Some(path)) => load(path),
        (Some(count), None) => Ok(generate(count)),
        (None, None) => bail!("either --entries or --pool is required"),
    }
}

use analytics::merge_reports;
use anyhow::{Context, Result};
use core_types::{CostRegistry, TransactionRow};
use std::fs;
use std::path::Path;

/// Reads one or more JSON row files (arrays of settlement rows) and concatenates
/// them in the order given.
pub fn load_rows(paths: &[impl AsRef<Path>]) -> Result<Vec<TransactionRow>> {
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report rows from {}", path.display()))?;
        let rows: Vec<TransactionRow> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse report rows in {}", path.display()))?;
        tracing::info!(file = %path.display(), rows = rows.len(), "Loaded report.");
        reports.push(rows);
    }
    Ok(merge_reports(reports.iter().map(Vec::as_slice)))
}

/// Reads the cost registry. A missing file is an empty registry.
pub fn load_registry(path: Option<&Path>) -> Result<CostRegistry> {
    let Some(path) = path else {
        return Ok(CostRegistry::default());
    };
    if !path.exists() {
        tracing::warn!(file = %path.display(), "Cost registry not found, every SKU costs 0.");
        return Ok(CostRegistry::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cost registry from {}", path.display()))?;
    let registry: CostRegistry = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse cost registry in {}", path.display()))?;
    Ok(registry)
}

pub fn write_registry(path: &Path, registry: &CostRegistry) -> Result<()> {
    let json = serde_json::to_string_pretty(registry)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write cost registry to {}", path.display()))?;
    tracing::info!(file = %path.display(), items = registry.len(), "Cost registry saved.");
    Ok(())
}

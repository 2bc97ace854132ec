use anyhow::{Context, Result};
use std::path::Path;

/// Resolve a ranking argument: `@path` reads the file, anything else is
/// taken as inline JSON.
pub fn read_ranking_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read ranking file {}", path)),
        None => Ok(arg.to_string()),
    }
}

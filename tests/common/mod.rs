/*!
 * Common test utilities for the sptcheck test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use sptcheck::app_config::Config;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a bilingual script file from (anchor id, original, translated)
/// triples, one ○/● pair per triple.
pub fn script_content(pairs: &[(&str, &str, &str)]) -> String {
    let mut lines = Vec::new();
    for (id, original, translated) in pairs {
        lines.push(format!("○{}○ {}", id, original));
        lines.push(format!("●{}● {}", id, translated));
    }
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Builds a blueprint file holding only the ○ lines of the given pairs.
pub fn blueprint_content(pairs: &[(&str, &str)]) -> String {
    let mut content = pairs
        .iter()
        .map(|(id, original)| format!("○{}○ {}", id, original))
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');
    content
}

/// Config pointing at spt/, blueprint/ and result/ under one temp root.
/// The spt and blueprint directories are created, result is left to the
/// check run.
pub fn workspace_config(root: &Path) -> Result<Config> {
    let mut config = Config::default();
    config.spt_dir = root.join("spt").to_string_lossy().to_string();
    config.blueprint_dir = root.join("blueprint").to_string_lossy().to_string();
    config.result_dir = root.join("result").to_string_lossy().to_string();
    fs::create_dir_all(&config.spt_dir)?;
    fs::create_dir_all(&config.blueprint_dir)?;
    Ok(config)
}

/*!
 * ID-anchored patch application with crash-tolerant rewriting.
 *
 * Each patch entry is resolved to a line in the live target file through
 * its `(anchor ID, role)` key; only lines whose content actually differs
 * are rewritten. A staged rewrite runs as backup-write-delete: the target
 * is copied to `<target>.bak`, the full line list is written, and the
 * backup is deleted only once the write succeeded. A crash mid-write
 * therefore always leaves a recoverable `.bak` next to the target.
 *
 * A `.bak` already present when staging starts is treated as evidence of
 * an unresolved earlier crash: it is never overwritten, so it stays the
 * recovery point if this write fails too.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::file_utils::FileManager;
use crate::patch::document::{PatchDocument, PATCH_FILE_PREFIX};
use crate::spt_line::{self, SPT_FILE_SUFFIX};

/// Outcome of applying one patch document
#[derive(Debug, Clone, Default)]
pub struct PatchOutcome {
    /// Entries whose target line was rewritten
    pub updated: usize,

    /// Entries whose `(anchor ID, role)` key had no match in the target
    pub missing: usize,

    /// Anchor IDs of the unmatched entries
    pub missing_ids: Vec<String>,
}

/// Applies patch documents back onto working files
pub struct PatchApplier;

impl PatchApplier {
    /// Discover and parse all patch documents under the result directory.
    ///
    /// Documents without applicable entries (clean or warn-only) are
    /// dropped. Returns an empty list when the directory does not exist.
    pub fn load_patch_documents(result_dir: &Path) -> Result<Vec<PatchDocument>> {
        if !result_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut patch_paths: Vec<PathBuf> = fs::read_dir(result_dir)
            .with_context(|| format!("Failed to read result directory: {:?}", result_dir))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|name| {
                            name.starts_with(PATCH_FILE_PREFIX) && name.ends_with(SPT_FILE_SUFFIX)
                        })
            })
            .collect();
        patch_paths.sort();

        let mut documents = Vec::new();
        for path in patch_paths {
            let lines = FileManager::read_lines(&path)?;
            let document = PatchDocument::parse(&path, &lines)?;
            if !document.entries.is_empty() {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    /// Apply one patch document onto its target under `spt_dir`.
    ///
    /// A missing target file counts every entry as unmatched without
    /// touching anything. Duplicate anchor keys in the target resolve to
    /// the first occurrence (known limitation, kept as documented
    /// behavior).
    pub fn apply(document: &PatchDocument, spt_dir: &Path) -> Result<PatchOutcome> {
        let target = spt_dir.join(&document.relative_path);
        if !target.is_file() {
            warn!("Target file not found, skip: {:?}", target);
            let missing_ids: Vec<String> =
                document.entries.iter().map(|e| e.id.clone()).collect();
            return Ok(PatchOutcome {
                updated: 0,
                missing: missing_ids.len(),
                missing_ids,
            });
        }

        let mut lines = FileManager::read_lines(&target)?;

        // (anchor ID, role) -> line number, first occurrence wins
        let mut index_by_key: HashMap<String, usize> = HashMap::new();
        for (index, line) in lines.iter().enumerate() {
            if let Some(id) = spt_line::extract_anchor_id(line) {
                let key = entry_key(id, spt_line::is_translate_line(line));
                index_by_key.entry(key).or_insert(index);
            }
        }

        let mut outcome = PatchOutcome::default();
        let mut changed = false;

        for entry in &document.entries {
            let key = entry_key(&entry.id, entry.translate_line);
            let Some(&index) = index_by_key.get(&key) else {
                outcome.missing += 1;
                outcome.missing_ids.push(entry.id.clone());
                continue;
            };
            if lines[index] == entry.line {
                continue; // already applied, no-op
            }
            lines[index] = entry.line.clone();
            outcome.updated += 1;
            changed = true;
        }

        if changed {
            Self::rewrite_with_backup(&target, &lines)?;
        }

        Ok(outcome)
    }

    /// Rewrite `target` with `lines` under the backup-write-delete sequence.
    fn rewrite_with_backup(target: &Path, lines: &[String]) -> Result<()> {
        let backup = FileManager::backup_path(target);
        if backup.exists() {
            warn!(
                "Existing backup found, keeping it as the recovery point: {:?}",
                backup
            );
        } else {
            fs::copy(target, &backup)
                .with_context(|| format!("Failed to back up {:?} to {:?}", target, backup))?;
        }

        match FileManager::write_lines(target, lines) {
            Ok(()) => {
                fs::remove_file(&backup)
                    .with_context(|| format!("Failed to remove backup: {:?}", backup))?;
                debug!("Rewrote {:?} and removed its backup", target);
                Ok(())
            }
            Err(error) => {
                // put the last known-good content back before propagating
                if backup.exists() {
                    if let Err(restore_error) = fs::rename(&backup, target) {
                        warn!(
                            "Failed to restore {:?} from {:?} after a write error: {}",
                            target, backup, restore_error
                        );
                    }
                }
                Err(error)
            }
        }
    }

    /// Restore a target from its `.bak` file, if one exists.
    ///
    /// Returns `true` when a backup was restored. Deciding whether to
    /// restore or discard belongs to the caller; this only executes the
    /// restore.
    pub fn restore_backup(target: &Path) -> Result<bool> {
        let backup = FileManager::backup_path(target);
        if !backup.is_file() {
            return Ok(false);
        }
        fs::rename(&backup, target)
            .with_context(|| format!("Failed to restore {:?} from {:?}", target, backup))?;
        Ok(true)
    }
}

/// Lookup key joining an anchor ID and a role
fn entry_key(id: &str, translate_line: bool) -> String {
    format!("{}|{}", id, if translate_line { "T" } else { "O" })
}

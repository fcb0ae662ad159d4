/*!
 * Patch document model, grammar and file-name codec.
 *
 * One patch document per source file, stored under the result directory.
 * The file name encodes the target's relative path so patches can be
 * discovered without a manifest; the `# FILE:` header remains the
 * authoritative pointer with the name as fallback.
 *
 * Grammar:
 * ```text
 * # FILE: <relative path>
 * # STATUS: CLEAN                 (clean files only)
 * # ID: <anchor id>               (one block per violation)
 * # ERR: <message>                (one or more)
 * <corrected-or-original line>
 *                                 (blank separator)
 * # WARN: ... / # RAW: <raw line> (anchorless violations, skipped on apply)
 * ```
 */

use std::path::{Path, PathBuf};

use crate::errors::PatchError;
use crate::spt_line::{self, extract_anchor_id, SPT_FILE_SUFFIX};

/// Directory receiving patch documents and the aggregate report
pub const RESULT_DIRECTORY: &str = "result";

/// Aggregate report file name
pub const REPORT_FILE_NAME: &str = "report.all.txt";

/// Patch file name prefix
pub const PATCH_FILE_PREFIX: &str = "patch.";

/// Stand-in for `/` inside encoded patch file names
pub const PATCH_PATH_SEPARATOR: &str = "___";

/// `# FILE:` header prefix
pub const FILE_PREFIX: &str = "# FILE:";

/// `# ID:` block prefix
pub const ID_PREFIX: &str = "# ID:";

/// `# ERR:` message prefix
pub const ERR_PREFIX: &str = "# ERR:";

/// `# WARN:` prefix for anchorless violations
pub const WARN_PREFIX: &str = "# WARN:";

/// `# RAW:` prefix carrying the anchorless raw line
pub const RAW_PREFIX: &str = "# RAW:";

/// Marker line for a clean file
pub const STATUS_CLEAN: &str = "# STATUS: CLEAN";

/// One applicable entry of a patch document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    /// Anchor ID resolving the target line
    pub id: String,

    /// Role of the target line, translated (●) or original (○)
    pub translate_line: bool,

    /// Replacement line, the original raw line unless an auto-fix fired
    pub line: String,

    /// Messages explaining why the line was flagged
    pub messages: Vec<String>,
}

/// A parsed patch document
#[derive(Debug, Clone)]
pub struct PatchDocument {
    /// Relative path of the target file under the working directory
    pub relative_path: String,

    /// Applicable entries in document order
    pub entries: Vec<PatchEntry>,

    /// Path of the patch file itself
    pub patch_path: PathBuf,
}

impl PatchDocument {
    /// Parse a patch document from its lines.
    ///
    /// The target path comes from the `# FILE:` header, falling back to the
    /// encoded patch file name. Anchorless blocks are skipped; a payload
    /// line without a preceding `# ID:` still becomes an entry when its own
    /// anchor can be extracted.
    pub fn parse(patch_path: &Path, lines: &[String]) -> Result<PatchDocument, PatchError> {
        let file_name = patch_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let relative_path = lines
            .iter()
            .find(|line| line.starts_with(FILE_PREFIX))
            .map(|line| line[FILE_PREFIX.len()..].trim().to_string())
            .or_else(|| infer_relative_path(&file_name))
            .filter(|path| !path.is_empty())
            .ok_or_else(|| PatchError::UnresolvedTarget(patch_path.display().to_string()))?;

        let mut entries = Vec::new();
        let mut current_id: Option<String> = None;
        let mut current_messages: Vec<String> = Vec::new();

        for line in lines {
            if let Some(rest) = line.strip_prefix(ID_PREFIX) {
                current_id = Some(rest.trim().to_string());
                current_messages = Vec::new();
            } else if let Some(rest) = line.strip_prefix(ERR_PREFIX) {
                if current_id.is_some() {
                    current_messages.push(rest.trim().to_string());
                }
            } else if line.starts_with('#') {
                // other comments, including # WARN: / # RAW: blocks
            } else if !line.trim().is_empty() {
                let id = current_id
                    .take()
                    .filter(|id| !id.is_empty())
                    .or_else(|| extract_anchor_id(line).map(str::to_string));
                if let Some(id) = id {
                    if !id.trim().is_empty() {
                        entries.push(PatchEntry {
                            id,
                            translate_line: spt_line::is_translate_line(line),
                            line: line.clone(),
                            messages: std::mem::take(&mut current_messages),
                        });
                    }
                }
                current_id = None;
                current_messages = Vec::new();
            }
        }

        Ok(PatchDocument {
            relative_path,
            entries,
            patch_path: patch_path.to_path_buf(),
        })
    }
}

/// Encode a target's relative path into its patch file name.
///
/// `scenario/day1.spt.txt` becomes `patch.scenario___day1.spt.txt`.
pub fn patch_file_name(relative_path: &str) -> String {
    let normalized = relative_path.replace('\\', "/");
    let base = normalized
        .strip_suffix(SPT_FILE_SUFFIX)
        .unwrap_or(&normalized);
    format!(
        "{}{}{}",
        PATCH_FILE_PREFIX,
        base.replace('/', PATCH_PATH_SEPARATOR),
        SPT_FILE_SUFFIX
    )
}

/// Decode a patch file name back into the target's relative path.
pub fn infer_relative_path(file_name: &str) -> Option<String> {
    let core = file_name
        .strip_prefix(PATCH_FILE_PREFIX)?
        .strip_suffix(SPT_FILE_SUFFIX)?;
    Some(format!(
        "{}{}",
        core.replace(PATCH_PATH_SEPARATOR, "/"),
        SPT_FILE_SUFFIX
    ))
}

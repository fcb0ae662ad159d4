/*!
 * Patch document serialization.
 *
 * Turns the violations of one checked file into a human-reviewable patch
 * document under the result directory. The payload line of every block
 * defaults to the raw offending line; when the forbidden `！？` rule
 * fired, the auto-fixed rewrite is emitted instead. Violations without a
 * usable anchor ID become warn-only blocks that the applier skips.
 */

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use crate::file_utils::FileManager;
use crate::patch::document::{
    patch_file_name, ERR_PREFIX, FILE_PREFIX, ID_PREFIX, RAW_PREFIX, STATUS_CLEAN, WARN_PREFIX,
};
use crate::patch::rewrite::rewrite_bang_question;
use crate::validation::{Violation, MSG_BANG_BEFORE_QUESTION};

/// Outcome of checking one source file
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Relative path of the checked file under the working directory
    pub relative_path: String,

    /// Rendered report section for the aggregate report
    pub report: String,

    /// Violations in file order
    pub violations: Vec<Violation>,
}

/// Serializer for per-file patch documents
pub struct PatchWriter;

impl PatchWriter {
    /// Render a check result into patch-document text.
    pub fn render(result: &CheckResult) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {}\n", FILE_PREFIX, result.relative_path));

        if result.violations.is_empty() {
            out.push_str(STATUS_CLEAN);
            out.push('\n');
            return out;
        }

        for violation in &result.violations {
            if !violation.has_id() {
                out.push_str(&format!(
                    "{} no usable anchor ID, cannot emit a patch entry\n",
                    WARN_PREFIX
                ));
                out.push_str(&format!("{} {}\n\n", RAW_PREFIX, violation.raw_line));
                continue;
            }

            // default payload is the raw line, replaced if an auto-fix fires
            let mut line_out = violation.raw_line.clone();

            out.push_str(&format!(
                "{} {}\n",
                ID_PREFIX,
                violation.id.as_deref().unwrap_or_default()
            ));
            for message in &violation.messages {
                out.push_str(&format!("{} {}\n", ERR_PREFIX, message));

                if message.contains(MSG_BANG_BEFORE_QUESTION) {
                    let fixed = rewrite_bang_question(&line_out);
                    if fixed != line_out {
                        debug!("auto-fixed ！？ ordering for {:?}", violation.id);
                        line_out = fixed;
                    }
                }
            }

            out.push_str(&line_out);
            out.push_str("\n\n");
        }

        out
    }

    /// Write the patch document for one check result into `result_dir`.
    pub fn write_patch_file(result: &CheckResult, result_dir: &Path) -> Result<PathBuf> {
        let path = result_dir.join(patch_file_name(&result.relative_path));
        FileManager::write_to_file(&path, &Self::render(result))?;
        Ok(path)
    }
}

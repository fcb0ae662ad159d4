use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::blueprint::BlueprintDiffer;
use crate::file_utils::FileManager;
use crate::patch::{CheckResult, PatchApplier, PatchWriter, REPORT_FILE_NAME};
use crate::spt_line::{self, SptLine};
use crate::validation::{RuleToggles, ValidationPipeline, Violation};

// @module: Application controller for script checking and patching

/// Banner separating per-file sections in the aggregate report
const REPORT_SECTION_BANNER: &str = "====================================";

/// File receiving the duplicate-sentence statistics
const DUPLICATE_SENTENCES_FILE_NAME: &str = "duplicate.sentences.txt";

/// Summary of one check run
#[derive(Debug, Clone)]
pub struct CheckSummary {
    /// Number of script files checked
    pub files_checked: usize,

    /// Number of files with at least one violation
    pub files_with_violations: usize,

    /// Total violations across all files
    pub violations: usize,

    /// Path of the aggregate report
    pub report_path: PathBuf,
}

/// Summary of one apply run
#[derive(Debug, Clone, Default)]
pub struct ApplySummary {
    /// Patch documents with applicable entries
    pub documents: usize,

    /// Lines rewritten across all targets
    pub updated: usize,

    /// Entries whose anchor key had no match
    pub missing: usize,

    /// Anchor IDs of the unmatched entries
    pub missing_ids: Vec<String>,
}

/// Main application controller for script validation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full check workflow: validate every script file, write one
    /// patch document per file and the aggregate report.
    pub fn run_check(&self) -> Result<CheckSummary> {
        if !FileManager::dir_exists(&self.config.spt_dir) {
            return Err(anyhow!(
                "script directory not found: {}",
                self.config.spt_dir
            ));
        }

        let spt_files = FileManager::find_spt_files(&self.config.spt_dir)?;
        let blueprint_files = if FileManager::dir_exists(&self.config.blueprint_dir) {
            FileManager::find_spt_files(&self.config.blueprint_dir)?
        } else {
            warn!(
                "Blueprint directory not found: {}",
                self.config.blueprint_dir
            );
            Default::default()
        };

        let result_dir = Path::new(&self.config.result_dir);
        FileManager::ensure_dir(result_dir)?;

        let toggles = self.config.validation.toggles();

        let progress = ProgressBar::new(spt_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(template_result);

        let mut reports = Vec::new();
        let mut files_with_violations = 0usize;
        let mut total_violations = 0usize;

        for (relative_path, path) in &spt_files {
            progress.set_message(relative_path.clone());

            let result = self.check_file(
                relative_path,
                path,
                blueprint_files.get(relative_path).map(PathBuf::as_path),
                &toggles,
            )?;

            if !result.violations.is_empty() {
                files_with_violations += 1;
                total_violations += result.violations.len();
            }

            PatchWriter::write_patch_file(&result, result_dir)?;
            reports.push(result.report);
            progress.inc(1);
        }
        progress.finish_and_clear();

        let report_path = result_dir.join(REPORT_FILE_NAME);
        FileManager::write_to_file(&report_path, &reports.join("\n\n"))?;

        info!(
            "Check completed: {} files, {} with violations ({} total), report at {:?}",
            spt_files.len(),
            files_with_violations,
            total_violations,
            report_path
        );

        Ok(CheckSummary {
            files_checked: spt_files.len(),
            files_with_violations,
            violations: total_violations,
            report_path,
        })
    }

    /// Check one script file against its blueprint and the rule set.
    fn check_file(
        &self,
        relative_path: &str,
        path: &Path,
        blueprint_path: Option<&Path>,
        toggles: &RuleToggles,
    ) -> Result<CheckResult> {
        let all_lines = FileManager::read_lines(path)?;

        let mut original_lines = Vec::new();
        let mut translate_lines = Vec::new();
        for line in all_lines {
            if spt_line::is_original_line(&line) {
                original_lines.push(line);
            } else if spt_line::is_translate_line(&line) {
                translate_lines.push(line);
            }
        }

        let mut report_lines = vec![
            String::new(),
            REPORT_SECTION_BANNER.to_string(),
            relative_path.to_string(),
            REPORT_SECTION_BANNER.to_string(),
        ];
        let mut violations = Vec::new();

        let blueprint_violations = match blueprint_path {
            None => vec![Violation::for_file(vec![
                "blueprint file not found".to_string()
            ])],
            Some(blueprint_path) => {
                let blueprint_lines: Vec<String> = FileManager::read_lines(blueprint_path)?
                    .into_iter()
                    .filter(|line| spt_line::is_original_line(line))
                    .collect();
                BlueprintDiffer::diff(&original_lines, &blueprint_lines)
            }
        };
        if !blueprint_violations.is_empty() {
            report_lines.push("original column differs from blueprint".to_string());
            for violation in blueprint_violations {
                report_lines.extend(violation.messages.iter().cloned());
                report_lines.push(String::new());
                violations.push(violation);
            }
        }

        let pair_count = translate_lines.len().min(original_lines.len());
        for index in 0..pair_count {
            let translate_line = &translate_lines[index];
            let original_line = &original_lines[index];
            if let Some(violation) = ValidationPipeline::evaluate_translate_line(
                translate_line,
                original_line,
                index,
                toggles,
            ) {
                report_lines.push(translate_line.clone());
                report_lines.extend(violation.messages.iter().cloned());
                report_lines.push(String::new());
                violations.push(violation);
            }
        }

        if translate_lines.len() != original_lines.len() {
            report_lines.push(format!(
                "line count mismatch: {} translated, {} original",
                translate_lines.len(),
                original_lines.len()
            ));
        }

        debug!(
            "Checked {}: {} violations",
            relative_path,
            violations.len()
        );

        Ok(CheckResult {
            relative_path: relative_path.to_string(),
            report: report_lines.join("\n"),
            violations,
        })
    }

    /// Apply every patch document under the result directory back onto the
    /// working files.
    pub fn run_apply(&self) -> Result<ApplySummary> {
        let documents = PatchApplier::load_patch_documents(Path::new(&self.config.result_dir))?;
        if documents.is_empty() {
            info!("No patch files found. Run check first.");
            return Ok(ApplySummary::default());
        }

        let spt_dir = Path::new(&self.config.spt_dir);
        let mut summary = ApplySummary {
            documents: documents.len(),
            ..ApplySummary::default()
        };

        for document in &documents {
            let outcome = PatchApplier::apply(document, spt_dir)?;
            summary.updated += outcome.updated;
            summary.missing += outcome.missing;
            summary.missing_ids.extend(outcome.missing_ids);
        }

        info!(
            "Patch completed: updated {} entries, {} unmatched",
            summary.updated, summary.missing
        );
        if !summary.missing_ids.is_empty() {
            let mut distinct = summary.missing_ids.clone();
            distinct.sort();
            distinct.dedup();
            info!("Missing IDs:");
            for id in distinct {
                info!(" - {}", id);
            }
        }

        Ok(summary)
    }

    /// Restore every interrupted write under the script directory from its
    /// `.bak` file. Returns the number of restored targets.
    pub fn run_restore(&self) -> Result<usize> {
        if !FileManager::dir_exists(&self.config.spt_dir) {
            return Err(anyhow!(
                "script directory not found: {}",
                self.config.spt_dir
            ));
        }

        // snapshot first, restoring renames files inside the walked tree
        let mut targets = Vec::new();
        for entry in WalkDir::new(&self.config.spt_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // strip one .bak only, a .bak of a .bak restores one level
            let Some(stem) = name.strip_suffix(".bak") else {
                continue;
            };
            targets.push(path.with_file_name(stem));
        }
        targets.sort();

        let mut restored = 0usize;
        for target in targets {
            if PatchApplier::restore_backup(&target)? {
                info!("Restored {:?} from its backup", target);
                restored += 1;
            }
        }

        if restored == 0 {
            info!("No backups found, nothing to restore");
        }
        Ok(restored)
    }

    /// Count duplicated original-text segments across all script files and
    /// write the `count\tsentence` table into the result directory.
    pub fn run_stats(&self) -> Result<PathBuf> {
        let spt_files = FileManager::find_spt_files(&self.config.spt_dir)?;

        let mut sentence_counts: HashMap<String, usize> = HashMap::new();
        for path in spt_files.values() {
            for line in FileManager::read_lines(path)? {
                if !spt_line::is_original_line(&line) {
                    continue;
                }
                let Ok(parsed) = SptLine::parse(&line) else {
                    continue; // malformed lines belong to the check report
                };
                for segment in parsed.segments {
                    *sentence_counts.entry(segment).or_insert(0) += 1;
                }
            }
        }

        let mut rows: Vec<(usize, String)> = sentence_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(sentence, count)| (count, sentence))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let lines: Vec<String> = rows
            .into_iter()
            .map(|(count, sentence)| format!("{}\t{}", count, sentence))
            .collect();

        let out_path = Path::new(&self.config.result_dir).join(DUPLICATE_SENTENCES_FILE_NAME);
        FileManager::write_lines(&out_path, &lines)?;
        info!("Duplicate sentences written to {:?}", out_path);
        Ok(out_path)
    }
}

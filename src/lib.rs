/*!
 * # sptcheck - bilingual script checker and patcher
 *
 * A Rust library for validating bilingual SPT script files, reporting
 * rule violations as reviewable patch documents and applying the
 * corrected patches back onto the working files.
 *
 * ## Features
 *
 * - Parse SPT lines (marker, anchor ID, segmented body)
 * - Structural checks: markers, headers, segment length, dialogue brackets
 * - Symbol checks: forbidden glyphs, quote pairing, spacing, trailing punctuation
 * - Blueprint comparison of the original column
 * - Patch documents with one auto-fix (fullwidth ！？ reordering)
 * - Crash-safe write-back through `.bak` files
 * - Duplicate-sentence statistics over the original column
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `spt_line`: SPT line model, markers and segment splitting
 * - `validation`: Rule checking:
 *   - `validation::structural`: Line shape and length rules
 *   - `validation::symbol`: Character-level text rules
 *   - `validation::pipeline`: Per-line orchestration
 * - `blueprint`: Original-column comparison against the blueprint copy
 * - `patch`: Patch documents, rendering and application:
 *   - `patch::document`: Patch grammar and the file-name codec
 *   - `patch::rewrite`: The ！？ reorder auto-fix
 *   - `patch::writer`: Patch rendering per checked file
 *   - `patch::applier`: ID-anchored write-back with `.bak` safety
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod blueprint;
pub mod errors;
pub mod file_utils;
pub mod patch;
pub mod spt_line;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{ApplySummary, CheckSummary, Controller};
pub use blueprint::BlueprintDiffer;
pub use errors::{AppError, PatchError, SptParseError};
pub use patch::{PatchApplier, PatchDocument, PatchWriter};
pub use spt_line::{LineClassification, LineRole, SptLine};
pub use validation::{RuleToggles, ValidationPipeline, Violation};

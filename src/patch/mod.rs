/*!
 * Patch pipeline: serialize violations, apply reviewed patches.
 *
 * # Architecture
 *
 * - `document`: patch grammar, entry model and the file-name codec
 * - `rewrite`: the single auto-fix (fullwidth ！？ reordering)
 * - `writer`: renders one patch document per checked file
 * - `applier`: ID-anchored write-back with `.bak` crash safety
 */

pub mod applier;
pub mod document;
pub mod rewrite;
pub mod writer;

// Re-export main types
pub use applier::{PatchApplier, PatchOutcome};
pub use document::{PatchDocument, PatchEntry, REPORT_FILE_NAME, RESULT_DIRECTORY};
pub use writer::{CheckResult, PatchWriter};

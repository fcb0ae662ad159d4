/*!
 * Unified entry point of the validation pipeline.
 *
 * Runs the structural pass, then the symbol pass, over one
 * translated/original line pair and merges their messages into a single
 * [`Violation`] keyed by the translated line's anchor ID. Either pass can
 * be switched off through [`RuleToggles`].
 */

use crate::spt_line::extract_anchor_id;
use crate::validation::rules::RuleToggles;
use crate::validation::structural::StructuralValidator;
use crate::validation::symbol::SymbolValidator;
use crate::validation::violation::Violation;

/// Pipeline over the two validator passes
pub struct ValidationPipeline;

impl ValidationPipeline {
    /// Evaluate one translated line against its paired original.
    ///
    /// Returns `None` when both passes are clean. A violation whose anchor
    /// cannot be extracted is still returned, just without an ID.
    pub fn evaluate_translate_line(
        line: &str,
        original_line: &str,
        line_index: usize,
        toggles: &RuleToggles,
    ) -> Option<Violation> {
        let mut messages = Vec::new();
        if toggles.structural {
            messages.extend(StructuralValidator::check(line, original_line));
        }
        if toggles.symbol {
            messages.extend(SymbolValidator::check(line, toggles));
        }
        if messages.is_empty() {
            return None;
        }

        let id = extract_anchor_id(line).map(str::to_string);
        Some(Violation::for_line(id, true, line, line_index, messages))
    }
}

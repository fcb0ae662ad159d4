/*!
 * Validation module for SPT script quality assurance.
 *
 * This module provides the rule-based validator over translated/original
 * line pairs:
 * - Structural validation (markers, headers, segment lengths, dialogue shape)
 * - Symbol validation (forbidden glyphs, quote pairing, indentation,
 *   trailing punctuation)
 * - A toggleable registry for rules that are disabled by default
 *
 * # Architecture
 *
 * - `structural`: header/anchor agreement and dialogue-shape rules
 * - `symbol`: glyph classes and classification-dependent whitespace rules
 * - `pipeline`: runs structural then symbol over one line pair
 * - `rules`: rule registry with per-rule toggles
 * - `violation`: the structured violation record
 */

pub mod pipeline;
pub mod rules;
pub mod structural;
pub mod symbol;
pub mod violation;

// Re-export main types
pub use pipeline::ValidationPipeline;
pub use rules::{OptionalRule, RuleToggles};
pub use structural::StructuralValidator;
pub use symbol::{SymbolValidator, MSG_BANG_BEFORE_QUESTION};
pub use violation::Violation;

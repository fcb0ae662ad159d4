/*!
 * Symbol validation of a translated line's body.
 *
 * Operates on the translated body only; original text is never
 * symbol-checked. The pass classifies the line (plain text, monologue,
 * dialogue with speaker) and then applies the glyph rules:
 *
 *  1. the `！？` / `!?` / `?!` orientation is forbidden;
 *  2. only the fullwidth tilde ～ is allowed;
 *  3. only the dash ― (U+2015) is allowed;
 *  4. all halfwidth ASCII punctuation is forbidden;
 *  5. quotes must be the fullwidth pair “”, corner brackets only as the
 *     dialogue's own open/close pair;
 *  6. halfwidth spaces never, fullwidth indentation per classification;
 *  7. every segment must end on a whitelisted punctuation glyph.
 *
 * The dash-pairing, comma-sibling and ellipsis-pair rules are carried in
 * the registry but default off.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::spt_line::{classify, closing_marker_offset, split_segments, LineClassification, MARK_TRANSLATE};
use crate::validation::rules::{OptionalRule, RuleToggles};

/// Message for the forbidden `！？` orientation.
///
/// The wording describes the expected orientation while the detection
/// targets the forbidden one; the patch writer keys its one auto-fix on
/// this exact text, so the asymmetry is preserved on purpose.
pub const MSG_BANG_BEFORE_QUESTION: &str =
    "question mark must precede exclamation mark and both must be full-width";

/// Tilde glyphs that are never allowed
const FORBIDDEN_TILDES: [char; 5] = ['~', '∼', '˜', '﹏', '〰'];

/// Dash glyphs that are never allowed
const FORBIDDEN_DASHES: [char; 5] = ['‐', '-', '–', '—', 'ー'];

/// Quote and bracket glyphs that are never allowed outside the dialogue pair
const FORBIDDEN_QUOTES: &str = "「」『』【】\"'‘’";

/// Halfwidth ASCII punctuation, all forbidden
const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Glyphs a segment may end on, after stripping trailing fullwidth spaces
const ALLOWED_TRAILING: &str = "，。……～！？―」』）”、";

static ELLIPSIS_RUNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new("…+").expect("Invalid ellipsis run regex")
});

/// Symbol rule set over one translated line
pub struct SymbolValidator;

impl SymbolValidator {
    /// Run all symbol rules, returning the accumulated messages.
    ///
    /// A line whose header cannot be located yields no messages here; the
    /// structural pass already reports that case.
    pub fn check(line: &str, toggles: &RuleToggles) -> Vec<String> {
        let mut errors = Vec::new();

        let Some(header_end) = closing_marker_offset(line, MARK_TRANSLATE) else {
            return errors;
        };

        // Skip the closing marker and the single separator character
        let after_marker = &line[header_end + MARK_TRANSLATE.len_utf8()..];
        let mut after_chars = after_marker.chars();
        let Some(separator) = after_chars.next() else {
            return errors;
        };
        let content = &after_marker[separator.len_utf8()..];
        if content.is_empty() {
            return errors;
        }

        let segments = split_segments(content);
        let classification = classify(&segments);
        let is_dialog_with_speaker = classification == LineClassification::DialogueWithSpeaker;
        let is_monologue = classification == LineClassification::Monologue;

        // Concatenation without break tokens, shared by the glyph rules
        let full_text: String = segments.concat();

        // Rule 1: forbidden exclamation/question orientation
        if full_text.contains("！？") || full_text.contains("!?") || full_text.contains("?!") {
            errors.push(MSG_BANG_BEFORE_QUESTION.to_string());
        }

        // Rule 2: forbidden tilde glyphs, one message per occurrence
        for c in full_text.chars() {
            if FORBIDDEN_TILDES.contains(&c) {
                errors.push(format!(
                    "forbidden tilde '{}', only the fullwidth ～ is allowed",
                    c
                ));
            }
        }

        // Optional: `、` between identical chars, identical chars around `，`
        if toggles.is_enabled(OptionalRule::CommaSibling) {
            let chars: Vec<char> = full_text.chars().collect();
            for i in 1..chars.len().saturating_sub(1) {
                let (prev, curr, next) = (chars[i - 1], chars[i], chars[i + 1]);
                if curr == '、' && prev != next {
                    errors.push(
                        "ideographic comma '、' must sit between two identical characters"
                            .to_string(),
                    );
                    break;
                } else if curr == '，' && prev == next {
                    errors.push(
                        "comma '，' between identical characters should be the ideographic comma '、'"
                            .to_string(),
                    );
                    break;
                }
            }
        }

        // Optional: the legal dash must come in pairs
        if toggles.is_enabled(OptionalRule::DashPairing) {
            let dash_count = content.chars().filter(|&c| c == '―').count();
            if dash_count != 0 && dash_count != 2 {
                errors.push(format!(
                    "dash '―' must appear exactly twice when used (found {})",
                    dash_count
                ));
            }
        }

        // Rule 3: forbidden dash glyphs, one message per glyph kind
        for bad in FORBIDDEN_DASHES {
            if content.contains(bad) {
                errors.push(format!(
                    "forbidden dash '{}', only '―' (U+2015) is allowed",
                    bad
                ));
            }
        }

        // Rule 4: halfwidth ASCII punctuation, each distinct glyph once
        let mut reported_ascii = Vec::new();
        for c in full_text.chars() {
            if c.is_ascii() && ASCII_PUNCTUATION.contains(c) && !reported_ascii.contains(&c) {
                reported_ascii.push(c);
                errors.push(format!("forbidden halfwidth symbol '{}'", c));
            }
        }

        // Rule 5: quote legality, skipping the dialogue's own pair once
        let chars: Vec<char> = full_text.chars().collect();
        let mut skipped_dialog_pair = false;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            if is_dialog_with_speaker
                && !skipped_dialog_pair
                && matches!(c, '「' | '『' | '（' | '）')
                && i < chars.len() - 1
            {
                let end = if c == '「' { '」' } else { '』' };
                if let Some(offset) = chars[i + 1..].iter().position(|&x| x == end) {
                    skipped_dialog_pair = true;
                    i = i + 1 + offset + 1;
                    continue;
                }
            }

            if FORBIDDEN_QUOTES.contains(c) {
                errors.push(format!(
                    "forbidden quote '{}', only fullwidth “” and （） are allowed",
                    c
                ));
            }
            i += 1;
        }

        let quote_open = chars.iter().filter(|&&c| c == '“').count();
        let quote_close = chars.iter().filter(|&&c| c == '”').count();
        if quote_open != quote_close {
            errors.push("fullwidth quotes “ and ” are not paired".to_string());
        }

        // Rule 6: spaces and classification-dependent indentation
        for (i, segment) in segments.iter().enumerate() {
            if segment.contains(' ') {
                errors.push(format!("segment {} contains a halfwidth space", i + 1));
            }
            if segment.ends_with('　') {
                errors.push(format!(
                    "segment {} must not end with a fullwidth space",
                    i + 1
                ));
            }

            let leading = segment.chars().take_while(|&c| c == '　').count();

            if is_dialog_with_speaker {
                // speaker name unindented, dialogue body indented from segment 3 on
                if i == 0 && leading > 0 {
                    errors.push("segment 1 (speaker) must not start with a space".to_string());
                } else if i >= 2 && leading < 1 {
                    errors.push(format!(
                        "segment {} (dialogue) must start with at least one fullwidth space",
                        i + 1
                    ));
                }
            } else if is_monologue {
                if i >= 1 && leading != 1 {
                    errors.push(format!(
                        "segment {} (monologue) must start with exactly one fullwidth space (found {})",
                        i + 1,
                        leading
                    ));
                }
            } else if leading > 0 {
                errors.push(format!(
                    "segment {} (plain text) must not start with a space",
                    i + 1
                ));
            }
        }

        // Optional: ellipsis runs must pair up
        if toggles.is_enabled(OptionalRule::EllipsisPairs) {
            for run in ELLIPSIS_RUNS.find_iter(content) {
                let length = run.as_str().chars().count();
                if length % 2 != 0 {
                    errors.push(format!(
                        "ellipsis runs of '…' must have even length (found {})",
                        length
                    ));
                }
            }
        }

        // Rule 7: trailing punctuation whitelist per segment
        let start = if is_dialog_with_speaker { 1 } else { 0 };
        for (i, segment) in segments.iter().enumerate().skip(start) {
            if segment.is_empty() {
                continue;
            }
            let trimmed = segment.trim_end_matches('　');
            let inner: Vec<char> = trimmed.chars().collect();
            let Some(&inner_last) = inner.last() else {
                continue; // whole segment is fullwidth spaces
            };
            let idx = inner.len() - 1;

            // Waiver for shout/long-tone runs: a non-final segment ending in
            // 4+ identical characters is allowed to break without punctuation
            let mut repetitive_shout = false;
            if i < segments.len() - 1 && idx >= 3 {
                if inner[idx - 1] == inner_last
                    && inner[idx - 2] == inner_last
                    && inner[idx - 3] == inner_last
                {
                    repetitive_shout = true;
                }
            }

            if !repetitive_shout && !ALLOWED_TRAILING.contains(inner_last) {
                errors.push(format!(
                    "segment {} must end with punctuation before the break (allowed: {}), found '{}'",
                    i + 1,
                    ALLOWED_TRAILING,
                    inner_last
                ));
            }
        }

        errors
    }
}

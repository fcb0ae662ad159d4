/*!
 * Structural validation of a translated/original line pair.
 *
 * Checks the header agreement between the two lines, the single space
 * after the closing marker, per-segment length limits, and the dialogue
 * shape rules (bracket balance, punctuation before the closing bracket).
 *
 * Rule summary:
 *  1. originals are wrapped in ○, translations in ●, anchor IDs must match;
 *  2. the closing ● must be followed by exactly one halfwidth space;
 *  3. bodies break on the literal `[\r][\n]` token, max 24 chars per segment;
 *  4. segment 1 / last segment decide whether the line is dialogue via 「」 or 『』;
 *  5. dialogue bracket glyphs must balance;
 *  6. the glyph before a closing bracket must not be 。，、 or a space.
 */

use crate::spt_line::{
    self, closing_marker_offset, split_segments, MARK_ORIGINAL, MARK_TRANSLATE, MAX_SEGMENT_CHARS,
};

/// Structural rule set over one line pair
pub struct StructuralValidator;

impl StructuralValidator {
    /// Run all structural rules, returning the accumulated messages.
    ///
    /// An unrecognized start marker or a missing space after the marker is
    /// terminal: the body cannot be located reliably, so deeper checks are
    /// skipped for that pair.
    pub fn check(line: &str, original_line: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if !spt_line::is_translate_line(line) || !spt_line::is_original_line(original_line) {
            errors.push("incorrect start marker, expected \u{25CF} or \u{25CB}".to_string());
            return errors;
        }

        let header_end = closing_marker_offset(line, MARK_TRANSLATE);
        let original_header_end = closing_marker_offset(original_line, MARK_ORIGINAL);

        // Rule 1: the anchor between the markers must match the original's
        let headers_match = match (header_end, original_header_end) {
            (Some(end), Some(original_end)) => {
                line[MARK_TRANSLATE.len_utf8()..end]
                    == original_line[MARK_ORIGINAL.len_utf8()..original_end]
            }
            _ => false,
        };
        if !headers_match {
            errors.push("header mismatch between translation and original".to_string());
        }

        let Some(header_end) = header_end else {
            return errors;
        };

        // Rule 2: exactly one halfwidth space between the marker and the body
        let after_marker = &line[header_end + MARK_TRANSLATE.len_utf8()..];
        let Some(content) = after_marker.strip_prefix(' ') else {
            errors.push("marker must be followed by exactly one space".to_string());
            return errors;
        };

        let segments = split_segments(content);

        // Rule 3: per-segment length limit
        for (i, segment) in segments.iter().enumerate() {
            let length = segment.chars().count();
            if length > MAX_SEGMENT_CHARS {
                errors.push(format!(
                    "segment {} exceeds {} characters (actual: {})",
                    i + 1,
                    MAX_SEGMENT_CHARS,
                    length
                ));
            }
        }

        // Rule 4: dialogue detection via corner brackets only
        let mut is_dialog = false;
        if segments.len() >= 2 {
            let second = segments[1].trim();
            let last = segments[segments.len() - 1].trim();
            if (second.starts_with('「') && last.ends_with('」'))
                || (second.starts_with('『') && last.ends_with('』'))
            {
                is_dialog = true;
            }
        }

        if is_dialog {
            // Rule 5: opening and closing bracket glyphs must balance
            let mut open = 0usize;
            let mut close = 0usize;
            for segment in &segments {
                for c in segment.chars() {
                    if c == '「' || c == '『' {
                        open += 1;
                    }
                    if c == '」' || c == '』' {
                        close += 1;
                    }
                }
            }
            if open != close {
                errors.push("bracket counts do not match".to_string());
            }

            // Rule 6: glyph before the closing bracket
            let last = &segments[segments.len() - 1];
            if last.ends_with('」') || last.ends_with('』') {
                let mut rev = last.chars().rev();
                rev.next();
                if let Some(before) = rev.next() {
                    if matches!(before, '。' | '，' | '、' | ' ' | '　') {
                        errors.push(
                            "character before closing bracket must not be punctuation/space"
                                .to_string(),
                        );
                    }
                }
            }
        }

        errors
    }
}

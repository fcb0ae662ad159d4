/*!
 * The one auto-fix: fullwidth `！？` reordering.
 *
 * Moves each fullwidth `？` to just before the start of the contiguous
 * run of `！` immediately preceding it, scanning left to right without
 * overlap. `！！？` becomes `？！！`. Only the fullwidth glyphs move;
 * nothing else in the line is normalized.
 */

use crate::spt_line::{closing_marker_offset, MARK_TRANSLATE};

/// Rewrite a full raw line, leaving the header prefix untouched.
///
/// Returns the input unchanged when the header cannot be located or no
/// `！…？` group exists in the body.
pub fn rewrite_bang_question(full_line: &str) -> String {
    let Some(header_end) = closing_marker_offset(full_line, MARK_TRANSLATE) else {
        return full_line.to_string();
    };

    // header, closing marker, plus the single separator character
    let after_marker = &full_line[header_end + MARK_TRANSLATE.len_utf8()..];
    let Some(separator) = after_marker.chars().next() else {
        return full_line.to_string();
    };
    let content_start = header_end + MARK_TRANSLATE.len_utf8() + separator.len_utf8();
    let content = &full_line[content_start..];
    if content.is_empty() {
        return full_line.to_string();
    }

    let fixed = move_question_before_bang_runs(content);
    if fixed == content {
        full_line.to_string()
    } else {
        format!("{}{}", &full_line[..content_start], fixed)
    }
}

/// Move each `？` in front of the `！` run directly before it.
fn move_question_before_bang_runs(body: &str) -> String {
    let mut chars: Vec<char> = body.chars().collect();
    let mut from = 0usize;
    let mut changed = false;

    while from < chars.len() {
        // next fullwidth question mark
        let Some(q) = chars[from..].iter().position(|&c| c == '？').map(|p| p + from) else {
            break;
        };

        if q > 0 && chars[q - 1] == '！' {
            // run start of the exclamation streak
            let mut run_start = q - 1;
            while run_start > 0 && chars[run_start - 1] == '！' {
                run_start -= 1;
            }

            chars.remove(q);
            chars.insert(run_start, '？');
            changed = true;

            // resume after the moved question mark
            from = run_start + 1;
        } else {
            // this question mark is not part of a `！…？` group
            from = q + 1;
        }
    }

    if changed {
        chars.into_iter().collect()
    } else {
        body.to_string()
    }
}

use std::fmt;

use crate::errors::SptParseError;

// @module: SPT line model - markers, anchor IDs, segments, classification

/// Marker glyph wrapping the anchor ID of an original-language line
pub const MARK_ORIGINAL: char = '\u{25CB}'; // ○

/// Marker glyph wrapping the anchor ID of a translated line
pub const MARK_TRANSLATE: char = '\u{25CF}'; // ●

/// Literal token standing in for an embedded line break inside a body.
/// This is an opaque 8-character delimiter, not a regex and not real CR/LF.
pub const SPLIT_TOKEN: &str = r"[\r][\n]";

/// Maximum number of characters allowed in a single segment
pub const MAX_SEGMENT_CHARS: usize = 24;

/// File extension shared by working files, blueprints and patches
pub const SPT_FILE_SUFFIX: &str = ".spt.txt";

/// Role of a script line, derived from its leading marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Original-language line, wrapped in ○
    Original,
    /// Translated line, wrapped in ●
    Translated,
}

impl LineRole {
    /// Marker glyph for this role
    pub fn marker(self) -> char {
        match self {
            LineRole::Original => MARK_ORIGINAL,
            LineRole::Translated => MARK_TRANSLATE,
        }
    }
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRole::Original => write!(f, "original"),
            LineRole::Translated => write!(f, "translated"),
        }
    }
}

/// Shape of a translated line, derived from its segments.
///
/// The three classes are mutually exclusive and gate which indentation
/// and trailing-punctuation rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClassification {
    /// Narration with no wrapping brackets
    PlainText,
    /// Inner monologue, segment 0 opens with （ and the last segment closes with ）
    Monologue,
    /// Quoted dialogue with a speaker name in segment 0
    DialogueWithSpeaker,
}

/// A parsed script line.
///
/// Immutable once parsed; corrections always produce a new raw line
/// instead of editing in place.
#[derive(Debug, Clone)]
pub struct SptLine {
    /// Role derived from the leading marker
    pub role: LineRole,

    /// Opaque anchor ID shared by an original/translated pair
    pub anchor_id: String,

    /// The full raw line, markers included
    pub raw: String,

    /// Body after the closing marker and the single space
    pub body: String,

    /// Body slices between split tokens, empty segments preserved
    pub segments: Vec<String>,
}

impl SptLine {
    /// Parse a raw line into a structured [`SptLine`].
    pub fn parse(raw: &str) -> Result<SptLine, SptParseError> {
        let marker = match raw.chars().next() {
            Some(MARK_ORIGINAL) => MARK_ORIGINAL,
            Some(MARK_TRANSLATE) => MARK_TRANSLATE,
            _ => return Err(SptParseError::MissingStartMarker),
        };
        let header_end =
            closing_marker_offset(raw, marker).ok_or(SptParseError::MissingClosingMarker)?;
        if header_end == marker.len_utf8() {
            return Err(SptParseError::EmptyAnchorId);
        }
        let anchor_id = raw[marker.len_utf8()..header_end].to_string();

        let after = &raw[header_end + marker.len_utf8()..];
        let body = after
            .strip_prefix(' ')
            .ok_or(SptParseError::MissingSpaceAfterMarker)?;

        let role = if marker == MARK_ORIGINAL {
            LineRole::Original
        } else {
            LineRole::Translated
        };

        Ok(SptLine {
            role,
            anchor_id,
            raw: raw.to_string(),
            body: body.to_string(),
            segments: split_segments(body),
        })
    }

    /// Classification of this line's segments
    pub fn classification(&self) -> LineClassification {
        classify(&self.segments)
    }
}

/// Check whether a raw line is a translated line (● start)
pub fn is_translate_line(line: &str) -> bool {
    line.starts_with(MARK_TRANSLATE)
}

/// Check whether a raw line is an original line (○ start)
pub fn is_original_line(line: &str) -> bool {
    line.starts_with(MARK_ORIGINAL)
}

/// Byte offset of the second occurrence of `marker`, skipping the first char.
pub fn closing_marker_offset(line: &str, marker: char) -> Option<usize> {
    let first = line.chars().next()?;
    let skip = first.len_utf8();
    line.get(skip..)?.find(marker).map(|pos| pos + skip)
}

/// Extract the anchor ID strictly between the first and second marker glyph.
///
/// `●00933|12D9C4|07A● ...` yields `00933|12D9C4|07A`. Returns `None` when
/// the line does not start with a marker, the closing marker is missing, or
/// the ID would be empty.
pub fn extract_anchor_id(line: &str) -> Option<&str> {
    let marker = line.chars().next()?;
    if marker != MARK_TRANSLATE && marker != MARK_ORIGINAL {
        return None;
    }
    let start = marker.len_utf8();
    let end = closing_marker_offset(line, marker)?;
    if end <= start {
        return None;
    }
    Some(&line[start..end])
}

/// Split a body on the literal split token, keeping empty segments.
///
/// Rejoining the result with [`SPLIT_TOKEN`] recovers the body exactly.
pub fn split_segments(body: &str) -> Vec<String> {
    body.split(SPLIT_TOKEN).map(str::to_string).collect()
}

/// Join segments back into a body
pub fn join_segments(segments: &[String]) -> String {
    segments.join(SPLIT_TOKEN)
}

/// Derive the classification from split segments.
///
/// Dialogue with a speaker tag takes priority: segment 1 opens with 「, 『
/// or （ and the last segment closes with the matching glyph. A monologue
/// opens in segment 0 with （ and closes in the last segment with ）.
pub fn classify(segments: &[String]) -> LineClassification {
    if segments.len() >= 2 {
        let second = segments[1].trim();
        let last = segments[segments.len() - 1].trim();
        if (second.starts_with('「') && last.ends_with('」'))
            || (second.starts_with('『') && last.ends_with('』'))
            || (second.starts_with('（') && last.ends_with('）'))
        {
            return LineClassification::DialogueWithSpeaker;
        }
    }

    if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
        if first.trim().starts_with('（') && last.trim().ends_with('）') {
            return LineClassification::Monologue;
        }
    }

    LineClassification::PlainText
}

/*!
 * Structured record of a failed validation.
 *
 * One violation is produced per offending line (or per file-level
 * mismatch), carrying every rule message that fired so the patch writer
 * can render a single reviewable block.
 */

/// Result of a failed validation pass over one line or one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Anchor ID of the offending line, when one could be extracted
    pub id: Option<String>,

    /// Whether the offending line is a translated line (● role)
    pub translate_line: bool,

    /// The raw offending line, empty for file-level violations
    pub raw_line: String,

    /// Zero-based pair index within the file, `None` for file-level violations
    pub line_index: Option<usize>,

    /// Ordered rule messages, structural before symbol
    pub messages: Vec<String>,
}

impl Violation {
    /// Create a violation anchored to a specific line
    pub fn for_line(
        id: Option<String>,
        translate_line: bool,
        raw_line: &str,
        line_index: usize,
        messages: Vec<String>,
    ) -> Self {
        Violation {
            id,
            translate_line,
            raw_line: raw_line.to_string(),
            line_index: Some(line_index),
            messages,
        }
    }

    /// Create a file-level violation with no anchored line
    pub fn for_file(messages: Vec<String>) -> Self {
        Violation {
            id: None,
            translate_line: false,
            raw_line: String::new(),
            line_index: None,
            messages,
        }
    }

    /// True when the violation carries a usable anchor ID.
    ///
    /// Violations without one still appear in reports but cannot be
    /// turned into patch entries.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}

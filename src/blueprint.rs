/*!
 * Blueprint drift detection.
 *
 * The blueprint is a canonical reference copy of the original-language
 * column. This differ compares the working file's ○ lines against the
 * blueprint's ○ lines position by position, independent of any
 * translated text, and reports count mismatches and content drift.
 */

use crate::spt_line::extract_anchor_id;
use crate::validation::Violation;

/// Positional differ over original-role lines
pub struct BlueprintDiffer;

impl BlueprintDiffer {
    /// Compare the working file's original lines against the blueprint's.
    ///
    /// Both slices must already be filtered down to ○ lines. The result is
    /// at most one count-mismatch violation plus one violation per drifted
    /// position.
    pub fn diff(working: &[String], blueprint: &[String]) -> Vec<Violation> {
        let mut violations = Vec::new();

        if working.len() != blueprint.len() {
            violations.push(Violation::for_file(vec![format!(
                "original line count mismatch: working file {} lines, blueprint {} lines",
                working.len(),
                blueprint.len()
            )]));
        }

        let max = working.len().max(blueprint.len());
        for i in 0..max {
            let working_line = working.get(i);
            let blueprint_line = blueprint.get(i);

            match (working_line, blueprint_line) {
                (None, Some(blueprint_line)) => {
                    let id = extract_anchor_id(blueprint_line).map(str::to_string);
                    violations.push(Violation {
                        id,
                        translate_line: false,
                        raw_line: blueprint_line.clone(),
                        line_index: Some(i),
                        messages: vec![format!(
                            "missing original line {}, please add it back",
                            i + 1
                        )],
                    });
                }
                (Some(working_line), None) => {
                    let id = extract_anchor_id(working_line).map(str::to_string);
                    violations.push(Violation {
                        id,
                        translate_line: false,
                        raw_line: working_line.clone(),
                        line_index: Some(i),
                        messages: vec![format!(
                            "blueprint missing original line {}, verify blueprint or working file",
                            i + 1
                        )],
                    });
                }
                (Some(working_line), Some(blueprint_line)) if working_line != blueprint_line => {
                    // anchor from whichever side still has one
                    let id = extract_anchor_id(working_line)
                        .or_else(|| extract_anchor_id(blueprint_line))
                        .map(str::to_string);
                    violations.push(Violation {
                        id,
                        translate_line: false,
                        raw_line: working_line.clone(),
                        line_index: Some(i),
                        messages: vec![
                            "original line differs from blueprint".to_string(),
                            format!("blueprint: {}", blueprint_line),
                            format!("current:   {}", working_line),
                        ],
                    });
                }
                _ => {}
            }
        }

        violations
    }
}

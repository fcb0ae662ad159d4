/*!
 * Unit tests for the script line model
 */

use sptcheck::spt_line::{self, LineClassification, LineRole, SptLine};

#[test]
fn test_parse_withOriginalLine_shouldSetRole() {
    let line = SptLine::parse("○00933|12D9C4|07A○ 体の柔らかさ。").unwrap();
    assert_eq!(line.role, LineRole::Original);
    assert_eq!(line.anchor_id, "00933|12D9C4|07A");
    assert_eq!(line.body, "体の柔らかさ。");
}

#[test]
fn test_parse_withMultiSegmentBody_shouldPreserveRaw() {
    let raw = r"●005● アリス[\r][\n]「おはよう。[\r][\n]　続きです」";
    let line = SptLine::parse(raw).unwrap();
    assert_eq!(line.raw, raw);
    assert_eq!(line.segments.len(), 3);
    assert_eq!(line.classification(), LineClassification::DialogueWithSpeaker);
}

#[test]
fn test_classification_withParenDialogue_shouldBeDialogueWithSpeaker() {
    // （） in segment 2 still reads as quoted dialogue with a speaker tag
    let line = SptLine::parse(r"●006● アリス[\r][\n]（心の声です）").unwrap();
    assert_eq!(line.classification(), LineClassification::DialogueWithSpeaker);
}

#[test]
fn test_classification_withSingleSegmentParens_shouldBeMonologue() {
    let line = SptLine::parse("●007● （短い独白です）").unwrap();
    assert_eq!(line.classification(), LineClassification::Monologue);
}

#[test]
fn test_roleMarker_shouldMatchLineDetection() {
    let original = format!("{}001{} 本文。", LineRole::Original.marker(), LineRole::Original.marker());
    let translated = format!("{}001{} 本文。", LineRole::Translated.marker(), LineRole::Translated.marker());

    assert!(spt_line::is_original_line(&original));
    assert!(!spt_line::is_translate_line(&original));
    assert!(spt_line::is_translate_line(&translated));
}

#[test]
fn test_extractAnchorId_agreesWithParse() {
    let raw = "●ab|cd● 本文。";
    let parsed = SptLine::parse(raw).unwrap();
    assert_eq!(spt_line::extract_anchor_id(raw), Some(parsed.anchor_id.as_str()));
}

use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// split_sections
// -----------------------------------------------------------------------

#[test]
fn split_sections_keeps_headings_and_preamble() {
    let text = "intro line\n## 1. First\nbody one\n## 2. Second\nbody two";
    let sections = split_sections(text);
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0], vec!["intro line"]);
    assert_eq!(sections[1], vec!["## 1. First", "body one"]);
    assert_eq!(sections[2], vec!["## 2. Second", "body two"]);
}

#[test]
fn split_sections_leading_heading_leaves_empty_preamble() {
    let sections = split_sections("## 1. Only\ntext");
    assert_eq!(sections.len(), 2);
    assert!(sections[0].is_empty());
}

#[test]
fn split_sections_ignores_other_heading_shapes() {
    let text = "### 1. Sub\n## Overview\n##1. Tight\n ## 2. Indented";
    assert_eq!(split_sections(text).len(), 1);
}

// -----------------------------------------------------------------------
// extract_blocks
// -----------------------------------------------------------------------

#[test]
fn single_inline_object_with_prose() {
    let text = "## 1. Creative A\nOpening hook is strong.\n{\"video_id\":\"x1\"}\nCTA is weak.\n";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload, json!({"video_id": "x1"}));
    assert_eq!(
        blocks[0].qualitative_text,
        "## 1. Creative A\nOpening hook is strong.\nCTA is weak."
    );
}

#[test]
fn multi_line_object_is_parsed_whole() {
    let text = r#"## 1. Coach demo
Expert review follows.
{
  "video_id": "core_step_florio_demo_01",
  "analysis_summary": {
    "creative_type": "expert_demonstration",
    "total_duration_sec": 48
  },
  "timeline_analysis": [
    {"time_range": "00:00-00:10", "segment_type": "hook"}
  ]
}
Closing remarks."#;
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].payload["analysis_summary"]["total_duration_sec"],
        json!(48)
    );
    assert_eq!(
        blocks[0].qualitative_text,
        "## 1. Coach demo\nExpert review follows.\nClosing remarks."
    );
}

#[test]
fn objects_in_one_section_share_its_text() {
    let text = "## 1. Pair\nShared notes.\n{\"video_id\":\"a\"}\n{\"video_id\":\"b\"}\n";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].payload["video_id"], "a");
    assert_eq!(blocks[1].payload["video_id"], "b");
    assert_eq!(blocks[0].qualitative_text, blocks[1].qualitative_text);
    assert_eq!(blocks[0].qualitative_text, "## 1. Pair\nShared notes.");
}

#[test]
fn each_section_gets_its_own_text() {
    let text = "## 1. One\nAlpha notes.\n{\"video_id\":\"a\"}\n## 2. Two\nBeta notes.\n{\"video_id\":\"b\"}\n";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].qualitative_text, "## 1. One\nAlpha notes.");
    assert_eq!(blocks[1].qualitative_text, "## 2. Two\nBeta notes.");
}

#[test]
fn preamble_object_is_extracted() {
    let text = "Report header\n{\"video_id\":\"pre\"}\n## 1. Later\nno objects here";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["video_id"], "pre");
    assert_eq!(blocks[0].qualitative_text, "Report header");
}

#[test]
fn section_without_objects_contributes_nothing() {
    let text = "## 1. Prose only\nNothing structured here.\n";
    assert!(extract_blocks(text).is_empty());
}

#[test]
fn malformed_block_is_skipped_but_removed_from_prose() {
    let text = "## 1. Mixed\nBefore.\n{\n  \"video_id\": \"bad\",\n  oops\n}\n{\"video_id\":\"good\"}\nAfter.";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["video_id"], "good");
    assert_eq!(blocks[0].qualitative_text, "## 1. Mixed\nBefore.\nAfter.");
}

#[test]
fn object_without_video_id_is_discarded() {
    let text = "## 1. Anonymous\n{\"analysis_summary\": {\"creative_type\": \"ugc\"}}\n";
    assert!(extract_blocks(text).is_empty());
}

#[test]
fn null_video_id_is_discarded() {
    assert!(extract_blocks("{\"video_id\": null}").is_empty());
}

#[test]
fn non_object_json_is_discarded() {
    assert!(extract_blocks("{}").is_empty());
}

#[test]
fn marker_lines_are_stripped_from_prose() {
    let text = "## 1. Markers\nJSON\n##\n**JSON output**\n**Verdict**: strong hook\n```json\n{\"video_id\":\"m\"}\n```";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].qualitative_text,
        "## 1. Markers\n**Verdict**: strong hook\n```json\n```"
    );
}

#[test]
fn indented_opening_brace_starts_a_block() {
    let text = "## 1. Indented\n  {\"video_id\": \"ind\"}\nprose";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["video_id"], "ind");
}

#[test]
fn prose_lines_containing_braces_mid_line_are_prose() {
    let text = "## 1. Braces\nUse {curly} sparingly.\n{\"video_id\":\"c\"}";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].qualitative_text, "## 1. Braces\nUse {curly} sparingly.");
}

#[test]
fn brace_inside_string_value_corrupts_block_boundary() {
    // Textual depth counting sees the `{` in the string and never returns to
    // zero, so the object and everything after it in the section is lost.
    let text = "## 1. Tricky\n{\n  \"video_id\": \"t\",\n  \"note\": \"open { brace\"\n}\nTrailing prose.\n## 2. Next\n{\"video_id\":\"n\"}";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["video_id"], "n");
}

#[test]
fn balanced_braces_inside_string_value_are_harmless() {
    let text = "{\n  \"video_id\": \"ok\",\n  \"note\": \"a {balanced} pair\"\n}";
    let blocks = extract_blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["note"], "a {balanced} pair");
}

#[test]
fn numeric_video_id_is_accepted() {
    let blocks = extract_blocks("{\"video_id\": 42}");
    assert_eq!(blocks.len(), 1);
}

#[test]
fn indented_marker_and_block_lines_are_recognized() {
    let blocks = extract_blocks("## 1. A\n  JSON\n    {\"video_id\":\"x\"}\nprose");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].payload["video_id"], "x");
    assert_eq!(blocks[0].qualitative_text, "## 1. A\nprose");
}

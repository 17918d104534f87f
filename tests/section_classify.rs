use cv_distill::config::Config;
use cv_distill::sections::{classify_line, classify_lines, section_blocks, SectionTag};

#[test]
fn keyword_sections() {
    let vocab = Config::default().vocab;
    assert_eq!(classify_line(&vocab, "Education"), SectionTag::Education);
    assert_eq!(classify_line(&vocab, "WORK EXPERIENCE"), SectionTag::Experience);
    assert_eq!(classify_line(&vocab, "Technical Skills"), SectionTag::Skills);
    assert_eq!(classify_line(&vocab, "nothing to see here"), SectionTag::Unknown);
}

#[test]
fn contact_markers() {
    let vocab = Config::default().vocab;
    assert_eq!(classify_line(&vocab, "jane@x.com"), SectionTag::Contact);
    assert_eq!(classify_line(&vocab, "call 555-123-4567"), SectionTag::Contact);
    // Too few digits to look like a phone number.
    assert_eq!(classify_line(&vocab, "since 2019"), SectionTag::Unknown);
}

#[test]
fn priority_order_education_first() {
    let vocab = Config::default().vocab;
    // Carries both an experience and an education keyword.
    assert_eq!(
        classify_line(&vocab, "Work Experience and Education"),
        SectionTag::Education
    );
}

#[test]
fn idempotent_and_order_independent() {
    let vocab = Config::default().vocab;
    let line = "Professional Experience";
    assert_eq!(classify_line(&vocab, line), classify_line(&vocab, line));

    let a = "Education";
    let b = "random text";
    let forward = classify_lines(&vocab, &format!("{a}\n{b}"));
    let backward = classify_lines(&vocab, &format!("{b}\n{a}"));
    assert_eq!(forward[0].tag, backward[1].tag);
    assert_eq!(forward[1].tag, backward[0].tag);
}

#[test]
fn line_offsets_index_into_text() {
    let vocab = Config::default().vocab;
    let text = "first\nEducation\nlast";
    let lines = classify_lines(&vocab, text);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1].offset, 6);
    assert_eq!(&text[lines[1].offset..lines[1].offset + 9], "Education");
}

#[test]
fn blocks_extend_to_next_header() {
    let vocab = Config::default().vocab;
    let text = "Jane Doe\nEducation\nState University\nExperience\nAcme Corp role";
    let lines = classify_lines(&vocab, text);
    let blocks = section_blocks(&lines, text.len());

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].tag, SectionTag::Education);
    assert_eq!(blocks[1].tag, SectionTag::Experience);
    // The untagged entry line belongs to the block its header opened.
    let entry_offset = text.find("Acme Corp").unwrap();
    assert!(blocks[1].contains(entry_offset));
    assert_eq!(blocks[1].end, text.len());
}

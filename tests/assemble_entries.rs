use cv_distill::assemble::assemble;
use cv_distill::config::Config;
use cv_distill::extract::Matchers;
use cv_distill::sections::{classify_lines, section_blocks};

fn run(text: &str) -> cv_distill::assemble::Assembled {
    let cfg = Config::default();
    let matchers = Matchers::new(&cfg).expect("compile matchers");
    let lines = classify_lines(&cfg.vocab, text);
    let blocks = section_blocks(&lines, text.len());
    let candidates = matchers.document_candidates(&lines, &blocks);
    assemble(text, &blocks, &candidates)
}

#[test]
fn entries_grouped_per_block() {
    let text = "Education\n\
        Massachusetts Institute of Technology Bachelor of Science Sep 2010 - Jun 2014\n\
        Stanford University Master of Science Sep 2014 - Jun 2016\n\
        Experience\n\
        Software Engineer at Initech Jul 2016 - Dec 2018\n\
        Senior Software Engineer at Globex Jan 2019 - Present";

    let out = run(text);

    assert_eq!(out.education.len(), 2);
    assert_eq!(out.education[0].institution, "Massachusetts Institute of Technology");
    assert_eq!(out.education[0].degree, "Bachelor of Science");
    assert_eq!(out.education[0].start_date, "2010-09");
    assert_eq!(out.education[1].institution, "Stanford University");
    assert_eq!(out.education[1].end_date, Some("2016-06".to_string()));

    assert_eq!(out.experience.len(), 2);
    assert_eq!(out.experience[0].title, "Software Engineer");
    assert_eq!(out.experience[0].company, "Initech");
    assert_eq!(out.experience[0].end_date, Some("2018-12".to_string()));
    assert_eq!(out.experience[1].title, "Senior Software Engineer");
    assert_eq!(out.experience[1].company, "Globex");
    assert_eq!(out.experience[1].end_date, None);

    // Description runs from this entry's title to the next entry's title.
    assert!(out.experience[0]
        .description
        .starts_with("Software Engineer at Initech"));
    assert!(!out.experience[0].description.contains("Globex"));
    assert!(out.experience[1].description.contains("Globex"));
}

#[test]
fn missing_fields_fill_empty_instead_of_dropping() {
    let text = "Education\nHarvard University 2008 - 2012";
    let out = run(text);

    assert_eq!(out.education.len(), 1);
    assert_eq!(out.education[0].institution, "Harvard University");
    assert_eq!(out.education[0].degree, "");
    // Year-only range without month names is not a date-range candidate.
    assert_eq!(out.education[0].start_date, "");
    assert_eq!(out.education[0].end_date, Some(String::new()));
}

#[test]
fn candidates_outside_their_section_do_not_cross() {
    // A date in the experience block must not attach to education.
    let text = "Education\nState College\nExperience\nEngineer at Hooli Mar 2020 - Present";
    let out = run(text);

    assert_eq!(out.education.len(), 1);
    assert_eq!(out.education[0].start_date, "");
    assert_eq!(out.experience.len(), 1);
    assert_eq!(out.experience[0].start_date, "2020-03");
    assert_eq!(out.experience[0].end_date, None);
}

#[test]
fn reversed_span_is_kept_and_flagged() {
    let text = "Experience\nAnalyst at Initech May 2019 - Jan 2015";
    let out = run(text);

    assert_eq!(out.experience.len(), 1);
    assert_eq!(out.experience[0].start_date, "2019-05");
    assert_eq!(out.experience[0].end_date, Some("2015-01".to_string()));
    assert!(out
        .warnings
        .iter()
        .any(|w| w.contains("experience[0]")));
}

#[test]
fn no_blocks_falls_back_to_global_pairing() {
    // No section headers at all; candidates still pair positionally.
    let text = "Engineer at Hooli Jan 2020 - Present";
    let out = run(text);

    assert!(out.education.is_empty());
    assert_eq!(out.experience.len(), 1);
    assert_eq!(out.experience[0].title, "Engineer");
    assert_eq!(out.experience[0].company, "Hooli");
}

use cv_distill::dates::{normalize, DateEnd, YearMonth};

#[test]
fn month_year_range() {
    let span = normalize("Jan 2015 - May 2019");
    assert_eq!(span.start, Some(YearMonth { year: 2015, month: 1 }));
    assert_eq!(span.end, DateEnd::Known(YearMonth { year: 2019, month: 5 }));
    assert!(!span.is_reversed());
}

#[test]
fn present_marker_is_ongoing() {
    let span = normalize("Jan 2019 - Present");
    assert_eq!(span.start, Some(YearMonth { year: 2019, month: 1 }));
    assert_eq!(span.end, DateEnd::Ongoing);
}

#[test]
fn bare_year_defaults_to_january() {
    let span = normalize("2020");
    assert_eq!(span.start, Some(YearMonth { year: 2020, month: 1 }));
    assert_eq!(span.end, DateEnd::Unknown);
}

#[test]
fn gibberish_never_raises() {
    let span = normalize("gibberish");
    assert_eq!(span.start, None);
    assert_eq!(span.end, DateEnd::Unknown);

    let span = normalize("");
    assert_eq!(span.start, None);
    assert_eq!(span.end, DateEnd::Unknown);
}

#[test]
fn en_dash_and_full_month_names() {
    let span = normalize("January 2019 \u{2013} March 2021");
    assert_eq!(span.start, Some(YearMonth { year: 2019, month: 1 }));
    assert_eq!(span.end, DateEnd::Known(YearMonth { year: 2021, month: 3 }));
}

#[test]
fn word_separators() {
    let span = normalize("Jun 2019 to Present");
    assert_eq!(span.start, Some(YearMonth { year: 2019, month: 6 }));
    assert_eq!(span.end, DateEnd::Ongoing);

    let span = normalize("Feb 2010 until Nov 2012");
    assert_eq!(span.end, DateEnd::Known(YearMonth { year: 2012, month: 11 }));
}

#[test]
fn present_on_start_side_is_unparseable() {
    let span = normalize("Present - Jan 2020");
    assert_eq!(span.start, None);
    assert_eq!(span.end, DateEnd::Known(YearMonth { year: 2020, month: 1 }));
}

#[test]
fn well_formed_ranges_are_ordered() {
    for text in ["Mar 2001 - Apr 2002", "Sep 2015 - Sep 2015", "Dec 1999 - Jan 2000"] {
        let span = normalize(text);
        let (Some(start), DateEnd::Known(end)) = (span.start, span.end) else {
            panic!("expected both sides parsed for {text:?}");
        };
        assert!(start <= end, "{text:?} parsed out of order");
    }
}

#[test]
fn reversed_range_is_flagged_not_dropped() {
    let span = normalize("May 2019 - Jan 2015");
    assert!(span.is_reversed());
    assert!(span.start.is_some());
}

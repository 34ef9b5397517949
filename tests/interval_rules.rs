use taxopref::interval::{Bound, Inclusion, InclusionPair, PointParser, Rule};
use taxopref::pref_error::PrefError;

fn rule(lo: &str, up: &str, li: &str, ui: &str) -> Rule {
    Rule::parse("r", &[lo], &[up], &[li], &[ui]).unwrap()
}

#[test]
fn closed_region_contains_its_endpoints() {
    let r = rule("2", "5", "[", "]");
    for x in [2.0, 5.0, 3.5] {
        assert_eq!(r.contains(&[x]), Ok(true), "{x}");
    }
    for x in [1.999, 5.001] {
        assert_eq!(r.contains(&[x]), Ok(false), "{x}");
    }
    let half_open = rule("2", "5", "[", "[");
    assert_eq!(half_open.contains(&[5.0]), Ok(false));
    assert_eq!(half_open.contains(&[4.999]), Ok(true));
}

#[test]
fn inverted_bound_covers_both_tails() {
    let r = rule("5", "2", "[", "]");
    for x in [f64::MIN, -3.0, 2.0, 5.0, 7.5] {
        assert_eq!(r.contains(&[x]), Ok(true), "{x}");
    }
    for x in [2.001, 3.0, 4.999] {
        assert_eq!(r.contains(&[x]), Ok(false), "{x}");
    }
}

#[test]
fn touching_regions_intersect_only_when_both_include_the_point() {
    let a = rule("0", "10", "[", "]");
    let b = rule("10", "20", "[", "]");
    assert_eq!(a.intersects(&b), Ok(true));

    let a_open = rule("0", "10", "[", "[");
    let b_open = rule("10", "20", "]", "]");
    assert_eq!(a_open.intersects(&b_open), Ok(false));
    assert_eq!(b_open.intersects(&a_open), Ok(false));
}

#[test]
fn bounds_intersect_symmetrically() {
    let wide = Bound::closed(0.0, 100.0);
    let inner = Bound::new(
        40.0,
        60.0,
        InclusionPair::new(Inclusion::Excluded, Inclusion::Excluded),
    );
    assert!(wide.intersects(&inner));
    assert!(inner.intersects(&wide));
}

#[test]
fn dates_compare_lexicographically() {
    // from June 2020 up to March 2021, as (year, month)
    let season = Rule::parse("season", &["2020", "6"], &["2021", "3"], &["["], &["]"]).unwrap();
    let parser = PointParser::new(vec!["/".into()], vec![2, 1], "", "").unwrap();
    let inside = ["12/2020", "1/2021", "6/2020", "3/2021"];
    let outside = ["5/2020", "4/2021", "12/2019"];
    for text in inside {
        let p = parser.parse(text).unwrap();
        assert_eq!(season.contains(&p), Ok(true), "{text}");
    }
    for text in outside {
        let p = parser.parse(text).unwrap();
        assert_eq!(season.contains(&p), Ok(false), "{text}");
    }
}

#[test]
fn one_pair_per_dimension_builds_an_independent_box() {
    let b = Rule::parse(
        "box",
        &["0", "0"],
        &["10", "10"],
        &["[", "["],
        &["]", "]"],
    )
    .unwrap();
    assert_eq!(b.regions().len(), 1);
    assert_eq!(b.contains(&[10.0, 0.0]), Ok(true));
    assert_eq!(b.contains(&[5.0, 11.0]), Ok(false));
}

#[test]
fn dimension_and_shape_errors() {
    let r = rule("0", "1", "[", "]");
    assert_eq!(
        r.contains(&[0.5, 0.5]),
        Err(PrefError::DimensionMismatch { expected: 1, found: 2 })
    );
    assert!(matches!(
        Rule::independent("x", &[0.0], &[1.0], &[InclusionPair::CLOSED]),
        Err(PrefError::MalformedRegion(_))
    ));
    assert!(matches!(
        Rule::parse("x", &["0", "0"], &["1"], &["["], &["]"]),
        Err(PrefError::MalformedRegion(_))
    ));
    assert!(matches!(
        Rule::parse("x", &["zero"], &["1"], &["["], &["]"]),
        Err(PrefError::Parsing(_))
    ));
}

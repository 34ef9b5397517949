mod util;

use taxopref::config::AlgorithmConfig;
use taxopref::pref_error::PrefError;
use taxopref::preference::Value;
use taxopref::source::DataSource;
use taxopref::taxonomy::{Taxonomy, TaxonomyKind};
use util::*;

#[test]
fn config_survives_a_json_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let config = events_config();
    let text = serde_json::to_string_pretty(&config)?;
    let back: AlgorithmConfig = serde_json::from_str(&text)?;
    assert_eq!(back, config);
    Ok(())
}

#[test]
fn built_taxonomies_answer_lookups() -> Result<(), Box<dyn std::error::Error>> {
    let taxonomies = events_config().build_taxonomies()?;
    let table = events_table();

    let Taxonomy::RuleBased(price) = &taxonomies["price"] else {
        panic!("price should be rule based");
    };
    assert_eq!(price.rule_for_value("cheap")?.label(), "cheap");
    assert!(price.intersecting_labels()?.is_empty());

    let venue = &taxonomies["venue"];
    assert_eq!(venue.kind(), TaxonomyKind::QueryBased);
    assert!(!venue.is_leaf_value(&Value::from("indoor"), &table)?);
    assert_eq!(
        venue.fathers_of(&Value::from("hall"), &table)?,
        [Value::from("indoor")].into()
    );
    assert_eq!(
        venue.descendants_of(&Value::from("anywhere"), &table)?.len(),
        6
    );
    Ok(())
}

#[test]
fn missing_kind_is_an_attribute_mismatch() {
    let mut config = events_config();
    config.taxonomy_kinds.remove("name");
    assert!(matches!(
        config.validate(),
        Err(PrefError::AttributeSetMismatch(_))
    ));
}

#[test]
fn bad_weights_surface_when_building() {
    let text = EVENTS_CONFIG.replace("\"weights\": [1]", "\"weights\": [2]");
    let config: AlgorithmConfig = serde_json::from_str(&text).unwrap();
    assert!(matches!(
        config.build_taxonomies(),
        Err(PrefError::InvalidPointWeights(_))
    ));
}

#[test]
fn memory_table_is_a_data_source() {
    fn halls<S: DataSource>(s: &S) -> usize {
        s.count_matching(&taxopref::source::CountQuery {
            attribute: "venue".into(),
            value: "hall".into(),
        })
        .unwrap()
    }
    assert_eq!(halls(&events_table()), 1);
}

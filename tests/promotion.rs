mod util;

use std::collections::{BTreeMap, BTreeSet};

use taxopref::config::{AlgorithmConfig, Schema};
use taxopref::hierarchy::{LeveledHierarchy, Relation};
use taxopref::preference::{PreferenceEngine, PreferencePartition, TuplesResult, Value};
use taxopref::source::MemoryTable;
use taxopref::taxonomy::TaxonomyKind;
use util::*;

fn tier_config() -> AlgorithmConfig {
    AlgorithmConfig {
        attribute_ordering: vec!["name".into(), "tier".into()],
        taxonomy_kinds: BTreeMap::from([
            ("name".to_string(), TaxonomyKind::Flat),
            ("tier".to_string(), TaxonomyKind::Flat),
        ]),
        ..AlgorithmConfig::default()
    }
}

/// `gold > silver > bronze` on a flat attribute.
fn tier_engine() -> PreferenceEngine {
    let f = formula(vec![
        clause(&[("tier", "gold")], &[("tier", "silver")]),
        clause(&[("tier", "silver")], &[("tier", "bronze")]),
    ]);
    PreferenceEngine::new(f, &Schema::new(["name", "tier"]), &tier_config()).unwrap()
}

fn table(rows: &[(&str, &str)]) -> MemoryTable {
    let mut t = MemoryTable::new(["name", "tier"]);
    for (name, tier) in rows {
        t.push_row([*name, *tier]).unwrap();
    }
    t
}

#[test]
fn deepest_set_floats_up_when_nothing_blocks_it() {
    let partition = tier_engine()
        .preferred_tuples(&table(&[("x", "bronze"), ("y", "bronze")]))
        .unwrap();
    assert_eq!(partition.len(), 1);
    assert_eq!(partition.groups()[0].level, 0);
    assert_eq!(partition.groups()[0].rows().len(), 2);
}

#[test]
fn non_empty_middle_level_keeps_the_deepest_set_down() {
    let partition = tier_engine()
        .preferred_tuples(&table(&[("x", "bronze"), ("m", "silver")]))
        .unwrap();
    let levels: Vec<u32> = partition.groups().iter().map(|g| g.level).collect();
    assert_eq!(levels, vec![0, 2]);
    assert_eq!(
        names(&partition),
        vec![BTreeSet::from(["m".to_string()]), BTreeSet::from(["x".to_string()])]
    );
}

#[test]
fn full_chain_is_emitted_level_by_level() {
    let partition = tier_engine()
        .preferred_tuples(&table(&[("g", "gold"), ("s", "silver"), ("b", "bronze")]))
        .unwrap();
    let flat: Vec<String> = partition
        .flatten()
        .into_iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(flat, vec!["{(g, gold)}", "{(s, silver)}", "{(b, bronze)}"]);
}

fn tuples(name: &str) -> TuplesResult {
    TuplesResult(BTreeSet::from([vec![Value::from(name)]]))
}

#[test]
fn sibling_does_not_block_promotion() {
    // a > b, a > c, b > d: only c and d hold tuples
    let h = LeveledHierarchy::build(
        [("a", "b"), ("a", "c"), ("b", "d")]
            .map(|(x, y)| Relation::new(x.to_string(), y.to_string()).unwrap()),
    )
    .unwrap();
    let mapping = h
        .hierarchy()
        .elements()
        .iter()
        .map(|(&id, name)| {
            let t = match name.as_str() {
                "c" | "d" => tuples(name),
                _ => TuplesResult::default(),
            };
            (id, t)
        })
        .collect();
    let tuples_h = h.change_values(mapping).unwrap();
    let partition = PreferencePartition::promote(&tuples_h).non_empty();
    assert_eq!(partition.len(), 1);
    assert_eq!(
        partition.groups()[0].tuples,
        BTreeSet::from([tuples("c"), tuples("d")])
    );
}

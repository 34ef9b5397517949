//! Replaces the generic values of merged nodes by the concrete leaves they
//! cover.

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::hierarchy::LeveledHierarchy;
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, NodeValue, PreQueryNode};
use crate::source::DataSource;
use crate::taxonomy::Taxonomy;

/// Expands one constraint through the taxonomy governing its attribute.
///
/// # Errors
/// [`PrefError::UnknownAttribute`] if no taxonomy governs the attribute, plus
/// whatever the taxonomy or the source reports.
pub fn expand_value<S: DataSource + ?Sized>(
    value: &NodeValue,
    taxonomies: &BTreeMap<Attribute, Taxonomy>,
    source: &S,
) -> Result<NodeValue, PrefError> {
    let taxonomy = taxonomies
        .get(&value.attribute)
        .ok_or_else(|| PrefError::UnknownAttribute(value.attribute.clone()))?;
    Ok(NodeValue::new(
        value.attribute.clone(),
        taxonomy.expand(&value.values, source)?,
    ))
}

/// Expands every node of `hierarchy`, keeping topology and levels.
///
/// Each distinct constraint is expanded once, however many nodes carry it.
pub fn expand_hierarchy<S: DataSource + ?Sized>(
    hierarchy: LeveledHierarchy<PreQueryNode>,
    taxonomies: &BTreeMap<Attribute, Taxonomy>,
    source: &S,
) -> Result<LeveledHierarchy<PreQueryNode>, PrefError> {
    let mut cache: HashMap<NodeValue, NodeValue> = HashMap::new();
    let mut mapping = BTreeMap::new();
    for (&id, node) in hierarchy.hierarchy().elements() {
        let mut expanded = Vec::with_capacity(node.values().len());
        for value in node.values() {
            if let Some(hit) = cache.get(value) {
                expanded.push(hit.clone());
                continue;
            }
            let fresh = expand_value(value, taxonomies, source)?;
            cache.insert(value.clone(), fresh.clone());
            expanded.push(fresh);
        }
        mapping.insert(id, PreQueryNode::new(expanded)?);
    }
    log::debug!(
        "expansion: {} nodes, {} distinct constraints",
        mapping.len(),
        cache.len()
    );
    hierarchy.change_values(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::hierarchy::Relation;
    use crate::interval::{PointParser, Rule};
    use crate::preference::node::Value;
    use crate::source::MemoryTable;
    use crate::taxonomy::RuleTaxonomy;

    fn setup() -> (BTreeMap<Attribute, Taxonomy>, MemoryTable) {
        let cheap = Rule::parse("cheap", &["0"], &["20"], &["["], &["]"]).unwrap();
        let pricey = Rule::parse("expensive", &["20"], &["+inf"], &["]"], &["]"]).unwrap();
        let mut taxonomies = BTreeMap::new();
        taxonomies.insert(
            "price".to_string(),
            Taxonomy::RuleBased(
                RuleTaxonomy::new("price", vec![cheap, pricey], PointParser::scalar()).unwrap(),
            ),
        );
        taxonomies.insert("venue".to_string(), Taxonomy::Flat);
        let mut table = MemoryTable::new(["price", "venue"]);
        table.push_row(["10", "indoor"]).unwrap();
        table.push_row(["15", "outdoor"]).unwrap();
        table.push_row(["40", "indoor"]).unwrap();
        (taxonomies, table)
    }

    #[test]
    fn rule_labels_expand_to_leaves() {
        let (taxonomies, table) = setup();
        let expanded =
            expand_value(&NodeValue::single("price", "cheap"), &taxonomies, &table).unwrap();
        assert_eq!(
            expanded.values,
            BTreeSet::from([Value::from("10"), Value::from("15")])
        );
        let flat =
            expand_value(&NodeValue::single("venue", "indoor"), &taxonomies, &table).unwrap();
        assert_eq!(flat, NodeValue::single("venue", "indoor"));
    }

    #[test]
    fn unknown_attribute_fails() {
        let (taxonomies, table) = setup();
        assert_eq!(
            expand_value(&NodeValue::single("city", "rome"), &taxonomies, &table),
            Err(PrefError::UnknownAttribute("city".into()))
        );
    }

    #[test]
    fn hierarchy_keeps_shape_after_expansion() {
        let (taxonomies, table) = setup();
        let cheap = PreQueryNode::new([NodeValue::single("price", "cheap")]).unwrap();
        let pricey = PreQueryNode::new([NodeValue::single("price", "expensive")]).unwrap();
        let h = LeveledHierarchy::build([Relation::new(cheap, pricey).unwrap()]).unwrap();
        let expanded = expand_hierarchy(h.clone(), &taxonomies, &table).unwrap();
        assert_eq!(expanded.levels(), h.levels());
        let bottom = *expanded.nodes_at_level(1).iter().next().unwrap();
        assert_eq!(
            expanded.element(bottom).unwrap().to_string(),
            "(price={40})"
        );
    }
}

//! Maps expanded constraint nodes to the tuples satisfying them.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::hierarchy::{LeveledHierarchy, NodeId};
use crate::pref_error::PrefError;
use crate::preference::node::{Attribute, PreQueryNode, TuplesResult};
use crate::source::{Condition, DataSource, MaybeSync, TupleQuery};

/// The projection of `ordering` restricted by every constraint of `node`.
///
/// `None` when some constraint has no value left: such a node matches no
/// tuple and the source is not queried.
pub fn tuple_query(node: &PreQueryNode, ordering: &[Attribute]) -> Option<TupleQuery> {
    if node.values().iter().any(|v| v.values.is_empty()) {
        return None;
    }
    Some(TupleQuery {
        columns: ordering.to_vec(),
        conditions: node
            .values()
            .iter()
            .map(|v| Condition {
                attribute: v.attribute.clone(),
                values: v.values.clone(),
            })
            .collect(),
    })
}

/// Tuples of the relation satisfying `node`.
///
/// # Errors
/// [`PrefError::ArityMismatch`] if a returned row does not have one value per
/// attribute of `ordering`, plus whatever the source reports.
pub fn fetch_node_tuples<S: DataSource + ?Sized>(
    node: &PreQueryNode,
    ordering: &[Attribute],
    source: &S,
) -> Result<TuplesResult, PrefError> {
    let Some(query) = tuple_query(node, ordering) else {
        return Ok(TuplesResult::default());
    };
    let rows = source.fetch_tuples(&query, ordering.len())?;
    if let Some(bad) = rows.iter().find(|r| r.len() != ordering.len()) {
        return Err(PrefError::ArityMismatch {
            expected: ordering.len(),
            found: bad.len(),
            query: query.to_string(),
        });
    }
    Ok(TuplesResult(rows))
}

/// Replaces every node of `hierarchy` by its tuple set, keeping topology and
/// levels.
pub fn map_to_tuples<S: DataSource + MaybeSync + ?Sized>(
    hierarchy: LeveledHierarchy<PreQueryNode>,
    ordering: &[Attribute],
    source: &S,
) -> Result<LeveledHierarchy<TuplesResult>, PrefError> {
    let elements = hierarchy.hierarchy().elements();

    #[cfg(feature = "parallel")]
    let mapping: BTreeMap<NodeId, TuplesResult> = elements
        .par_iter()
        .map(|(&id, node)| Ok((id, fetch_node_tuples(node, ordering, source)?)))
        .collect::<Result<_, PrefError>>()?;

    #[cfg(not(feature = "parallel"))]
    let mapping: BTreeMap<NodeId, TuplesResult> = elements
        .iter()
        .map(|(&id, node)| Ok((id, fetch_node_tuples(node, ordering, source)?)))
        .collect::<Result<_, PrefError>>()?;

    log::debug!(
        "tuple mapping: {} nodes, {} non-empty",
        mapping.len(),
        mapping.values().filter(|t| !t.is_empty()).count()
    );
    hierarchy.change_values(mapping)
}

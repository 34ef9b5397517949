//! Reachability matrix and topological ordering used by closure/reduction.

use std::collections::{BTreeMap, BTreeSet};

use super::node_id::NodeId;
use crate::pref_error::PrefError;

/// Transitive reachability over a DAG, one bit row per node.
///
/// Rows and columns are indexed by topological position, so every edge
/// points from a lower row to a higher column.
pub(crate) struct ReachMatrix {
    order: Vec<NodeId>,
    pos: BTreeMap<NodeId, usize>,
    stride: usize,
    bits: Vec<u64>,
}

impl ReachMatrix {
    /// Closes the successor lists `succ` over `nodes`.
    ///
    /// # Errors
    /// [`PrefError::CycleDetected`] if `succ` is cyclic.
    pub(crate) fn close(
        nodes: &BTreeSet<NodeId>,
        succ: &BTreeMap<NodeId, BTreeSet<NodeId>>,
    ) -> Result<Self, PrefError> {
        let order = topological_order(nodes, succ)?;
        let pos = order.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let stride = order.len().div_ceil(64);
        let mut m = Self {
            bits: vec![0; stride * order.len()],
            order,
            pos,
            stride,
        };
        for from in (0..m.order.len()).rev() {
            let u = m.order[from];
            for v in succ.get(&u).into_iter().flatten() {
                let to = m.pos[v];
                m.absorb(from, to);
            }
        }
        Ok(m)
    }

    /// Nodes in the topological order the matrix is indexed by.
    pub(crate) fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub(crate) fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        match (self.pos.get(&from), self.pos.get(&to)) {
            (Some(&f), Some(&t)) => (self.row(f)[t / 64] >> (t % 64)) & 1 == 1,
            _ => false,
        }
    }

    /// Every node reachable from `from`, in topological order.
    pub(crate) fn reachable_from(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let row = self.pos.get(&from).map_or(&[][..], |&f| self.row(f));
        row.iter().enumerate().flat_map(move |(w, &word)| {
            SetBits(word).map(move |b| self.order[w * 64 + b])
        })
    }

    fn row(&self, i: usize) -> &[u64] {
        &self.bits[i * self.stride..(i + 1) * self.stride]
    }

    /// Row `from` takes `to` and everything `to` reaches; requires `from < to`.
    fn absorb(&mut self, from: usize, to: usize) {
        let stride = self.stride;
        let (head, tail) = self.bits.split_at_mut(to * stride);
        let dst = &mut head[from * stride..(from + 1) * stride];
        for (a, b) in dst.iter_mut().zip(&tail[..stride]) {
            *a |= *b;
        }
        dst[to / 64] |= 1u64 << (to % 64);
    }
}

/// Positions of the set bits of one word, lowest first.
struct SetBits(u64);

impl Iterator for SetBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let b = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(b)
    }
}

/// Kahn's topological sort over `nodes` with successor lists `succ`.
///
/// # Errors
/// [`PrefError::CycleDetected`] if not every node can be ordered.
pub(crate) fn topological_order(
    nodes: &BTreeSet<NodeId>,
    succ: &BTreeMap<NodeId, BTreeSet<NodeId>>,
) -> Result<Vec<NodeId>, PrefError> {
    let mut in_deg: BTreeMap<NodeId, u32> = nodes.iter().map(|&n| (n, 0)).collect();
    for targets in succ.values() {
        for t in targets {
            *in_deg.entry(*t).or_insert(0) += 1;
        }
    }

    let mut stack: Vec<NodeId> = in_deg
        .iter()
        .rev()
        .filter_map(|(&n, &d)| (d == 0).then_some(n))
        .collect();
    let mut topo = Vec::with_capacity(in_deg.len());
    while let Some(n) = stack.pop() {
        topo.push(n);
        for t in succ.get(&n).into_iter().flatten() {
            if let Some(d) = in_deg.get_mut(t) {
                *d -= 1;
                if *d == 0 {
                    stack.push(*t);
                }
            }
        }
    }

    if topo.len() != in_deg.len() {
        return Err(PrefError::CycleDetected);
    }
    Ok(topo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: u32) -> NodeId {
        NodeId::new(x)
    }

    #[test]
    fn matrix_closes_chains_across_word_boundaries() {
        // 0 -> 1 -> ... -> 69, plus a side edge 0 -> 70
        let nodes: BTreeSet<_> = (0..71).map(n).collect();
        let mut succ: BTreeMap<NodeId, BTreeSet<NodeId>> = (0..69)
            .map(|i| (n(i), BTreeSet::from([n(i + 1)])))
            .collect();
        succ.entry(n(0)).or_default().insert(n(70));
        let m = ReachMatrix::close(&nodes, &succ).unwrap();
        assert!(m.reaches(n(0), n(69)));
        assert!(m.reaches(n(3), n(68)));
        assert!(!m.reaches(n(68), n(3)));
        assert!(!m.reaches(n(1), n(70)));
        assert_eq!(m.reachable_from(n(0)).count(), 70);
        assert_eq!(m.reachable_from(n(67)).collect::<Vec<_>>(), vec![n(68), n(69)]);
        assert_eq!(m.reachable_from(n(70)).count(), 0);
        assert!(!m.reaches(n(0), n(99)));
    }

    #[test]
    fn set_bits_are_listed_lowest_first() {
        let word = (1u64 << 63) | (1 << 5) | 1;
        assert_eq!(SetBits(word).collect::<Vec<_>>(), vec![0, 5, 63]);
    }

    #[test]
    fn topological_order_respects_edges() {
        let nodes: BTreeSet<_> = (0..4).map(n).collect();
        let mut succ = BTreeMap::new();
        succ.insert(n(2), BTreeSet::from([n(1)]));
        succ.insert(n(1), BTreeSet::from([n(0)]));
        succ.insert(n(3), BTreeSet::from([n(0)]));
        let order = topological_order(&nodes, &succ).unwrap();
        let pos = |x: NodeId| order.iter().position(|&o| o == x).unwrap();
        assert!(pos(n(2)) < pos(n(1)));
        assert!(pos(n(1)) < pos(n(0)));
        assert!(pos(n(3)) < pos(n(0)));
    }

    #[test]
    fn cycle_is_reported() {
        let nodes: BTreeSet<_> = (0..2).map(n).collect();
        let mut succ = BTreeMap::new();
        succ.insert(n(0), BTreeSet::from([n(1)]));
        succ.insert(n(1), BTreeSet::from([n(0)]));
        assert_eq!(
            topological_order(&nodes, &succ),
            Err(PrefError::CycleDetected)
        );
    }
}

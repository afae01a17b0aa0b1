// Copyright (c) 2017-2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! A vector based routing graph.
//!
//! All incident edges of a node are stored in one contiguous slice of an
//! adjacency array. An adjacency entry is the edge index shifted by one bit,
//! the lowest bit tells whether the node is the second node of the edge in
//! storage orientation.

use crate::builder::{Buildable, Builder};
use crate::error::{Error, Result};
use crate::traits::{ChGraph, Direction, EdgeId, EdgeRef, NodeId, RoutingGraph, Shortcut};

use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Data for an edge in a vector graph.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
struct EdgeData {
    nodes: [NodeId; 2],
    distance: f64,
    access: [bool; 2],
    shortcut: Option<Shortcut>,
}

impl EdgeData {
    fn edge_ref(&self, e: EdgeId) -> EdgeRef {
        let [u, v] = self.nodes;
        match self.shortcut {
            Some(sc) => EdgeRef::shortcut(e, u, v, sc),
            None => EdgeRef::original(e, u, v, self.distance, self.access),
        }
    }
}

/// A vector based routing graph with optional contraction levels.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct VecGraph {
    /// Start of the adjacency slice of each node, plus a sentinel.
    firstadj: Vec<u32>,
    adj: Vec<u32>,
    edges: Vec<EdgeData>,
    levels: Vec<u32>,
}

impl VecGraph {
    pub fn new() -> VecGraph {
        Default::default()
    }

    fn edge_ref(&self, adj: u32) -> EdgeRef {
        let e = adj >> 1;
        let r = self.edges[e as usize].edge_ref(e);
        if adj & 1 == 0 {
            r
        } else {
            r.flip()
        }
    }
}

/// Iterator over the incident edges of a node.
pub struct EdgeIt<'a> {
    graph: &'a VecGraph,
    it: SliceIter<'a, u32>,
    reverse: bool,
}

impl<'a> Iterator for EdgeIt<'a> {
    type Item = EdgeRef;

    fn next(&mut self) -> Option<EdgeRef> {
        for &a in &mut self.it {
            let e = self.graph.edge_ref(a);
            if e.can_traverse(self.reverse) {
                return Some(e);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.it.size_hint().1)
    }
}

impl RoutingGraph for VecGraph {
    type EdgeIt<'a> = EdgeIt<'a>;

    fn num_nodes(&self) -> usize {
        self.firstadj.len().saturating_sub(1)
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self, u: NodeId, dir: Direction) -> EdgeIt<'_> {
        let u = u as usize;
        let slice = match (self.firstadj.get(u), self.firstadj.get(u + 1)) {
            (Some(&beg), Some(&end)) => &self.adj[beg as usize..end as usize],
            _ => &[],
        };
        EdgeIt {
            graph: self,
            it: slice.iter(),
            reverse: dir.is_reverse(),
        }
    }

    fn edge(&self, e: EdgeId) -> Option<EdgeRef> {
        self.edges.get(e as usize).map(|data| data.edge_ref(e))
    }
}

impl ChGraph for VecGraph {
    fn level(&self, u: NodeId) -> u32 {
        self.levels.get(u as usize).cloned().unwrap_or(0)
    }
}

/// A builder for a VecGraph.
///
/// The basic task is to collect the incident edges of each node so they can
/// be arranged in one contiguous adjacency array.
#[derive(Default)]
pub struct VecGraphBuilder {
    /// The incident edges of each node.
    nodes: Vec<Vec<u32>>,
    edges: Vec<EdgeData>,
    levels: Vec<u32>,
}

impl VecGraphBuilder {
    fn push_edge(&mut self, data: EdgeData) -> EdgeId {
        assert!(self.edges.len() < (u32::MAX >> 1) as usize, "Edge capacity exceeded");
        let e = self.edges.len() as u32;
        let [u, v] = data.nodes;
        self.nodes[u as usize].push(e << 1);
        self.nodes[v as usize].push((e << 1) | 1);
        self.edges.push(data);
        e
    }

    /// Return the node of edge `e` opposite to `u`.
    fn other_node(&self, e: EdgeId, u: NodeId) -> Option<NodeId> {
        let [a, b] = self.edges.get(e as usize)?.nodes;
        if a == u {
            Some(b)
        } else if b == u {
            Some(a)
        } else {
            None
        }
    }

    /// Return the original edge of `e` incident to `u`.
    fn orig_at(&self, e: EdgeId, u: NodeId) -> EdgeId {
        let data = &self.edges[e as usize];
        match data.shortcut {
            Some(sc) if data.nodes[0] == u => sc.orig_first,
            Some(sc) => sc.orig_last,
            None => e,
        }
    }
}

impl Builder for VecGraphBuilder {
    type Graph = VecGraph;

    fn with_capacities(nnodes: usize, nedges: usize) -> Self {
        VecGraphBuilder {
            nodes: Vec::with_capacity(nnodes),
            edges: Vec::with_capacity(nedges),
            levels: Vec::with_capacity(nnodes),
        }
    }

    fn reserve(&mut self, nnodes: usize, nedges: usize) {
        self.nodes.reserve(nnodes);
        self.levels.reserve(nnodes);
        self.edges.reserve(nedges);
    }

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn add_node(&mut self) -> NodeId {
        assert!(self.nodes.len() < u32::MAX as usize, "Node capacity exceeded");
        self.nodes.push(vec![]);
        self.levels.push(0);
        self.nodes.len() as NodeId - 1
    }

    fn add_edge_with_access(&mut self, u: NodeId, v: NodeId, distance: f64, access: [bool; 2]) -> EdgeId {
        self.push_edge(EdgeData {
            nodes: [u, v],
            distance,
            access,
            shortcut: None,
        })
    }

    fn add_shortcut(&mut self, u: NodeId, v: NodeId, skipped: [EdgeId; 2], weight: f64, millis: u64) -> Result<EdgeId> {
        let x = self.other_node(skipped[0], u).ok_or(Error::ShortcutMismatch {
            edge: skipped[0],
            from: u,
            to: v,
        })?;
        if self.other_node(skipped[1], x) != Some(v) {
            return Err(Error::ShortcutMismatch {
                edge: skipped[1],
                from: x,
                to: v,
            });
        }

        let distance = self.edges[skipped[0] as usize].distance + self.edges[skipped[1] as usize].distance;
        let shortcut = Shortcut {
            skipped,
            weight,
            distance,
            millis,
            orig_first: self.orig_at(skipped[0], u),
            orig_last: self.orig_at(skipped[1], v),
        };
        Ok(self.push_edge(EdgeData {
            nodes: [u, v],
            distance,
            access: [true, false],
            shortcut: Some(shortcut),
        }))
    }

    fn set_level(&mut self, u: NodeId, level: u32) {
        self.levels[u as usize] = level;
    }

    fn into_graph(self) -> VecGraph {
        let mut firstadj = Vec::with_capacity(self.nodes.len() + 1);
        let mut adj = Vec::with_capacity(self.edges.len() * 2);

        for incident in self.nodes.into_iter() {
            firstadj.push(adj.len() as u32);
            adj.extend(incident);
        }
        firstadj.push(adj.len() as u32);

        VecGraph {
            firstadj,
            adj,
            edges: self.edges,
            levels: self.levels,
        }
    }
}

impl Buildable for VecGraph {
    type Builder = VecGraphBuilder;
}

#[cfg(test)]
mod tests {
    use crate::builder::{Buildable, Builder};
    use crate::traits::{ChGraph, Direction, RoutingGraph};
    use crate::VecGraph;

    #[test]
    fn test_directed_edges() {
        let g = VecGraph::new_with(|b| {
            let n = b.add_nodes(3);
            b.add_edge(n[0], n[1], 1.0);
            b.add_oneway_edge(n[1], n[2], 2.0);
        });

        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 2);

        let out1: Vec<_> = g.edges(1, Direction::Forward).map(|e| (e.edge, e.adj)).collect();
        assert_eq!(out1, vec![(0, 0), (1, 2)]);
        let in1: Vec<_> = g.edges(1, Direction::Backward).map(|e| (e.edge, e.adj)).collect();
        assert_eq!(in1, vec![(0, 0)]);
        let in2: Vec<_> = g.edges(2, Direction::Backward).map(|e| (e.edge, e.adj)).collect();
        assert_eq!(in2, vec![(1, 1)]);
        assert_eq!(g.edges(2, Direction::Forward).count(), 0);

        for u in 0..3 {
            for e in g.edges(u, Direction::Forward).chain(g.edges(u, Direction::Backward)) {
                assert_eq!(e.base, u);
            }
        }
        assert!(g.edge(2).is_none());
    }

    #[test]
    fn test_shortcuts() {
        let g = VecGraph::try_new_with(|b| {
            let n = b.add_nodes(4);
            let a = b.add_edge(n[0], n[1], 1.0);
            let c = b.add_edge(n[2], n[1], 2.0);
            let d = b.add_edge(n[2], n[3], 4.0);
            // 0 -> 2 via 1
            let s = b.add_shortcut(n[0], n[2], [a, c], 3.0, 300)?;
            // 0 -> 3 via 2
            b.add_shortcut(n[0], n[3], [s, d], 7.0, 700)?;
            for (i, &u) in n.iter().enumerate() {
                b.set_level(u, i as u32);
            }
            assert!(b.add_shortcut(n[3], n[0], [a, d], 5.0, 500).is_err());
            Ok::<_, crate::Error>(())
        })
        .unwrap();

        assert_eq!(g.level(3), 3);
        let s = g.edge(4).unwrap();
        let sc = s.shortcut_data().unwrap();
        assert_eq!(sc.skipped, [3, 2]);
        assert_eq!(sc.distance, 7.0);
        assert_eq!((sc.orig_first, sc.orig_last), (0, 2));

        // shortcuts are one-way
        let out0: Vec<_> = g.edges(0, Direction::Forward).map(|e| e.edge).collect();
        assert_eq!(out0, vec![0, 3, 4]);
        let in3: Vec<_> = g.edges(3, Direction::Backward).map(|e| e.edge).collect();
        assert_eq!(in3, vec![2, 4]);
        assert_eq!(g.edges(3, Direction::Forward).filter(|e| e.is_shortcut()).count(), 0);
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use crate::builder::{Buildable, Builder};
        use crate::traits::{Direction, RoutingGraph};
        use crate::VecGraph;

        #[test]
        fn test_serde() {
            let g = VecGraph::new_with(|b| {
                let n = b.add_nodes(3);
                b.add_edge(n[0], n[1], 1.0);
                b.add_oneway_edge(n[1], n[2], 2.0);
            });

            let serialized = serde_json::to_string(&g).unwrap();
            let h: VecGraph = serde_json::from_str(&serialized).unwrap();

            assert_eq!(g.num_nodes(), h.num_nodes());
            assert_eq!(g.num_edges(), h.num_edges());
            for u in 0..3 {
                assert_eq!(
                    g.edges(u, Direction::Forward).collect::<Vec<_>>(),
                    h.edges(u, Direction::Forward).collect::<Vec<_>>()
                );
            }
        }
    }
}

/*
 * Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Construction of paths from shortest path trees.
//!
//! The forward tree is walked from the meeting entry to its root, so its edges
//! are collected last-to-first and reversed afterwards. The backward tree is
//! a tree on the reverse graph, walking it from the meeting entry to its root
//! already yields the edges in travel order. Shortcuts are expanded on the
//! fly and distance and time are accumulated per original edge.

use crate::error::{Error, Result};
use crate::path::Path;
use crate::spt::{EntryId, SptArena};
use crate::traits::{EdgeRef, NodeId, RoutingGraph};
use crate::unpack::ShortcutUnpacker;
use crate::weighting::Weighting;

pub struct PathExtractor<'g, G, W> {
    graph: &'g G,
    weighting: &'g W,
    edge_based: bool,
}

impl<'g, G, W> PathExtractor<'g, G, W>
where
    G: RoutingGraph,
    W: Weighting,
{
    /// Create an extractor.
    ///
    /// If `edge_based` is set, turn times are added between consecutive
    /// edges.
    pub fn new(graph: &'g G, weighting: &'g W, edge_based: bool) -> Self {
        PathExtractor {
            graph,
            weighting,
            edge_based,
        }
    }

    /// Extract the path through a pair of meeting entries.
    ///
    /// `weight` is the weight of the meeting, i.e. both entry weights plus
    /// the turn cost at the meeting node.
    pub fn extract(
        &self,
        fwd: &SptArena,
        fwd_entry: EntryId,
        bwd: &SptArena,
        bwd_entry: EntryId,
        weight: f64,
    ) -> Result<Path> {
        let (f, b) = (fwd.get(fwd_entry), bwd.get(bwd_entry));
        if f.adj_node != b.adj_node {
            return Err(Error::MeetingMismatch {
                fwd_node: f.adj_node,
                bwd_node: b.adj_node,
            });
        }

        let mut edges = self.tree_edges(fwd, fwd_entry)?;
        let source = fwd.get(fwd.root_of(fwd_entry)).adj_node;

        let unpacker = ShortcutUnpacker::new(self.graph, false);
        for (id, entry) in bwd.chain(bwd_entry) {
            if let Some(parent) = bwd.parent(id) {
                unpacker.visit_original_edges(entry.edge, entry.adj_node, parent.adj_node, |e| edges.push(e))?;
            }
        }

        Ok(self.build(source, &edges, weight, None))
    }

    /// Extract the path to an entry of a forward tree.
    pub fn extract_forward(&self, spt: &SptArena, entry: EntryId) -> Result<Path> {
        let edges = self.tree_edges(spt, entry)?;
        let source = spt.get(spt.root_of(entry)).adj_node;
        Ok(self.build(source, &edges, spt.get(entry).weight, None))
    }

    /// Extract the path to an entry of a time-dependent forward tree.
    ///
    /// The travel time is the sum of the time stamp differences along the
    /// tree path, the weighting is not evaluated again.
    pub fn extract_time_dependent(&self, spt: &SptArena, entry: EntryId) -> Result<Path> {
        let edges = self.tree_edges(spt, entry)?;
        let source = spt.get(spt.root_of(entry)).adj_node;
        let time = spt
            .chain(entry)
            .filter_map(|(id, e)| spt.parent(id).map(|p| e.time.saturating_sub(p.time)))
            .sum::<u64>();
        Ok(self.build(source, &edges, spt.get(entry).weight, Some(time)))
    }

    /// Return the original edges from the root of a forward tree to `entry`.
    fn tree_edges(&self, spt: &SptArena, entry: EntryId) -> Result<Vec<EdgeRef>> {
        let mut edges = vec![];
        let unpacker = ShortcutUnpacker::new(self.graph, true);
        for (id, e) in spt.chain(entry) {
            if let Some(parent) = spt.parent(id) {
                unpacker.visit_original_edges(e.edge, parent.adj_node, e.adj_node, |orig| edges.push(orig))?;
            }
        }
        edges.reverse();
        Ok(edges)
    }

    fn build(&self, source: NodeId, edges: &[EdgeRef], weight: f64, time: Option<u64>) -> Path {
        let mut distance = 0.0;
        let mut millis = 0;
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(source);
        for (i, e) in edges.iter().enumerate() {
            distance += e.distance;
            millis += self.weighting.edge_millis(e, false);
            if self.edge_based && i > 0 {
                millis += self.weighting.turn_millis(edges[i - 1].edge, e.base, e.edge);
            }
            nodes.push(e.adj);
        }
        Path::new(
            weight,
            distance,
            time.unwrap_or(millis),
            edges.iter().map(|e| e.edge).collect(),
            nodes,
        )
    }
}

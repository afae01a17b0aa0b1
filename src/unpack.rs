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

//! Recursive expansion of shortcuts into original edges.

use crate::error::{Error, Result};
use crate::traits::{EdgeId, EdgeRef, NodeId, RoutingGraph};

/// Expands shortcuts into the original edges they represent.
///
/// The recursion is resolved with an explicit stack, so deeply nested
/// shortcuts cannot overflow the call stack.
pub struct ShortcutUnpacker<'g, G> {
    graph: &'g G,
    /// Visit edges from the last to the first.
    reverse_order: bool,
}

impl<'g, G> ShortcutUnpacker<'g, G>
where
    G: RoutingGraph,
{
    pub fn new(graph: &'g G, reverse_order: bool) -> Self {
        ShortcutUnpacker { graph, reverse_order }
    }

    /// Visit the original edges of edge `e` traversed from `from` to `to`.
    ///
    /// Each original edge is passed to `visitor` oriented in travel
    /// direction, i.e. with `base` being the node where it is entered. Fails
    /// if some (possibly nested) edge does not connect the expected nodes.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_chroute::{Buildable, Builder, VecGraph};
    /// use rs_chroute::unpack::ShortcutUnpacker;
    ///
    /// let g = VecGraph::try_new_with(|b| {
    ///     let n = b.add_nodes(3);
    ///     let a = b.add_edge(n[0], n[1], 2.0);
    ///     let c = b.add_edge(n[1], n[2], 3.0);
    ///     b.add_shortcut(n[0], n[2], [a, c], 5.0, 500)?;
    ///     Ok::<_, rs_chroute::Error>(())
    /// })
    /// .unwrap();
    ///
    /// let mut edges = vec![];
    /// ShortcutUnpacker::new(&g, false)
    ///     .visit_original_edges(2, 0, 2, |e| edges.push((e.edge, e.distance)))
    ///     .unwrap();
    /// assert_eq!(edges, vec![(0, 2.0), (1, 3.0)]);
    /// ```
    pub fn visit_original_edges<F>(&self, e: EdgeId, from: NodeId, to: NodeId, mut visitor: F) -> Result<()>
    where
        F: FnMut(EdgeRef),
    {
        let mut stack = vec![(e, from, to)];
        while let Some((e, from, to)) = stack.pop() {
            let r = self.oriented(e, from, to)?;
            match r.shortcut_data() {
                None => visitor(r),
                Some(sc) => {
                    // skipped edges in travel order
                    let (first, second) = if r.is_flipped() {
                        (sc.skipped[1], sc.skipped[0])
                    } else {
                        (sc.skipped[0], sc.skipped[1])
                    };
                    let via = self.other_node(first, from, to)?;
                    if self.reverse_order {
                        stack.push((first, from, via));
                        stack.push((second, via, to));
                    } else {
                        stack.push((second, via, to));
                        stack.push((first, from, via));
                    }
                }
            }
        }
        Ok(())
    }

    /// Return edge `e` seen from `from`, which must be connected to `to`.
    fn oriented(&self, e: EdgeId, from: NodeId, to: NodeId) -> Result<EdgeRef> {
        let r = self.graph.edge(e).ok_or(Error::UnknownEdge(e))?;
        if r.base == from && r.adj == to {
            Ok(r)
        } else if r.base == to && r.adj == from {
            Ok(r.flip())
        } else {
            Err(Error::ShortcutMismatch { edge: e, from, to })
        }
    }

    fn other_node(&self, e: EdgeId, from: NodeId, to: NodeId) -> Result<NodeId> {
        let r = self.graph.edge(e).ok_or(Error::UnknownEdge(e))?;
        if r.base == from {
            Ok(r.adj)
        } else if r.adj == from {
            Ok(r.base)
        } else {
            Err(Error::ShortcutMismatch { edge: e, from, to })
        }
    }
}

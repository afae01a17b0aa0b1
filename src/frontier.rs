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

//! The state of one search direction.
//!
//! A frontier consists of the shortest path tree, the open set (a priority
//! queue of the tree entries not yet settled) and the best-weight map
//! assigning each traversal id its currently best entry.
//!
//! An entry is *queued* while it is on the open set and *settled* once it has
//! been popped. Only queued entries can be improved, settled entries are
//! final. Improving an entry replaces it in place, which is safe because no
//! other entry can have a queued entry as parent.

use crate::collections::{BinHeap, ItemPriQueue};
use crate::spt::{EntryId, SptArena, SptEntry, TraversalId};
use crate::traits::{EdgeId, NodeId, ANY_EDGE};

use either::Either::{self, Left, Right};
use rustc_hash::FxHashMap;

/// Slot of the best-weight map: the heap item of a queued entry or the settled
/// entry itself.
type Slot = Either<usize, EntryId>;

pub struct Frontier {
    reverse: bool,
    edge_based: bool,
    spt: SptArena,
    heap: BinHeap<EntryId, f64>,
    best: FxHashMap<TraversalId, Slot>,
    /// All entries per node (edge-based traversal only).
    at_node: FxHashMap<NodeId, Vec<EntryId>>,
    /// Cheaper upper bounds for known nodes found by aggressive stalling.
    stall_bounds: FxHashMap<NodeId, f64>,
    /// Original edge the root must be left by (or entered by, backwards).
    root_restriction: Option<EdgeId>,
    settled: usize,
    finished: bool,
    /// The last popped entry with its key.
    current: Option<(EntryId, f64)>,
}

impl Frontier {
    pub fn new(reverse: bool, edge_based: bool, capacity: usize) -> Frontier {
        let mut best = FxHashMap::default();
        best.reserve(capacity);
        Frontier {
            reverse,
            edge_based,
            spt: SptArena::with_capacity(capacity),
            heap: BinHeap::with_capacity(capacity),
            best,
            at_node: FxHashMap::default(),
            stall_bounds: FxHashMap::default(),
            root_restriction: None,
            settled: 0,
            finished: false,
            current: None,
        }
    }

    /// Return `true` if this frontier searches on the reverse graph.
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn spt(&self) -> &SptArena {
        &self.spt
    }

    pub fn entry(&self, id: EntryId) -> &SptEntry {
        self.spt.get(id)
    }

    /// Remove all entries and reset all counters.
    pub fn clear(&mut self) {
        self.spt.clear();
        self.heap.clear();
        self.best.clear();
        self.at_node.clear();
        self.stall_bounds.clear();
        self.root_restriction = None;
        self.settled = 0;
        self.finished = false;
        self.current = None;
    }

    /// Insert the root entry at node `u` with the given key.
    ///
    /// The root expands only along the original edge `restriction`, unless it
    /// is `ANY_EDGE`.
    pub fn init(&mut self, u: NodeId, key: f64, restriction: EdgeId) -> EntryId {
        self.init_with(SptEntry::root(u, 0.0), key, restriction)
    }

    /// Insert a custom root entry, e.g. one carrying a departure time.
    pub fn init_with(&mut self, root: SptEntry, key: f64, restriction: EdgeId) -> EntryId {
        self.clear();
        self.root_restriction = if restriction == ANY_EDGE { None } else { Some(restriction) };
        let root = self.insert(root, key);
        self.current = Some((root, key));
        root
    }

    pub fn root_restriction(&self) -> Option<EdgeId> {
        self.root_restriction
    }

    /// Return the traversal id of an entry.
    pub fn traversal_id(&self, entry: &SptEntry) -> TraversalId {
        if self.edge_based {
            TraversalId::Edge {
                node: entry.adj_node,
                edge: entry.incoming_edge,
            }
        } else {
            TraversalId::Node(entry.adj_node)
        }
    }

    /// Offer a candidate entry to the frontier.
    ///
    /// The candidate is added if its traversal id is unknown and replaces the
    /// known entry if that one is still queued and strictly heavier. Returns
    /// the id of the added or improved entry, `None` if the candidate has been
    /// discarded.
    pub fn relax(&mut self, entry: SptEntry, key: f64) -> Option<EntryId> {
        let tid = self.traversal_id(&entry);
        match self.best.get(&tid) {
            None => Some(self.insert(entry, key)),
            Some(&Left(item)) => {
                let id = *self.heap.key(&item);
                if entry.weight < self.spt.get(id).weight {
                    self.spt.replace(id, entry);
                    self.heap.decrease_key(&item, key);
                    Some(id)
                } else {
                    None
                }
            }
            Some(&Right(_)) => None,
        }
    }

    fn insert(&mut self, entry: SptEntry, key: f64) -> EntryId {
        let tid = self.traversal_id(&entry);
        let id = self.spt.push(entry);
        let item = self.heap.push(id, key);
        self.best.insert(tid, Left(item));
        if self.edge_based {
            self.at_node.entry(entry.adj_node).or_insert_with(Vec::new).push(id);
        }
        id
    }

    /// Remove the entry with the smallest key from the open set.
    pub fn pop(&mut self) -> Option<EntryId> {
        let (id, key) = self.heap.pop_min()?;
        let tid = self.traversal_id(self.spt.get(id));
        self.best.insert(tid, Right(id));
        self.settled += 1;
        self.current = Some((id, key));
        Some(id)
    }

    /// Return the best entry for a traversal id.
    pub fn best_entry(&self, tid: TraversalId) -> Option<EntryId> {
        self.best.get(&tid).map(|slot| match *slot {
            Left(item) => *self.heap.key(&item),
            Right(id) => id,
        })
    }

    /// Return the best weight of a node in node-based traversal.
    pub fn best_weight(&self, u: NodeId) -> Option<f64> {
        self.best_entry(TraversalId::Node(u)).map(|id| self.spt.get(id).weight)
    }

    /// Return the settled entry of a traversal id.
    pub fn settled_entry(&self, tid: TraversalId) -> Option<EntryId> {
        match self.best.get(&tid) {
            Some(&Right(id)) => Some(id),
            _ => None,
        }
    }

    /// Return all entries at node `u` (edge-based traversal only).
    pub fn entries_at(&self, u: NodeId) -> &[EntryId] {
        self.at_node.get(&u).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    /// The last popped entry (or the root before the first pop).
    pub fn current(&self) -> Option<EntryId> {
        self.current.map(|(id, _)| id)
    }

    /// The weight of the last popped entry.
    pub fn current_weight(&self) -> f64 {
        self.current
            .map(|(id, _)| self.spt.get(id).weight)
            .unwrap_or(f64::INFINITY)
    }

    /// The key of the last popped entry.
    pub fn current_key(&self) -> f64 {
        self.current.map(|(_, key)| key).unwrap_or(f64::INFINITY)
    }

    /// Number of popped entries.
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self) {
        self.finished = true;
    }

    pub fn stall_bound(&self, u: NodeId) -> Option<f64> {
        self.stall_bounds.get(&u).cloned()
    }

    /// Lower the stall bound of `u` to `bound`.
    ///
    /// Returns `true` if the bound has been lowered.
    pub fn lower_stall_bound(&mut self, u: NodeId, bound: f64) -> bool {
        let b = self.stall_bounds.entry(u).or_insert(f64::INFINITY);
        if bound < *b {
            *b = bound;
            true
        } else {
            false
        }
    }
}

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

//! Shortest path trees.
//!
//! The entries of a search tree live in an arena, [`SptArena`]. Each entry
//! references its parent by index, so the tree is a plain vector of entries
//! whose parent chains always end in a root (an entry without parent).
//! Entries are never removed during a search.

use crate::traits::{EdgeId, NodeId, NO_EDGE};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

use std::fmt;

/// Index of an entry in an [`SptArena`].
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct EntryId(u32);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "#{}", self.0)
    }
}

/// Key identifying a frontier state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TraversalId {
    /// Node-based traversal, one state per node.
    Node(NodeId),
    /// Edge-based traversal, one state per node and incoming original edge.
    Edge { node: NodeId, edge: EdgeId },
}

/// An entry of a shortest path tree.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SptEntry {
    /// The edge (maybe a shortcut) connecting the parent with this entry,
    /// `NO_EDGE` for a root.
    pub edge: EdgeId,
    /// The node reached by this entry.
    pub adj_node: NodeId,
    /// The weight of the tree path from the root.
    pub weight: f64,
    pub parent: Option<EntryId>,
    /// The original edge incident to `adj_node` on the tree path.
    ///
    /// Only relevant for edge-based traversal.
    pub incoming_edge: EdgeId,
    /// Time stamp in milliseconds, only used by time-dependent searches.
    pub time: u64,
}

impl SptEntry {
    /// Create a root entry at node `u`.
    pub fn root(u: NodeId, weight: f64) -> SptEntry {
        SptEntry {
            edge: NO_EDGE,
            adj_node: u,
            weight,
            parent: None,
            incoming_edge: NO_EDGE,
            time: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena of shortest path tree entries.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct SptArena {
    entries: Vec<SptEntry>,
}

impl SptArena {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        SptArena {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Add a new entry.
    ///
    /// The parent of the entry must already be in the arena.
    pub fn push(&mut self, entry: SptEntry) -> EntryId {
        debug_assert!(entry.parent.map(|p| p.index() < self.entries.len()).unwrap_or(true));
        self.entries.push(entry);
        EntryId(self.entries.len() as u32 - 1)
    }

    /// Replace the entry `id` by `entry`.
    ///
    /// All fields are replaced at once. The caller must ensure that no other
    /// entry has `id` as parent.
    pub(crate) fn replace(&mut self, id: EntryId, entry: SptEntry) {
        self.entries[id.index()] = entry;
    }

    pub fn get(&self, id: EntryId) -> &SptEntry {
        &self.entries[id.index()]
    }

    /// Return the parent entry of `id`.
    pub fn parent(&self, id: EntryId) -> Option<&SptEntry> {
        self.get(id).parent.map(|p| self.get(p))
    }

    /// Iterate over the entries `(id, entry)` from `id` up to the root.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_chroute::spt::{SptArena, SptEntry};
    ///
    /// let mut spt = SptArena::new();
    /// let root = spt.push(SptEntry::root(0, 0.0));
    /// let a = spt.push(SptEntry { edge: 3, adj_node: 1, weight: 1.0, parent: Some(root), incoming_edge: 3, time: 0 });
    /// let b = spt.push(SptEntry { edge: 5, adj_node: 2, weight: 3.0, parent: Some(a), incoming_edge: 5, time: 0 });
    ///
    /// let nodes: Vec<_> = spt.chain(b).map(|(_, e)| e.adj_node).collect();
    /// assert_eq!(nodes, vec![2, 1, 0]);
    /// ```
    pub fn chain(&self, id: EntryId) -> Chain {
        Chain {
            arena: self,
            next: Some(id),
        }
    }

    /// Return the id of the root of the tree containing `id`.
    pub fn root_of(&self, id: EntryId) -> EntryId {
        self.chain(id).last().map(|(root, _)| root).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &SptEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (EntryId(i as u32), e))
    }
}

/// Iterator over a parent chain.
pub struct Chain<'a> {
    arena: &'a SptArena,
    next: Option<EntryId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (EntryId, &'a SptEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let entry = self.arena.get(id);
        self.next = entry.parent;
        Some((id, entry))
    }
}

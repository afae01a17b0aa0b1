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

//! The result of a shortest path query.

use crate::traits::{EdgeId, NodeId};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A path from a source to a target node.
///
/// The edges are original edges (never shortcuts) in the order from source to
/// target. A path that has not been found has no edges and infinite weight.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Debug)]
pub struct Path {
    found: bool,
    weight: f64,
    distance: f64,
    time: u64,
    edges: Vec<EdgeId>,
    nodes: Vec<NodeId>,
}

impl Path {
    /// The result of a query without path.
    pub fn not_found() -> Path {
        Path {
            found: false,
            weight: f64::INFINITY,
            distance: 0.0,
            time: 0,
            edges: vec![],
            nodes: vec![],
        }
    }

    pub(crate) fn new(weight: f64, distance: f64, time: u64, edges: Vec<EdgeId>, nodes: Vec<NodeId>) -> Path {
        debug_assert_eq!(edges.len() + 1, nodes.len());
        Path {
            found: true,
            weight,
            distance,
            time,
            edges,
            nodes,
        }
    }

    /// Return `true` if a path has been found.
    pub fn found(&self) -> bool {
        self.found
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The travel time in milliseconds.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// The original edges of the path from source to target.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// The nodes of the path, starting at the source.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

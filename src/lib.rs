// Copyright (c) 2015-2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! Bidirectional shortest path search on road graphs and contraction
//! hierarchies.
//!
//! The crate provides the search core of a routing engine: bidirectional
//! Dijkstra and A*-search, the upward search on a contraction hierarchy with
//! stall-on-demand, edge-based traversal with turn costs, and the
//! reconstruction of paths of original edges from the search trees
//! (including the recursive unpacking of shortcuts).
//!
//! # Example
//!
//! ```
//! use rs_chroute::{Buildable, Builder, VecGraph, SearchOptions};
//! use rs_chroute::search::{DijkstraBidirectionCH, RoutingAlgorithm};
//! use rs_chroute::weighting::ShortestWeighting;
//!
//! // 0 - 1 - 2 with node 1 contracted first
//! let g = VecGraph::new_with(|b| {
//!     let n = b.add_nodes(3);
//!     let e01 = b.add_edge(n[0], n[1], 1.0);
//!     let e12 = b.add_edge(n[1], n[2], 2.0);
//!     b.add_shortcut(n[0], n[2], [e01, e12], 3.0, 300).unwrap();
//!     b.add_shortcut(n[2], n[0], [e12, e01], 3.0, 300).unwrap();
//!     b.set_level(n[0], 1);
//!     b.set_level(n[1], 0);
//!     b.set_level(n[2], 2);
//! });
//! let w = ShortestWeighting::default();
//!
//! let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
//! let path = algo.calc_path(0, 2).unwrap();
//! assert!(path.found());
//! assert_eq!(path.weight(), 3.0);
//! assert_eq!(path.nodes(), &[0, 1, 2]);
//! ```

// # Data structures

pub mod traits;
pub use self::traits::{ChGraph, Direction, EdgeId, EdgeRef, NodeId, RoutingGraph, ANY_EDGE, NO_EDGE};

pub mod builder;
pub use self::builder::{Buildable, Builder};

pub mod vecgraph;
pub use self::vecgraph::VecGraph;

pub mod collections;

pub mod spt;
pub mod frontier;

// # Searches

pub mod error;
pub use self::error::{Error, ErrorKind, Result};

pub mod options;
pub use self::options::{SearchOptions, StallPolicy, TraversalMode};

pub mod weighting;
pub use self::weighting::{TimeDependentWeighting, Weighting};

pub mod path;
pub use self::path::Path;

pub mod unpack;
pub mod extract;

pub mod search;
pub use self::search::{
    AStarBidirection, BidirRoutingAlgorithm, DijkstraBidirection, DijkstraBidirectionCH, DijkstraOneToMany,
    RoutingAlgorithm, TimeDependentDijkstra,
};

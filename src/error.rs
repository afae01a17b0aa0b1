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

//! Errors raised by the search algorithms.
//!
//! Note that a missing path is *not* an error. It is reported as a
//! [`Path`](crate::Path) with `found() == false`.

use crate::traits::{EdgeId, NodeId};

use thiserror::Error;

/// Classification of an [`Error`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The caller used an algorithm in a way it does not support.
    Misuse,
    /// The internal state of a search is inconsistent.
    InvariantViolation,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("search instance has already been used, create a new one for each query")]
    AlreadyRun,

    #[error("one-to-many search is fixed to source {fixed}, cannot query from {requested}")]
    SourceMismatch { fixed: NodeId, requested: NodeId },

    #[error("node {node} out of range, graph has {num_nodes} nodes")]
    NodeOutOfRange { node: NodeId, num_nodes: usize },

    #[error("edge restrictions require edge-based traversal")]
    EdgeRestrictionRequiresEdgeBased,

    #[error("stall-on-demand requires node-based traversal")]
    StallingRequiresNodeBased,

    #[error("weightings with turn costs require edge-based traversal in a hierarchy")]
    TurnCostsRequireEdgeBased,

    #[error("a hierarchy search cannot be combined with a potential")]
    PotentialOnHierarchy,

    #[error("{0} does not support edge-based traversal")]
    UnsupportedTraversal(&'static str),

    #[error("meeting entries at different nodes: forward {fwd_node}, backward {bwd_node}")]
    MeetingMismatch { fwd_node: NodeId, bwd_node: NodeId },

    #[error("edge {edge} does not connect nodes {from} and {to}")]
    ShortcutMismatch { edge: EdgeId, from: NodeId, to: NodeId },

    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            AlreadyRun
            | SourceMismatch { .. }
            | NodeOutOfRange { .. }
            | EdgeRestrictionRequiresEdgeBased
            | StallingRequiresNodeBased
            | TurnCostsRequireEdgeBased
            | PotentialOnHierarchy
            | UnsupportedTraversal(_) => ErrorKind::Misuse,
            MeetingMismatch { .. } | ShortcutMismatch { .. } | UnknownEdge(_) => ErrorKind::InvariantViolation,
        }
    }

    pub fn is_misuse(&self) -> bool {
        self.kind() == ErrorKind::Misuse
    }
}

pub type Result<T> = std::result::Result<T, Error>;

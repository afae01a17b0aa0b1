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

//! Edge and turn costs.
//!
//! A weighting assigns a weight and a travel time to each original edge and
//! direction, and optionally a cost to each turn `(in_edge, via_node,
//! out_edge)`. Infinite weights mark edges or turns that must not be used.
//! Shortcuts are never passed to a weighting, their aggregated values are
//! stored in the graph.

use crate::traits::{EdgeId, EdgeRef, NodeId};

use rustc_hash::FxHashMap;

/// Cost function of a search.
///
/// The `reverse` flag follows the convention of [`EdgeRef`]: if it is
/// `false` the edge is traversed from `base` to `adj`, otherwise from `adj`
/// to `base`.
pub trait Weighting {
    /// The weight of traversing an original edge.
    fn edge_weight(&self, e: &EdgeRef, reverse: bool) -> f64;

    /// The travel time of an original edge in milliseconds.
    fn edge_millis(&self, e: &EdgeRef, reverse: bool) -> u64;

    /// The weight of turning from `in_edge` to `out_edge` at `via`.
    fn turn_weight(&self, _in_edge: EdgeId, _via: NodeId, _out_edge: EdgeId) -> f64 {
        0.0
    }

    /// The time of turning from `in_edge` to `out_edge` at `via` in milliseconds.
    fn turn_millis(&self, _in_edge: EdgeId, _via: NodeId, _out_edge: EdgeId) -> u64 {
        0
    }

    /// Return `true` if turns may carry costs.
    ///
    /// Hierarchy searches reject such weightings in node-based traversal.
    fn has_turn_costs(&self) -> bool {
        false
    }
}

impl<'a, W> Weighting for &'a W
where
    W: Weighting + ?Sized,
{
    fn edge_weight(&self, e: &EdgeRef, reverse: bool) -> f64 {
        (**self).edge_weight(e, reverse)
    }

    fn edge_millis(&self, e: &EdgeRef, reverse: bool) -> u64 {
        (**self).edge_millis(e, reverse)
    }

    fn turn_weight(&self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) -> f64 {
        (**self).turn_weight(in_edge, via, out_edge)
    }

    fn turn_millis(&self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) -> u64 {
        (**self).turn_millis(in_edge, via, out_edge)
    }

    fn has_turn_costs(&self) -> bool {
        (**self).has_turn_costs()
    }
}

/// A weighting whose edge costs depend on the time of entering the edge.
///
/// The travel times must satisfy the FIFO property: entering an edge later
/// never results in leaving it earlier.
pub trait TimeDependentWeighting: Weighting {
    /// The travel time of an original edge entered at time `at`, or `None` if
    /// the edge cannot be traversed.
    fn td_edge_millis(&self, e: &EdgeRef, reverse: bool, at: u64) -> Option<u64>;

    /// The weight of an original edge entered at time `at`.
    ///
    /// Defaults to the travel time in seconds.
    fn td_edge_weight(&self, e: &EdgeRef, reverse: bool, at: u64) -> f64 {
        self.td_edge_millis(e, reverse, at)
            .map(|ms| ms as f64 / 1000.0)
            .unwrap_or(f64::INFINITY)
    }
}

/// The weight of an edge as used by a search.
///
/// Shortcuts contribute their stored weight if traversed in storage
/// orientation, all other edges are evaluated by the weighting.
pub fn calc_weight<W>(weighting: &W, e: &EdgeRef, reverse: bool) -> f64
where
    W: Weighting + ?Sized,
{
    if !e.can_traverse(reverse) {
        return f64::INFINITY;
    }
    match e.shortcut_data() {
        Some(sc) => sc.weight,
        None => weighting.edge_weight(e, reverse),
    }
}

/// Weight equals distance.
///
/// Travel times are computed from a constant speed.
#[derive(Clone, Copy, Debug)]
pub struct ShortestWeighting {
    /// Speed in km/h.
    speed: f64,
}

impl ShortestWeighting {
    pub fn new(speed: f64) -> ShortestWeighting {
        ShortestWeighting { speed }
    }
}

impl Default for ShortestWeighting {
    fn default() -> Self {
        ShortestWeighting::new(36.0)
    }
}

impl Weighting for ShortestWeighting {
    fn edge_weight(&self, e: &EdgeRef, reverse: bool) -> f64 {
        if e.can_traverse(reverse) {
            e.distance
        } else {
            f64::INFINITY
        }
    }

    fn edge_millis(&self, e: &EdgeRef, _reverse: bool) -> u64 {
        (e.distance * 3600.0 / self.speed).round() as u64
    }
}

/// Turn costs of a graph.
///
/// Turns not in the table are free, except u-turns, which cost
/// `uturn_cost` (infinite by default, i.e. forbidden).
#[derive(Clone, Debug)]
pub struct TurnCostTable {
    costs: FxHashMap<(EdgeId, NodeId, EdgeId), f64>,
    uturn_cost: f64,
}

impl Default for TurnCostTable {
    fn default() -> Self {
        TurnCostTable {
            costs: FxHashMap::default(),
            uturn_cost: f64::INFINITY,
        }
    }
}

impl TurnCostTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_uturn_cost(mut self, cost: f64) -> Self {
        self.uturn_cost = cost;
        self
    }

    /// Set the cost (in seconds) of a turn.
    pub fn set_cost(&mut self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId, cost: f64) {
        self.costs.insert((in_edge, via, out_edge), cost);
    }

    /// Forbid a turn.
    pub fn restrict(&mut self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) {
        self.set_cost(in_edge, via, out_edge, f64::INFINITY)
    }

    pub fn cost(&self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) -> f64 {
        if in_edge == out_edge {
            return self.uturn_cost;
        }
        self.costs.get(&(in_edge, via, out_edge)).cloned().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Fastest weighting with per-edge speeds and turn costs.
///
/// Weights are travel times in seconds.
#[derive(Clone, Debug)]
pub struct SpeedWeighting {
    /// Speeds in km/h per edge, in storage orientation `[u -> v, v -> u]`.
    speeds: Vec<[f64; 2]>,
    default_speed: f64,
    turn_costs: TurnCostTable,
}

impl SpeedWeighting {
    /// Create a weighting with the same speed (in km/h) on all edges.
    pub fn new(default_speed: f64) -> SpeedWeighting {
        SpeedWeighting {
            speeds: vec![],
            default_speed,
            turn_costs: TurnCostTable::new(),
        }
    }

    pub fn with_turn_costs(mut self, turn_costs: TurnCostTable) -> Self {
        self.turn_costs = turn_costs;
        self
    }

    /// Set the speeds of an edge in both storage directions.
    pub fn set_speed(&mut self, e: EdgeId, forward: f64, backward: f64) {
        let i = e as usize;
        if self.speeds.len() <= i {
            self.speeds.resize(i + 1, [self.default_speed; 2]);
        }
        self.speeds[i] = [forward, backward];
    }

    pub fn turn_costs_mut(&mut self) -> &mut TurnCostTable {
        &mut self.turn_costs
    }

    fn speed(&self, e: &EdgeRef, reverse: bool) -> f64 {
        let dir = if e.follows_storage(reverse) { 0 } else { 1 };
        self.speeds
            .get(e.edge as usize)
            .map(|s| s[dir])
            .unwrap_or(self.default_speed)
    }

    fn seconds(&self, e: &EdgeRef, reverse: bool) -> f64 {
        let speed = self.speed(e, reverse);
        if !e.can_traverse(reverse) || speed <= 0.0 {
            f64::INFINITY
        } else {
            e.distance * 3.6 / speed
        }
    }
}

impl Weighting for SpeedWeighting {
    fn edge_weight(&self, e: &EdgeRef, reverse: bool) -> f64 {
        self.seconds(e, reverse)
    }

    fn edge_millis(&self, e: &EdgeRef, reverse: bool) -> u64 {
        let s = self.seconds(e, reverse);
        if s.is_finite() {
            (s * 1000.0).round() as u64
        } else {
            0
        }
    }

    fn turn_weight(&self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) -> f64 {
        self.turn_costs.cost(in_edge, via, out_edge)
    }

    fn turn_millis(&self, in_edge: EdgeId, via: NodeId, out_edge: EdgeId) -> u64 {
        let c = self.turn_costs.cost(in_edge, via, out_edge);
        if c.is_finite() {
            (c * 1000.0).round() as u64
        } else {
            0
        }
    }

    fn has_turn_costs(&self) -> bool {
        true
    }
}

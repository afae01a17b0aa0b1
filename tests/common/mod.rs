// Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Test fixtures shared by the integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_chroute::weighting::calc_weight;
use rs_chroute::{Buildable, Builder, EdgeId, NodeId, RoutingGraph, VecGraph, Weighting};

use std::collections::{BTreeMap, BTreeSet};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A graph without levels, given as list of edges `(u, v, distance, oneway)`.
pub fn graph(n: usize, edges: &[(NodeId, NodeId, f64, bool)]) -> VecGraph {
    VecGraph::new_with(|b| {
        b.add_nodes(n);
        for &(u, v, d, oneway) in edges {
            if oneway {
                b.add_oneway_edge(u, v, d);
            } else {
                b.add_edge(u, v, d);
            }
        }
    })
}

/// A random connected-ish graph with integral distances.
///
/// Every edge has a distance in `1..=9`, about a quarter of them are one-way.
pub fn random_graph(seed: u64, n: usize, m: usize) -> VecGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = vec![];
    // a spanning path keeps most nodes reachable
    for u in 1..n {
        let v = rng.gen_range(0..u) as NodeId;
        edges.push((v, u as NodeId, rng.gen_range(1..10) as f64, false));
    }
    while edges.len() < m {
        let u = rng.gen_range(0..n) as NodeId;
        let v = rng.gen_range(0..n) as NodeId;
        if u != v {
            edges.push((u, v, rng.gen_range(1..10) as f64, rng.gen_bool(0.25)));
        }
    }
    graph(n, &edges)
}

/// A random graph without parallel edges.
///
/// Distances and one-way edges are drawn as in [`random_graph`].
pub fn random_simple_graph(seed: u64, n: usize, m: usize) -> VecGraph {
    assert!(m <= n * (n - 1) / 2);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = BTreeSet::new();
    let mut edges = vec![];
    for u in 1..n {
        let v = rng.gen_range(0..u) as NodeId;
        pairs.insert((v, u as NodeId));
        edges.push((v, u as NodeId, rng.gen_range(1..10) as f64, false));
    }
    while edges.len() < m {
        let u = rng.gen_range(0..n) as NodeId;
        let v = rng.gen_range(0..n) as NodeId;
        if u != v && pairs.insert((u.min(v), u.max(v))) {
            edges.push((u, v, rng.gen_range(1..10) as f64, rng.gen_bool(0.25)));
        }
    }
    graph(n, &edges)
}

/// A directed arc of the graph being contracted.
#[derive(Clone, Copy, Debug)]
struct Arc {
    weight: f64,
    millis: u64,
    edge: EdgeId,
}

fn add_arc(arcs: &mut BTreeMap<(NodeId, NodeId), Arc>, u: NodeId, v: NodeId, arc: Arc) {
    if u == v || !arc.weight.is_finite() {
        return;
    }
    match arcs.get(&(u, v)) {
        Some(a) if a.weight <= arc.weight => (),
        _ => {
            arcs.insert((u, v), arc);
        }
    }
}

/// Contract `g` in the given node order.
///
/// This is a naive contraction without witness searches: whenever a node is
/// contracted, every pair of an incoming and an outgoing arc between
/// uncontracted neighbors gets a shortcut unless a lighter arc already
/// exists. The level of a node is its position in `order`. The original edges
/// keep their ids.
pub fn contract<W: Weighting>(g: &VecGraph, weighting: &W, order: &[NodeId]) -> VecGraph {
    assert_eq!(order.len(), g.num_nodes());
    let mut rank = vec![0; g.num_nodes()];
    for (i, &u) in order.iter().enumerate() {
        rank[u as usize] = i as u32;
    }

    let mut b = VecGraph::new_builder();
    b.add_nodes(g.num_nodes());
    for (u, &r) in rank.iter().enumerate() {
        b.set_level(u as NodeId, r);
    }

    // BTreeMap for a deterministic shortcut order
    let mut arcs: BTreeMap<(NodeId, NodeId), Arc> = BTreeMap::new();
    for e in 0..g.num_edges() as EdgeId {
        let r = g.edge(e).unwrap();
        let e2 = b.add_edge_with_access(r.base, r.adj, r.distance, [r.can_traverse(false), r.can_traverse(true)]);
        assert_eq!(e, e2);
        for &reverse in &[false, true] {
            if r.can_traverse(reverse) {
                let arc = Arc {
                    weight: calc_weight(weighting, &r, reverse),
                    millis: weighting.edge_millis(&r, reverse),
                    edge: e,
                };
                let (u, v) = if reverse { (r.adj, r.base) } else { (r.base, r.adj) };
                add_arc(&mut arcs, u, v, arc);
            }
        }
    }

    for &v in order {
        let ins: Vec<(NodeId, Arc)> = arcs
            .iter()
            .filter(|&(&(x, y), _)| y == v && rank[x as usize] > rank[v as usize])
            .map(|(&(x, _), &a)| (x, a))
            .collect();
        let outs: Vec<(NodeId, Arc)> = arcs
            .iter()
            .filter(|&(&(x, y), _)| x == v && rank[y as usize] > rank[v as usize])
            .map(|(&(_, y), &a)| (y, a))
            .collect();
        for &(u, a) in &ins {
            for &(w, c) in &outs {
                if u == w {
                    continue;
                }
                let weight = a.weight + c.weight;
                if arcs.get(&(u, w)).map(|x| x.weight <= weight).unwrap_or(false) {
                    continue;
                }
                let sc = b.add_shortcut(u, w, [a.edge, c.edge], weight, a.millis + c.millis).unwrap();
                add_arc(
                    &mut arcs,
                    u,
                    w,
                    Arc {
                        weight,
                        millis: a.millis + c.millis,
                        edge: sc,
                    },
                );
            }
        }
    }

    b.into_graph()
}

/// Contract `g` for edge-based searches.
///
/// Like [`contract`], but arcs are distinguished by their first and last
/// original edge, and a shortcut includes the turn cost at the contracted
/// node. Loops are never created, so the hierarchy is only exact if no
/// shortest path needs to return to a node to turn around.
pub fn contract_edge_based<W: Weighting>(g: &VecGraph, weighting: &W, order: &[NodeId]) -> VecGraph {
    assert_eq!(order.len(), g.num_nodes());
    let mut rank = vec![0; g.num_nodes()];
    for (i, &u) in order.iter().enumerate() {
        rank[u as usize] = i as u32;
    }

    let mut b = VecGraph::new_builder();
    b.add_nodes(g.num_nodes());
    for (u, &r) in rank.iter().enumerate() {
        b.set_level(u as NodeId, r);
    }

    // (from, to, first original edge, last original edge)
    let mut arcs: BTreeMap<(NodeId, NodeId, EdgeId, EdgeId), Arc> = BTreeMap::new();
    for e in 0..g.num_edges() as EdgeId {
        let r = g.edge(e).unwrap();
        let e2 = b.add_edge_with_access(r.base, r.adj, r.distance, [r.can_traverse(false), r.can_traverse(true)]);
        assert_eq!(e, e2);
        for &reverse in &[false, true] {
            if r.can_traverse(reverse) {
                let (u, v) = if reverse { (r.adj, r.base) } else { (r.base, r.adj) };
                let arc = Arc {
                    weight: calc_weight(weighting, &r, reverse),
                    millis: weighting.edge_millis(&r, reverse),
                    edge: e,
                };
                if arc.weight.is_finite() {
                    arcs.insert((u, v, e, e), arc);
                }
            }
        }
    }

    for &v in order {
        let ins: Vec<_> = arcs
            .iter()
            .filter(|&(&(x, y, _, _), _)| y == v && rank[x as usize] > rank[v as usize])
            .map(|(&(x, _, first, last), &a)| (x, first, last, a))
            .collect();
        let outs: Vec<_> = arcs
            .iter()
            .filter(|&(&(x, y, _, _), _)| x == v && rank[y as usize] > rank[v as usize])
            .map(|(&(_, y, first, last), &a)| (y, first, last, a))
            .collect();
        for &(u, first, in_last, a) in &ins {
            for &(w, out_first, last, c) in &outs {
                if u == w {
                    continue;
                }
                let weight = a.weight + weighting.turn_weight(in_last, v, out_first) + c.weight;
                if !weight.is_finite() {
                    continue;
                }
                let key = (u, w, first, last);
                if arcs.get(&key).map(|x| x.weight <= weight).unwrap_or(false) {
                    continue;
                }
                let millis = a.millis + weighting.turn_millis(in_last, v, out_first) + c.millis;
                let sc = b.add_shortcut(u, w, [a.edge, c.edge], weight, millis).unwrap();
                arcs.insert(key, Arc { weight, millis, edge: sc });
            }
        }
    }

    b.into_graph()
}

/// Contract `g` in the order of the node ids.
pub fn contract_by_id<W: Weighting>(g: &VecGraph, weighting: &W) -> VecGraph {
    let order: Vec<NodeId> = (0..g.num_nodes() as NodeId).collect();
    contract(g, weighting, &order)
}

/// Plain one-directional Dijkstra used as reference.
pub fn reference_distance<W: Weighting>(g: &VecGraph, weighting: &W, from: NodeId, to: NodeId) -> f64 {
    use rs_chroute::Direction;
    use std::cmp::Ordering;
    use std::collections::BinaryHeap;

    #[derive(PartialEq)]
    struct Item(f64, NodeId);
    impl Eq for Item {}
    impl PartialOrd for Item {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Item {
        fn cmp(&self, other: &Self) -> Ordering {
            other.0.partial_cmp(&self.0).unwrap_or(Ordering::Equal)
        }
    }

    let mut dist = vec![f64::INFINITY; g.num_nodes()];
    let mut heap = BinaryHeap::new();
    dist[from as usize] = 0.0;
    heap.push(Item(0.0, from));
    while let Some(Item(d, u)) = heap.pop() {
        if u == to {
            return d;
        }
        if d > dist[u as usize] {
            continue;
        }
        for e in g.edges(u, Direction::Forward) {
            if e.is_shortcut() {
                continue;
            }
            let nd = d + calc_weight(weighting, &e, false);
            if nd < dist[e.adj as usize] {
                dist[e.adj as usize] = nd;
                heap.push(Item(nd, e.adj));
            }
        }
    }
    f64::INFINITY
}

/// The sum of the weights of the original edges of a path.
pub fn path_weight<W: Weighting>(g: &VecGraph, weighting: &W, nodes: &[NodeId], edges: &[EdgeId]) -> f64 {
    edges
        .iter()
        .zip(nodes.windows(2))
        .map(|(&e, uv)| {
            let r = g.edge(e).unwrap();
            if r.base == uv[0] {
                calc_weight(weighting, &r, false)
            } else {
                calc_weight(weighting, &r.flip(), false)
            }
        })
        .sum()
}

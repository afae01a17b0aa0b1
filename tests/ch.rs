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

mod common;

use common::{contract, contract_by_id, graph, init_logger, path_weight, random_graph, reference_distance};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rs_chroute::search::{BidirSearch, DijkstraBidirectionCH, RoutingAlgorithm, UpwardEdges};
use rs_chroute::weighting::ShortestWeighting;
use rs_chroute::{
    Buildable, Builder, Error, NodeId, RoutingGraph, SearchOptions, StallPolicy, TraversalMode, VecGraph,
};

/// A hierarchy in which the upward search from node 1 reaches node 9 first
/// via the expensive edge `3 -> 9` and later via `8 -> 9`. The nodes 3 to 7
/// are reached cheaply from 8 and can be stalled.
fn stalling_graph() -> VecGraph {
    VecGraph::new_with(|b| {
        b.add_nodes(10);
        b.add_oneway_edge(8, 9, 100.0);
        b.add_oneway_edge(8, 3, 2.0);
        b.add_oneway_edge(8, 5, 1.0);
        b.add_oneway_edge(8, 6, 1.0);
        b.add_oneway_edge(8, 7, 1.0);
        b.add_oneway_edge(1, 2, 2.0);
        b.add_oneway_edge(1, 8, 1.0);
        b.add_oneway_edge(2, 3, 3.0);
        for i in 3..7 {
            b.add_oneway_edge(i, i + 1, 1.0);
        }
        b.add_oneway_edge(9, 0, 1.0);
        b.add_oneway_edge(3, 9, 200.0);
        for u in 0..10 {
            b.set_level(u, u);
        }
    })
}

#[test]
fn test_stalling_reduces_visited_nodes() {
    init_logger();
    let g = stalling_graph();
    let w = ShortestWeighting::default();

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
    let path = algo.calc_path(1, 0).unwrap();
    assert!(path.found());
    assert_eq!(path.distance(), 102.0);
    assert_eq!(path.nodes(), &[1, 8, 9, 0]);
    assert_eq!(path.edges(), &[6, 0, 12]);
    assert_eq!(algo.visited_nodes(), 7);

    let options = SearchOptions::default().with_stalling(StallPolicy::Disabled);
    let mut algo = DijkstraBidirectionCH::new(&g, &w, options).unwrap();
    let path = algo.calc_path(1, 0).unwrap();
    assert_eq!(path.distance(), 102.0);
    assert_eq!(path.nodes(), &[1, 8, 9, 0]);
    assert_eq!(algo.visited_nodes(), 11);

    let options = SearchOptions::default().with_stalling(StallPolicy::Aggressive);
    let mut algo = DijkstraBidirectionCH::new(&g, &w, options).unwrap();
    let path = algo.calc_path(1, 0).unwrap();
    assert_eq!(path.nodes(), &[1, 8, 9, 0]);
}

#[test]
fn test_single_shortcut() {
    // U = 0, X = 1, V = 2 with X contracted first
    let g = VecGraph::new_with(|b| {
        b.add_nodes(3);
        let ux = b.add_edge(0, 1, 2.0);
        let xv = b.add_edge(1, 2, 3.0);
        b.add_shortcut(0, 2, [ux, xv], 5.0, 500).unwrap();
        b.add_shortcut(2, 0, [xv, ux], 5.0, 500).unwrap();
        b.set_level(0, 1);
        b.set_level(1, 0);
        b.set_level(2, 2);
    });
    let w = ShortestWeighting::default();

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
    let path = algo.calc_path(0, 2).unwrap();
    assert!(path.found());
    assert_eq!(path.weight(), 5.0);
    assert_eq!(path.distance(), 5.0);
    assert_eq!(path.time(), 500);
    assert_eq!(path.edges(), &[0, 1]);
    assert_eq!(path.nodes(), &[0, 1, 2]);

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
    let path = algo.calc_path(2, 0).unwrap();
    assert_eq!(path.weight(), 5.0);
    assert_eq!(path.edges(), &[1, 0]);
    assert_eq!(path.nodes(), &[2, 1, 0]);
}

#[test]
fn test_nested_shortcuts() {
    init_logger();
    let edges: Vec<_> = (0..6).map(|u| (u, u + 1, 1.0, false)).collect();
    let base = graph(7, &edges);
    let w = ShortestWeighting::default();
    // 1, 3 and 5 first, then 2 and 4, so 0 and 6 are connected by nested shortcuts
    let g = contract(&base, &w, &[1, 3, 5, 2, 4, 0, 6]);
    assert!(g.num_edges() > base.num_edges());

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
    let path = algo.calc_path(0, 6).unwrap();
    assert!(path.found());
    assert_eq!(path.weight(), 6.0);
    assert_eq!(path.edges(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(path.nodes(), &[0, 1, 2, 3, 4, 5, 6]);
    assert!(path.edges().iter().all(|&e| (e as usize) < base.num_edges()));

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default()).unwrap();
    let path = algo.calc_path(6, 1).unwrap();
    assert_eq!(path.weight(), 5.0);
    assert_eq!(path.nodes(), &[6, 5, 4, 3, 2, 1]);
}

#[test]
fn test_random_hierarchies() {
    init_logger();
    let w = ShortestWeighting::default();
    let policies = [StallPolicy::Disabled, StallPolicy::SingleHop, StallPolicy::Aggressive];

    for seed in 0..6 {
        let base = random_graph(seed, 30, 70);
        let mut order: Vec<NodeId> = (0..30).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed + 100));
        let g = if seed % 2 == 0 {
            contract(&base, &w, &order)
        } else {
            contract_by_id(&base, &w)
        };

        for s in 0..10 {
            for t in 20..30 {
                let expected = reference_distance(&base, &w, s, t);
                for &policy in &policies {
                    let options = SearchOptions::default().with_stalling(policy);
                    let mut algo = DijkstraBidirectionCH::new(&g, &w, options).unwrap();
                    let path = algo.calc_path(s, t).unwrap();
                    if !expected.is_finite() {
                        assert!(!path.found());
                        continue;
                    }
                    let msg = format!("seed {} {} -> {} ({:?})", seed, s, t, policy);
                    assert!(path.found(), "{}", msg);
                    assert_eq!(path.weight(), expected, "{}", msg);
                    assert_eq!(path.nodes().first(), Some(&s), "{}", msg);
                    assert_eq!(path.nodes().last(), Some(&t), "{}", msg);
                    assert_eq!(path_weight(&g, &w, path.nodes(), path.edges()), expected, "{}", msg);
                    assert!(path.edges().iter().all(|&e| (e as usize) < base.num_edges()));
                }
            }
        }
    }
}

#[test]
fn test_ch_weight_limit() {
    let edges: Vec<_> = (0..6).map(|u| (u, u + 1, 1.0, false)).collect();
    let base = graph(7, &edges);
    let w = ShortestWeighting::default();
    let g = contract_by_id(&base, &w);

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default().with_weight_limit(5.0)).unwrap();
    assert!(!algo.calc_path(0, 6).unwrap().found());

    let mut algo = DijkstraBidirectionCH::new(&g, &w, SearchOptions::default().with_weight_limit(6.0)).unwrap();
    assert_eq!(algo.calc_path(0, 6).unwrap().weight(), 6.0);
}

#[test]
fn test_stalling_requires_node_based() {
    let g = stalling_graph();
    let w = ShortestWeighting::default();
    let options = SearchOptions {
        traversal: TraversalMode::EdgeBased,
        ..Default::default()
    };
    let err = DijkstraBidirectionCH::new(&g, &w, options).err();
    assert_eq!(err, Some(Error::StallingRequiresNodeBased));

    assert!(DijkstraBidirectionCH::new(&g, &w, SearchOptions::edge_based()).is_ok());
}

#[test]
fn test_hierarchy_rejects_potential() {
    let g = stalling_graph();
    let w = ShortestWeighting::default();
    let potential = |u: NodeId| u as f64;
    let err = BidirSearch::with_parts(&g, &w, UpwardEdges, potential, SearchOptions::default()).err();
    assert_eq!(err, Some(Error::PotentialOnHierarchy));
}

#[test]
fn test_names() {
    let g = stalling_graph();
    let w = ShortestWeighting::default();
    let name = |options: SearchOptions| DijkstraBidirectionCH::new(&g, &w, options).unwrap().name();

    assert_eq!(name(SearchOptions::default()), "dijkstrabi|ch");
    assert_eq!(
        name(SearchOptions::default().with_stalling(StallPolicy::Disabled)),
        "dijkstrabi|ch|nosod"
    );
    assert_eq!(
        name(SearchOptions::default().with_stalling(StallPolicy::Aggressive)),
        "dijkstrabi|ch|aggressive_sod"
    );
    assert_eq!(name(SearchOptions::edge_based()), "dijkstrabi|ch|nosod|edge");
}

//! End-to-end checks of the graph store and its search algorithms, cross
//! validated against naive reimplementations and petgraph.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::dijkstra as petgraph_dijkstra;
use petgraph::graph::DiGraph;

use sextant::{reconstruct_path, Distance, Graph};

fn simple_graph() -> Graph<&'static str> {
    Graph::from_adjacency([
        ("a", vec!["b", "e"]),
        ("b", vec!["a", "f"]),
        ("c", vec!["d", "f", "g"]),
        ("d", vec!["c", "g", "h"]),
        ("e", vec!["a"]),
        ("f", vec!["b", "c", "g"]),
        ("g", vec!["c", "d", "f", "h"]),
        ("h", vec!["d", "g"]),
    ])
}

fn dag() -> Graph<&'static str> {
    Graph::from_adjacency([
        ("a", vec!["b", "d"]),
        ("b", vec!["e"]),
        ("c", vec!["e", "f"]),
        ("d", vec![]),
        ("e", vec!["d"]),
        ("f", vec![]),
    ])
}

fn weighted_graph() -> Graph<&'static str, i64> {
    Graph::from_weighted_adjacency([
        ("s", vec![("a", 1), ("b", 4)]),
        ("a", vec![("b", 2), ("c", 6)]),
        ("b", vec![("c", 1), ("d", 7)]),
        ("c", vec![("d", 2)]),
        ("d", vec![]),
        ("z", vec![("s", 1)]),
    ])
}

// Plain frontier-expansion BFS, independent of the library's bookkeeping.
fn naive_levels(
    graph: &Graph<&'static str>,
    source: &'static str,
) -> HashMap<&'static str, usize> {
    let mut levels = HashMap::new();
    let mut seen = HashSet::new();
    let mut frontier = VecDeque::new();
    levels.insert(source, 0usize);
    seen.insert(source);
    frontier.push_back((source, 0usize));
    while let Some((node, depth)) = frontier.pop_front() {
        for &neighbor in graph.adjacent(&node).unwrap() {
            if seen.insert(neighbor) {
                levels.insert(neighbor, depth + 1);
                frontier.push_back((neighbor, depth + 1));
            }
        }
    }
    levels
}

#[test]
fn bfs_levels_match_brute_force_from_every_source() {
    let graph = simple_graph();
    let vertices: Vec<&str> = graph.vertices().copied().collect();

    for source in &vertices {
        let bfs = graph.breadth_first_search(source, None).unwrap();
        let expected = naive_levels(&graph, *source);
        for vertex in &vertices {
            let want = expected
                .get(vertex)
                .map_or(Distance::Infinite, |&d| Distance::Finite(d));
            assert_eq!(bfs.level[vertex], want, "level of {vertex} from {source}");
        }
    }
}

#[test]
fn bfs_parents_walk_back_to_the_source() {
    let graph = simple_graph();
    let bfs = graph.breadth_first_search(&"a", None).unwrap();
    for vertex in ["b", "e", "f", "c", "g", "d", "h"] {
        let path = reconstruct_path(&vertex, &bfs.parent).unwrap();
        assert_eq!(path.first(), Some(&"a"));
        assert_eq!(path.last(), Some(&vertex));
        for pair in path.windows(2) {
            assert!(graph.is_adjacent(&pair[0], &pair[1]));
        }
        // A shortest path has exactly level-many edges.
        assert_eq!(Distance::Finite(path.len() - 1), bfs.level[&vertex]);
    }
}

#[test]
fn topological_sort_is_valid_on_the_dag() {
    let graph = dag();
    let order = graph.topological_sort();
    assert_eq!(order.len(), graph.vertex_count());

    let position: HashMap<&str, usize> =
        order.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    for (from, to, _) in graph.edges() {
        assert!(position[from] < position[to], "edge ({from}, {to}) backward");
    }
}

#[test]
fn cycle_detection_follows_the_edge_set() {
    assert!(!dag().is_cyclic());

    // A back edge closes a cycle.
    let mut looped = dag();
    looped.add_edge(&"d", &"a").unwrap();
    assert!(looped.is_cyclic());

    // A self-loop alone is already a cycle.
    let mut selfloop = dag();
    selfloop.add_edge(&"f", &"f").unwrap();
    assert!(selfloop.is_cyclic());

    // The cyclic digraph fixture.
    let digraph: Graph<&str> = Graph::from_adjacency([
        ("a", vec!["b", "d"]),
        ("b", vec!["e"]),
        ("c", vec!["e", "f"]),
        ("d", vec!["b"]),
        ("e", vec!["d"]),
        ("f", vec!["f"]),
    ]);
    assert!(digraph.is_cyclic());
}

#[test]
fn dijkstra_matches_petgraph() {
    let graph = weighted_graph();

    let mut oracle = DiGraph::<&str, i64>::new();
    let mut nodes = HashMap::new();
    for vertex in graph.vertices() {
        nodes.insert(*vertex, oracle.add_node(*vertex));
    }
    for (from, to, weight) in graph.edges() {
        oracle.add_edge(nodes[from], nodes[to], weight);
    }

    for source in graph.vertices() {
        let ours = graph.dijkstra(source).unwrap();
        let theirs = petgraph_dijkstra(&oracle, nodes[source], None, |e| *e.weight());
        for vertex in graph.vertices() {
            let want = theirs
                .get(&nodes[vertex])
                .map_or(Distance::Infinite, |&d| Distance::Finite(d));
            assert_eq!(ours.dist[vertex], want, "dist {source} -> {vertex}");
        }
    }
}

#[test]
fn a_star_agrees_with_dijkstra_for_every_pair() {
    let graph = weighted_graph();
    let vertices: Vec<&str> = graph.vertices().copied().collect();

    for source in &vertices {
        let paths = graph.dijkstra(source).unwrap();
        for destination in &vertices {
            let route = graph.a_star(source, destination, |_, _| 0).unwrap();
            match paths.dist[destination] {
                Distance::Finite(_) => {
                    let expected = reconstruct_path(destination, &paths.parent).unwrap();
                    assert_eq!(route, Some(expected), "{source} -> {destination}");
                }
                Distance::Infinite => {
                    assert_eq!(route, None, "{source} -> {destination}");
                }
            }
        }
    }
}

#[test]
fn removing_edges_reroutes_shortest_paths() {
    let mut graph = weighted_graph();
    assert_eq!(
        graph.a_star(&"s", &"d", |_, _| 0).unwrap(),
        Some(vec!["s", "a", "b", "c", "d"])
    );

    // Without (c, d) the route falls back to the direct (b, d) edge.
    graph.remove_edge(&"c", &"d").unwrap();
    assert_eq!(
        graph.a_star(&"s", &"d", |_, _| 0).unwrap(),
        Some(vec!["s", "a", "b", "d"])
    );

    graph.remove_edge(&"b", &"d").unwrap();
    assert_eq!(graph.a_star(&"s", &"d", |_, _| 0).unwrap(), None);
}

#[test]
fn search_results_serialize_to_json() {
    let graph = simple_graph();
    let bfs = graph.breadth_first_search(&"a", None).unwrap();
    let encoded = serde_json::to_string(&bfs).unwrap();
    assert!(encoded.contains("\"level\""));
    assert!(encoded.contains("\"parent\""));

    let distance: Distance<usize> = serde_json::from_str("{\"Finite\":3}").unwrap();
    assert_eq!(distance, Distance::Finite(3));
    let unreachable: Distance<usize> = serde_json::from_str("\"Infinite\"").unwrap();
    assert_eq!(unreachable, Distance::Infinite);
}

#[test]
fn eccentricity_survives_vertex_removal() {
    let mut graph = simple_graph();
    assert_eq!(graph.radius(), Some(Distance::Finite(3)));

    // Dropping "e" tightens the graph: recomputation must notice.
    graph.remove_vertex(&"e").unwrap();
    assert_eq!(graph.radius(), Some(Distance::Finite(2)));
    assert_eq!(graph.diameter(), Some(Distance::Finite(4)));
}

//! Dependency graph between programs, with a layered layout.
//!
//! Nodes are programs (one per name). Edges point from a dependency to the
//! program that depends on it, so leaf helpers sit in the leftmost layer.

use crate::display::truncate_id;
use crate::lmp::{Lmp, Trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const NODE_WIDTH: f64 = 160.0;
pub const NODE_HEIGHT: f64 = 48.0;
pub const H_GAP: f64 = 80.0;
pub const V_GAP: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Declared in the latest version's source
    Uses,
    /// Observed at runtime
    Trace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Program name
    pub id: String,
    pub label: String,
    pub version_count: usize,
    pub layer: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    pub fn build(lmps: &[Lmp], traces: &[Trace]) -> Self {
        // Any version id resolves to its program's name
        let owner: HashMap<&str, &str> = lmps
            .iter()
            .flat_map(|lmp| {
                lmp.versions
                    .iter()
                    .map(move |v| (v.lmp_id.as_str(), lmp.name.as_str()))
            })
            .collect();

        let mut edge_map: BTreeMap<(String, String), EdgeKind> = BTreeMap::new();

        for lmp in lmps {
            for used in &lmp.uses {
                if let Some(dep) = owner.get(used.as_str()) {
                    if *dep != lmp.name {
                        edge_map.insert((dep.to_string(), lmp.name.clone()), EdgeKind::Uses);
                    }
                }
            }
        }

        for trace in traces {
            let (Some(consumed), Some(consumer)) = (
                owner.get(trace.consumed.as_str()),
                owner.get(trace.consumer.as_str()),
            ) else {
                continue;
            };
            if consumed == consumer {
                continue;
            }
            edge_map
                .entry((consumed.to_string(), consumer.to_string()))
                .or_insert(EdgeKind::Trace);
        }

        let edges: Vec<GraphEdge> = edge_map
            .into_iter()
            .map(|((from, to), kind)| GraphEdge { from, to, kind })
            .collect();

        let mut names: Vec<&str> = lmps.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();

        let layers = assign_layers(&names, &edges);

        let mut by_layer: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for name in &names {
            by_layer.entry(layers[*name]).or_default().push(*name);
        }

        let version_counts: HashMap<&str, usize> = lmps
            .iter()
            .map(|l| (l.name.as_str(), l.versions.len()))
            .collect();

        let mut nodes = Vec::with_capacity(names.len());
        for (layer, members) in by_layer {
            for (index, name) in members.into_iter().enumerate() {
                nodes.push(GraphNode {
                    id: name.to_string(),
                    label: truncate_id(name),
                    version_count: version_counts.get(name).copied().unwrap_or(0),
                    layer,
                    x: layer as f64 * (NODE_WIDTH + H_GAP),
                    y: index as f64 * (NODE_HEIGHT + V_GAP),
                });
            }
        }

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Canvas width needed to draw every node
    pub fn width(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.x + NODE_WIDTH)
            .fold(0.0, f64::max)
    }

    /// Canvas height needed to draw every node
    pub fn height(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.y + NODE_HEIGHT)
            .fold(0.0, f64::max)
    }
}

/// Longest-path layering. Back edges found by a depth-first walk are ignored
/// so cycles cannot push layers up without bound.
fn assign_layers<'a>(names: &[&'a str], edges: &[GraphEdge]) -> HashMap<&'a str, usize> {
    let index: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
    for edge in edges {
        if let (Some(&from), Some(&to)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
        {
            adjacency[from].push(to);
        }
    }

    let back_edges = find_back_edges(&adjacency);

    let mut layer = vec![0usize; names.len()];
    // The forward subgraph is acyclic, so this settles within n passes
    for _ in 0..names.len() {
        let mut changed = false;
        for (from, targets) in adjacency.iter().enumerate() {
            for &to in targets {
                if back_edges.contains(&(from, to)) {
                    continue;
                }
                if layer[to] < layer[from] + 1 {
                    layer[to] = layer[from] + 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    names
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, layer[i]))
        .collect()
}

fn find_back_edges(adjacency: &[Vec<usize>]) -> HashSet<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; adjacency.len()];
    let mut back = HashSet::new();

    for root in 0..adjacency.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        // (node, next child position)
        let mut stack = vec![(root, 0usize)];
        marks[root] = Mark::OnStack;

        while let Some((node, child)) = stack.last_mut() {
            let node = *node;
            if let Some(&next) = adjacency[node].get(*child) {
                *child += 1;
                match marks[next] {
                    Mark::Unvisited => {
                        marks[next] = Mark::OnStack;
                        stack.push((next, 0));
                    }
                    Mark::OnStack => {
                        back.insert((node, next));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    back
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmp::LmpVersion;

    fn lmp(name: &str, ids: &[&str], uses: &[&str]) -> Lmp {
        Lmp {
            name: name.to_string(),
            source: String::new(),
            uses: uses.iter().map(|s| s.to_string()).collect(),
            versions: ids
                .iter()
                .enumerate()
                .map(|(i, id)| LmpVersion {
                    lmp_id: id.to_string(),
                    created_at: 100 - i as i64,
                    invocations: 0,
                    source: String::new(),
                })
                .collect(),
        }
    }

    fn trace(consumer: &str, consumed: &str) -> Trace {
        Trace {
            consumer: consumer.to_string(),
            consumed: consumed.to_string(),
        }
    }

    #[test]
    fn test_uses_edges_point_from_dependency() {
        let lmps = vec![lmp("writer", &["w1"], &["h1"]), lmp("helper", &["h1"], &[])];
        let graph = DependencyGraph::build(&lmps, &[]);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, "helper");
        assert_eq!(graph.edges[0].to, "writer");
        assert_eq!(graph.edges[0].kind, EdgeKind::Uses);
        assert_eq!(graph.node("helper").unwrap().layer, 0);
        assert_eq!(graph.node("writer").unwrap().layer, 1);
    }

    #[test]
    fn test_trace_edges_resolve_old_versions() {
        let lmps = vec![lmp("a", &["a2", "a1"], &[]), lmp("b", &["b1"], &[])];
        let graph = DependencyGraph::build(&lmps, &[trace("a1", "b1")]);

        assert_eq!(
            graph.edges,
            vec![GraphEdge {
                from: "b".to_string(),
                to: "a".to_string(),
                kind: EdgeKind::Trace,
            }]
        );
    }

    #[test]
    fn test_uses_wins_over_duplicate_trace() {
        let lmps = vec![lmp("a", &["a1"], &["b1"]), lmp("b", &["b1"], &[])];
        let graph = DependencyGraph::build(&lmps, &[trace("a1", "b1"), trace("a1", "b1")]);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].kind, EdgeKind::Uses);
    }

    #[test]
    fn test_self_loops_and_unknown_ids_dropped() {
        let lmps = vec![lmp("a", &["a2", "a1"], &["a1", "ghost"])];
        let graph = DependencyGraph::build(&lmps, &[trace("a2", "a1"), trace("x", "a1")]);

        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes.len(), 1);
    }

    #[test]
    fn test_chain_layers_and_positions() {
        let lmps = vec![
            lmp("c", &["c1"], &["b1"]),
            lmp("b", &["b1"], &["a1"]),
            lmp("a", &["a1"], &[]),
            lmp("d", &["d1"], &[]),
        ];
        let graph = DependencyGraph::build(&lmps, &[]);

        assert_eq!(graph.node("a").unwrap().layer, 0);
        assert_eq!(graph.node("d").unwrap().layer, 0);
        assert_eq!(graph.node("b").unwrap().layer, 1);
        assert_eq!(graph.node("c").unwrap().layer, 2);

        // "a" and "d" share layer 0, ordered by name
        assert_eq!(graph.node("a").unwrap().y, 0.0);
        assert_eq!(graph.node("d").unwrap().y, NODE_HEIGHT + V_GAP);
        assert_eq!(graph.node("c").unwrap().x, 2.0 * (NODE_WIDTH + H_GAP));
        assert_eq!(graph.width(), 2.0 * (NODE_WIDTH + H_GAP) + NODE_WIDTH);
        assert_eq!(graph.height(), NODE_HEIGHT + V_GAP + NODE_HEIGHT);
    }

    #[test]
    fn test_cycle_terminates_with_bounded_layers() {
        let lmps = vec![lmp("a", &["a1"], &["b1"]), lmp("b", &["b1"], &["a1"])];
        let graph = DependencyGraph::build(&lmps, &[]);

        assert_eq!(graph.edges.len(), 2);
        let layers: Vec<usize> = graph.nodes.iter().map(|n| n.layer).collect();
        assert!(layers.iter().all(|&l| l <= 1));
        assert_ne!(graph.node("a").unwrap().layer, graph.node("b").unwrap().layer);
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::build(&[], &[]);
        assert!(graph.nodes.is_empty());
        assert_eq!(graph.width(), 0.0);
        assert_eq!(graph.height(), 0.0);
    }
}

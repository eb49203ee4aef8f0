//! Reference graph types: method nodes, call edges, statements.

use codevo_core::errors::{SimulationError, SimulationResult};
use codevo_core::types::collections::FxHashMap;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

/// One synthetic line of code inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// `int var<id> = <id>;`
    Declaration { id: u64 },
    /// `<class>.<method>();`
    Invocation { class: String, method: String },
}

impl Statement {
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Declaration { .. })
    }

    /// True when this statement invokes `method`.
    pub fn invokes(&self, method: &str) -> bool {
        matches!(self, Self::Invocation { method: m, .. } if m == method)
    }
}

/// A method node in the reference graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    /// Name of the owning class.
    pub class: String,
    /// Always within [0, 1].
    pub fitness: f64,
    pub body: Vec<Statement>,
    /// Creation order; breaks fitness ties deterministically.
    pub seq: u64,
}

impl MethodNode {
    pub fn new(name: impl Into<String>, class: impl Into<String>, seq: u64) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            fitness: 0.0,
            body: Vec::new(),
            seq,
        }
    }

    /// Line count. Derived from the body so it can never go negative.
    pub fn lines(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn declaration_count(&self) -> usize {
        self.body.iter().filter(|s| s.is_declaration()).count()
    }

    pub fn invokes(&self, method: &str) -> bool {
        self.body.iter().any(|s| s.invokes(method))
    }
}

impl std::fmt::Display for MethodNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A call edge: the caller holds at least one invocation of the callee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge;

impl std::fmt::Display for CallEdge {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// The reference graph: a directed graph of method calls.
///
/// At most one edge exists per ordered (caller, callee) pair; repeated
/// invocations live in the caller's body.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    graph: StableGraph<MethodNode, CallEdge, Directed>,
    /// Method name → NodeIndex.
    index: FxHashMap<String, NodeIndex>,
    /// Bumped on every node or edge insertion/removal.
    revision: u64,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying petgraph graph.
    pub fn inner(&self) -> &StableGraph<MethodNode, CallEdge, Directed> {
        &self.graph
    }

    pub fn method_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Topology revision. Changes whenever a node or edge is added or removed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.graph.contains_node(idx)
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&MethodNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut MethodNode> {
        self.graph.node_weight_mut(idx)
    }

    /// Like `node`, but a missing node is an error.
    pub fn require(&self, idx: NodeIndex) -> SimulationResult<&MethodNode> {
        self.graph
            .node_weight(idx)
            .ok_or_else(|| SimulationError::UnknownMethod {
                name: format!("#{}", idx.index()),
            })
    }

    pub fn require_mut(&mut self, idx: NodeIndex) -> SimulationResult<&mut MethodNode> {
        self.graph
            .node_weight_mut(idx)
            .ok_or_else(|| SimulationError::UnknownMethod {
                name: format!("#{}", idx.index()),
            })
    }

    /// Add a method node. Method names are unique across the whole graph.
    pub fn add_method(&mut self, node: MethodNode) -> SimulationResult<NodeIndex> {
        if self.index.contains_key(&node.name) {
            return Err(SimulationError::DuplicateName { name: node.name });
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(name, idx);
        self.revision += 1;
        Ok(idx)
    }

    /// Remove a method node together with all incident edges.
    pub fn remove_method(&mut self, idx: NodeIndex) -> SimulationResult<MethodNode> {
        let node = self
            .graph
            .remove_node(idx)
            .ok_or_else(|| SimulationError::UnknownMethod {
                name: format!("#{}", idx.index()),
            })?;
        self.index.remove(&node.name);
        self.revision += 1;
        Ok(node)
    }

    /// Add a call edge. Returns false if the edge already existed.
    pub fn add_call(&mut self, caller: NodeIndex, callee: NodeIndex) -> bool {
        if self.graph.find_edge(caller, callee).is_some() {
            return false;
        }
        self.graph.add_edge(caller, callee, CallEdge);
        self.revision += 1;
        true
    }

    /// Remove a call edge. Returns false if there was none.
    pub fn remove_call(&mut self, caller: NodeIndex, callee: NodeIndex) -> bool {
        match self.graph.find_edge(caller, callee) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn has_call(&self, caller: NodeIndex, callee: NodeIndex) -> bool {
        self.graph.find_edge(caller, callee).is_some()
    }

    /// Number of distinct callers (self-calls included).
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Outgoing).count()
    }

    /// Methods calling `idx`.
    pub fn callers(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect()
    }

    /// Methods called by `idx`.
    pub fn callees(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect()
    }

    /// Node indices in ascending index order.
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Iterate nodes with their data.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &MethodNode)> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|n| (idx, n)))
    }

    /// Iterate `(caller, callee)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |e| self.graph.edge_endpoints(e))
    }

    /// Total line count across all methods.
    pub fn total_lines(&self) -> u64 {
        self.iter().map(|(_, n)| n.lines() as u64).sum()
    }

    pub fn fitnesses(&self) -> Vec<f64> {
        self.iter().map(|(_, n)| n.fitness).collect()
    }

    /// Lowest fitness in the graph, `None` when empty.
    pub fn min_fitness(&self) -> Option<f64> {
        self.iter().map(|(_, n)| n.fitness).reduce(f64::min)
    }

    /// Set a method's fitness, clamped into [0, 1].
    pub fn set_fitness(&mut self, idx: NodeIndex, fitness: f64) -> SimulationResult<()> {
        let node = self.require_mut(idx)?;
        node.fitness = if fitness.is_nan() { 0.0 } else { fitness.clamp(0.0, 1.0) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(names: &[&str]) -> (ReferenceGraph, Vec<NodeIndex>) {
        let mut g = ReferenceGraph::new();
        let idx = names
            .iter()
            .enumerate()
            .map(|(i, n)| g.add_method(MethodNode::new(*n, "A", i as u64)).unwrap())
            .collect();
        (g, idx)
    }

    #[test]
    fn test_duplicate_method_name_rejected() {
        let (mut g, _) = graph_with(&["m"]);
        let err = g.add_method(MethodNode::new("m", "B", 9)).unwrap_err();
        assert!(matches!(err, SimulationError::DuplicateName { .. }));
        assert_eq!(g.method_count(), 1);
    }

    #[test]
    fn test_add_call_is_idempotent_per_pair() {
        let (mut g, idx) = graph_with(&["a", "b"]);
        assert!(g.add_call(idx[0], idx[1]));
        assert!(!g.add_call(idx[0], idx[1]));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.in_degree(idx[1]), 1);
        assert_eq!(g.callers(idx[1]), vec![idx[0]]);
    }

    #[test]
    fn test_remove_method_drops_edges_and_index() {
        let (mut g, idx) = graph_with(&["a", "b", "c"]);
        g.add_call(idx[0], idx[1]);
        g.add_call(idx[2], idx[1]);
        let before = g.revision();
        let removed = g.remove_method(idx[1]).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(g.edge_count(), 0);
        assert!(g.get("b").is_none());
        assert!(g.revision() > before);
        assert!(g.remove_method(idx[1]).is_err());
    }

    #[test]
    fn test_set_fitness_clamps() {
        let (mut g, idx) = graph_with(&["a"]);
        g.set_fitness(idx[0], 1.7).unwrap();
        assert_eq!(g.node(idx[0]).unwrap().fitness, 1.0);
        g.set_fitness(idx[0], -0.3).unwrap();
        assert_eq!(g.node(idx[0]).unwrap().fitness, 0.0);
        g.set_fitness(idx[0], f64::NAN).unwrap();
        assert_eq!(g.node(idx[0]).unwrap().fitness, 0.0);
    }
}

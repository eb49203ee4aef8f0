//! Centrality fitness: PageRank over the call graph plus size-dependent noise.
//!
//! Scores are normalized by the maximum rank so the most central method
//! scores 1.0. Noise half-width shrinks as a method's share of all lines grows.

use codevo_core::config::FitnessMethod;
use codevo_core::constants::CENTRALITY_TOLERANCE;
use codevo_core::types::collections::FxHashMap;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::Rng;

use super::FitnessStrategy;
use crate::graph::ReferenceGraph;

/// Normalized ranks for one graph revision.
#[derive(Debug, Clone)]
struct RankCache {
    revision: u64,
    scores: FxHashMap<NodeIndex, f64>,
    /// Score of a node nobody calls.
    baseline: f64,
}

#[derive(Debug, Clone)]
pub struct CentralityFitness {
    damping: f64,
    max_iterations: u32,
    noise: f64,
    cache: Option<RankCache>,
}

impl CentralityFitness {
    pub fn new(damping: f64, max_iterations: u32, noise: f64) -> Self {
        Self {
            damping,
            max_iterations,
            noise,
            cache: None,
        }
    }

    /// Normalized centrality of `node` without noise. Recomputes only when
    /// the graph topology changed since the last call.
    pub fn score(&mut self, graph: &ReferenceGraph, node: Option<NodeIndex>) -> f64 {
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |c| c.revision != graph.revision());
        if stale {
            self.cache = Some(self.compute(graph));
        }
        match (&self.cache, node) {
            (Some(cache), Some(idx)) => cache.scores.get(&idx).copied().unwrap_or(cache.baseline),
            (Some(cache), None) => cache.baseline,
            (None, _) => 0.0,
        }
    }

    fn compute(&self, graph: &ReferenceGraph) -> RankCache {
        let nodes = graph.node_indices();
        let ranks = page_rank(graph, &nodes, self.damping, self.max_iterations);
        let n = nodes.len().max(1) as f64;
        let max = ranks.iter().copied().fold(0.0f64, f64::max);
        let teleport = (1.0 - self.damping) / n;

        let (scores, baseline) = if max > f64::EPSILON {
            (
                nodes
                    .iter()
                    .zip(&ranks)
                    .map(|(idx, r)| (*idx, r / max))
                    .collect(),
                (teleport / max).min(1.0),
            )
        } else {
            (FxHashMap::default(), 1.0)
        };

        RankCache {
            revision: graph.revision(),
            scores,
            baseline,
        }
    }

    fn noise_half_width(&self, graph: &ReferenceGraph, node: Option<NodeIndex>) -> f64 {
        let total = graph.total_lines();
        let share = match node.and_then(|idx| graph.node(idx)) {
            Some(method) if total > 0 => method.lines() as f64 / total as f64,
            _ => 0.0,
        };
        self.noise * (1.0 - share)
    }
}

impl FitnessStrategy for CentralityFitness {
    fn method(&self) -> FitnessMethod {
        FitnessMethod::Centrality
    }

    fn fitness(&mut self, graph: &ReferenceGraph, node: Option<NodeIndex>, rng: &mut StdRng) -> f64 {
        let base = self.score(graph, node);
        let half = self.noise_half_width(graph, node);
        let noisy = if half > 0.0 {
            base + rng.gen_range(-half..=half)
        } else {
            base
        };
        noisy.clamp(0.0, 1.0)
    }
}

/// PageRank by power iteration. Dangling mass is spread uniformly.
/// Returns one rank per entry of `nodes`, summing to 1.
pub fn page_rank(
    graph: &ReferenceGraph,
    nodes: &[NodeIndex],
    damping: f64,
    max_iterations: u32,
) -> Vec<f64> {
    let n = nodes.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }

    let position: FxHashMap<NodeIndex, usize> =
        nodes.iter().enumerate().map(|(i, idx)| (*idx, i)).collect();
    let out_degree: Vec<usize> = nodes.iter().map(|idx| graph.out_degree(*idx)).collect();
    let incoming: Vec<Vec<usize>> = nodes
        .iter()
        .map(|idx| {
            graph
                .callers(*idx)
                .into_iter()
                .filter_map(|caller| position.get(&caller).copied())
                .collect()
        })
        .collect();

    let nf = n as f64;
    let mut scores = vec![1.0 / nf; n];
    for _ in 0..max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&j| out_degree[j] == 0)
            .map(|j| scores[j])
            .sum();
        let base = (1.0 - damping) / nf + damping * dangling / nf;

        let mut new_scores = vec![0.0f64; n];
        let mut diff = 0.0f64;
        for i in 0..n {
            let inflow: f64 = incoming[i]
                .iter()
                .map(|&j| scores[j] / out_degree[j] as f64)
                .sum();
            new_scores[i] = base + damping * inflow;
            diff += (new_scores[i] - scores[i]).abs();
        }

        scores = new_scores;
        if diff < nf * CENTRALITY_TOLERANCE {
            break;
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MethodNode;
    use rand::SeedableRng;

    /// hub ← a, hub ← b, hub ← c
    fn star() -> (ReferenceGraph, NodeIndex, Vec<NodeIndex>) {
        let mut g = ReferenceGraph::new();
        let hub = g.add_method(MethodNode::new("hub", "A", 0)).unwrap();
        let leaves: Vec<NodeIndex> = (1..=3)
            .map(|i| g.add_method(MethodNode::new(format!("m{i}"), "A", i)).unwrap())
            .collect();
        for leaf in &leaves {
            g.add_call(*leaf, hub);
        }
        (g, hub, leaves)
    }

    #[test]
    fn test_page_rank_sums_to_one() {
        let (g, _, _) = star();
        let nodes = g.node_indices();
        let ranks = page_rank(&g, &nodes, 0.9, 100);
        let total: f64 = ranks.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hub_is_most_central() {
        let (g, hub, leaves) = star();
        let mut fitness = CentralityFitness::new(0.9, 100, 0.0);
        assert!((fitness.score(&g, Some(hub)) - 1.0).abs() < 1e-9);
        for leaf in leaves {
            assert!(fitness.score(&g, Some(leaf)) < 1.0);
        }
    }

    #[test]
    fn test_unconnected_baseline_matches_leaf() {
        let (g, _, leaves) = star();
        let mut fitness = CentralityFitness::new(0.9, 100, 0.0);
        let baseline = fitness.score(&g, None);
        let leaf = fitness.score(&g, Some(leaves[0]));
        assert!(baseline > 0.0 && baseline <= leaf);
    }

    #[test]
    fn test_cache_follows_revision() {
        let (mut g, hub, leaves) = star();
        let mut fitness = CentralityFitness::new(0.9, 100, 0.0);
        let before = fitness.score(&g, Some(leaves[0]));
        g.add_call(hub, leaves[0]);
        let after = fitness.score(&g, Some(leaves[0]));
        assert!(after > before);
    }

    #[test]
    fn test_fitness_within_unit_interval_with_noise() {
        let (g, hub, leaves) = star();
        let mut rng = StdRng::seed_from_u64(11);
        let mut fitness = CentralityFitness::new(0.9, 100, 1.0);
        for _ in 0..200 {
            for node in [Some(hub), Some(leaves[1]), None] {
                let f = fitness.fitness(&g, node, &mut rng);
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn test_noise_shrinks_with_line_share() {
        use crate::graph::Statement;

        let mut g = ReferenceGraph::new();
        let heavy = g.add_method(MethodNode::new("heavy", "A", 0)).unwrap();
        let light = g.add_method(MethodNode::new("light", "A", 1)).unwrap();
        let fitness = CentralityFitness::new(0.9, 100, 0.5);

        // No lines anywhere: every method gets the full half-width.
        assert_eq!(fitness.noise_half_width(&g, Some(heavy)), 0.5);
        assert_eq!(fitness.noise_half_width(&g, Some(light)), 0.5);
        assert_eq!(fitness.noise_half_width(&g, None), 0.5);

        let body = &mut g.node_mut(heavy).unwrap().body;
        body.extend((0..9).map(|id| Statement::Declaration { id }));
        let heavy_width = fitness.noise_half_width(&g, Some(heavy));
        let light_width = fitness.noise_half_width(&g, Some(light));
        assert_eq!(heavy_width, 0.0);
        assert_eq!(light_width, 0.5);

        g.node_mut(light).unwrap().body.push(Statement::Declaration { id: 9 });
        let heavy_width = fitness.noise_half_width(&g, Some(heavy));
        let light_width = fitness.noise_half_width(&g, Some(light));
        assert!((heavy_width - 0.05).abs() < 1e-12);
        assert!((light_width - 0.45).abs() < 1e-12);
        assert!(heavy_width < light_width);
    }

    #[test]
    fn test_heavy_method_fitness_spreads_less() {
        use crate::graph::Statement;

        // Isolated nodes: both sit at the same normalized rank.
        let mut g = ReferenceGraph::new();
        let heavy = g.add_method(MethodNode::new("heavy", "A", 0)).unwrap();
        let light = g.add_method(MethodNode::new("light", "A", 1)).unwrap();
        let body = &mut g.node_mut(heavy).unwrap().body;
        body.extend((0..9).map(|id| Statement::Declaration { id }));
        g.node_mut(light).unwrap().body.push(Statement::Declaration { id: 9 });

        let mut rng = StdRng::seed_from_u64(4);
        let mut fitness = CentralityFitness::new(0.9, 100, 0.4);
        let base = fitness.score(&g, Some(heavy));
        assert!((base - 1.0).abs() < 1e-9);

        let spread = |node: NodeIndex, fitness: &mut CentralityFitness, rng: &mut StdRng| {
            let draws: Vec<f64> = (0..300).map(|_| fitness.fitness(&g, Some(node), rng)).collect();
            let lo = draws.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = draws.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (lo, hi - lo)
        };
        let (heavy_low, heavy_spread) = spread(heavy, &mut fitness, &mut rng);
        let (light_low, light_spread) = spread(light, &mut fitness, &mut rng);

        // heavy: half-width 0.04, light: half-width 0.36 (both clamped at 1.0 above).
        assert!(heavy_low >= 1.0 - 0.04 - 1e-12);
        assert!(light_low < 1.0 - 0.04);
        assert!(heavy_spread < light_spread);
    }

    #[test]
    fn test_single_node_scores_one() {
        let mut g = ReferenceGraph::new();
        let only = g.add_method(MethodNode::new("main", "App", 0)).unwrap();
        let mut fitness = CentralityFitness::new(0.9, 100, 0.0);
        assert_eq!(fitness.score(&g, Some(only)), 1.0);
    }
}

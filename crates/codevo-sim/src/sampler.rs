//! Unfit-method sampler: picks a method with a bias toward low fitness.

use codevo_core::config::{ModelConfig, SamplerShape};
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use statrs::distribution::{Continuous, Exp, Normal};

use crate::graph::ReferenceGraph;
use crate::random::weighted_pick;

/// Low-fitness-biased selection over methods ranked by ascending fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnfitSampler {
    /// Always the lowest-fitness method.
    Minimum,
    /// weight(rank) = Exp(rate).pdf(rank / n)
    Exponential { rate: f64 },
    /// weight(rank) = Normal(0, sigma).pdf(rank / n)
    TruncatedNormal { sigma: f64 },
}

impl Default for UnfitSampler {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}

impl UnfitSampler {
    pub fn from_config(config: &ModelConfig) -> Self {
        match config.effective_sampler() {
            SamplerShape::Minimum => Self::Minimum,
            SamplerShape::Exponential => Self::Exponential {
                rate: config.effective_exponential_rate(),
            },
            SamplerShape::TruncatedNormal => Self::TruncatedNormal {
                sigma: config.effective_normal_sigma(),
            },
        }
    }

    /// Methods sorted by ascending fitness, ties broken by creation order.
    pub fn ranked(graph: &ReferenceGraph) -> Vec<NodeIndex> {
        let mut ranked: Vec<(f64, u64, NodeIndex)> = graph
            .iter()
            .map(|(idx, node)| (node.fitness, node.seq, idx))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, _, idx)| idx).collect()
    }

    /// Unnormalized weight per rank position, `None` for `Minimum` or when
    /// the distribution cannot be built.
    pub fn weights(&self, n: usize) -> Option<Vec<f64>> {
        let nf = n as f64;
        let positions = (0..n).map(|rank| rank as f64 / nf);
        match *self {
            Self::Minimum => None,
            Self::Exponential { rate } => {
                let dist = Exp::new(rate).ok()?;
                Some(positions.map(|x| dist.pdf(x)).collect())
            }
            Self::TruncatedNormal { sigma } => {
                let dist = Normal::new(0.0, sigma).ok()?;
                Some(positions.map(|x| dist.pdf(x)).collect())
            }
        }
    }

    /// Pick an unfit method. `None` only on an empty graph.
    pub fn pick(&self, graph: &ReferenceGraph, rng: &mut StdRng) -> Option<NodeIndex> {
        let ranked = Self::ranked(graph);
        let lowest = *ranked.first()?;
        let usable = self
            .weights(ranked.len())
            .filter(|w| w.iter().all(|v| v.is_finite()) && w.iter().any(|v| *v > 0.0));
        match usable {
            Some(weights) => weighted_pick(&ranked, &weights, rng).or(Some(lowest)),
            None => Some(lowest),
        }
    }
}

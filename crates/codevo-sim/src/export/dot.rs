//! Graphviz DOT export of the reference graph.
//! Node color encodes the owning class, node size the in-degree.

use codevo_core::types::collections::FxHashMap;
use petgraph::dot::{Config, Dot};
use petgraph::Direction;

use crate::codebase::Codebase;

const PALETTE: [&str; 12] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#393b79", "#637939",
];

pub fn to_dot(codebase: &Codebase) -> String {
    let colors: FxHashMap<&str, &str> = codebase
        .classes()
        .iter()
        .enumerate()
        .map(|(i, class)| (class.name.as_str(), PALETTE[i % PALETTE.len()]))
        .collect();

    Dot::with_attr_getters(
        codebase.graph().inner(),
        &[Config::EdgeNoLabel],
        &|_, _| "color=\"grey\"".to_string(),
        &|g, (idx, node)| {
            let in_degree = g.neighbors_directed(idx, Direction::Incoming).count();
            let color = colors.get(node.class.as_str()).copied().unwrap_or("black");
            format!(
                "style=filled fillcolor=\"{color}\" width={:.2} tooltip=\"{}\"",
                0.3 + 0.1 * in_degree as f64,
                node.class
            )
        },
    )
    .to_string()
}

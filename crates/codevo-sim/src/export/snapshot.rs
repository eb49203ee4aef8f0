//! Serializable snapshot of a codebase plus reference/class summaries.

use codevo_core::errors::ExportError;
use serde::{Deserialize, Serialize};

use super::java;
use crate::codebase::Codebase;
use crate::graph::Statement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSnapshot {
    pub name: String,
    pub fitness: f64,
    pub lines: usize,
    pub in_degree: usize,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    pub name: String,
    pub parent: Option<String>,
    pub methods: Vec<MethodSnapshot>,
}

/// Classes in creation order, each with its methods in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebaseSnapshot {
    pub classes: Vec<ClassSnapshot>,
    pub method_count: usize,
    pub edge_count: usize,
    pub code_size: u64,
}

impl CodebaseSnapshot {
    pub fn capture(codebase: &Codebase) -> Self {
        let graph = codebase.graph();
        let classes = codebase
            .classes()
            .iter()
            .map(|class| ClassSnapshot {
                name: class.name.clone(),
                parent: class.parent.clone(),
                methods: class
                    .methods
                    .iter()
                    .filter_map(|name| graph.get(name))
                    .filter_map(|idx| {
                        graph.node(idx).map(|node| MethodSnapshot {
                            name: node.name.clone(),
                            fitness: node.fitness,
                            lines: node.lines(),
                            in_degree: graph.in_degree(idx),
                            body: node.body.clone(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            classes,
            method_count: graph.method_count(),
            edge_count: graph.edge_count(),
            code_size: codebase.code_size(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization {
            message: e.to_string(),
        })
    }

    /// One row per method: who it is and how many methods call it.
    pub fn reference_rows(&self) -> Vec<ReferenceRow> {
        self.classes
            .iter()
            .flat_map(|class| {
                class.methods.iter().map(move |m| ReferenceRow {
                    method: m.name.clone(),
                    class: class.name.clone(),
                    ref_count: m.in_degree,
                })
            })
            .collect()
    }

    /// One row per class with its live subclass count and rendered line count.
    pub fn class_rows(&self) -> Vec<ClassRow> {
        self.classes
            .iter()
            .map(|class| ClassRow {
                class: class.name.clone(),
                subclasses: self
                    .classes
                    .iter()
                    .filter(|c| c.parent.as_deref() == Some(class.name.as_str()))
                    .count(),
                lines: java::render_class(class).lines().count(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub method: String,
    pub class: String,
    pub ref_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRow {
    pub class: String,
    pub subclasses: usize,
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedSpec;

    #[test]
    fn test_snapshot_and_summaries() {
        let mut cb = Codebase::from_seed(&SeedSpec::default()).unwrap();
        let main = cb.graph().get("main").unwrap();
        let child = cb.create_class(Some("App".into())).unwrap();
        let helper = cb.create_method(&child).unwrap();
        cb.add_invocation(main, helper).unwrap();
        cb.add_declaration(helper).unwrap();

        let snap = CodebaseSnapshot::capture(&cb);
        assert_eq!(snap.classes.len(), 2);
        assert_eq!(snap.method_count, 2);
        assert_eq!(snap.edge_count, 1);
        assert_eq!(snap.code_size, 2);

        let refs = snap.reference_rows();
        let helper_row = refs.iter().find(|r| r.class == child).unwrap();
        assert_eq!(helper_row.ref_count, 1);

        let classes = snap.class_rows();
        assert_eq!(classes[0].class, "App");
        assert_eq!(classes[0].subclasses, 1);
        assert!(classes[1].lines > classes[1].subclasses);

        let json = snap.to_json().unwrap();
        let back: CodebaseSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.classes.len(), 2);
        assert_eq!(back.classes[1].methods[0].body, snap.classes[1].methods[0].body);
    }
}

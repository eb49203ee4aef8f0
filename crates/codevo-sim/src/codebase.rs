//! The mutable synthetic codebase: reference graph, classes and a name allocator.

use codevo_core::errors::{SimulationError, SimulationResult};
use codevo_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;

use crate::graph::{ClassNode, ClassRegistry, MethodNode, ReferenceGraph, Statement};
use crate::random::uniform_pick;
use crate::seed::SeedSpec;

/// A method removed from the codebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedMethod {
    pub name: String,
    pub class: String,
    /// The owning class lost its last method and was removed too.
    pub class_removed: bool,
}

/// Graph and class registry kept in sync. Every action operates on this.
#[derive(Debug, Clone, Default)]
pub struct Codebase {
    graph: ReferenceGraph,
    classes: ClassRegistry,
    /// Shared counter behind generated names, declaration ids and sequence numbers.
    counter: u64,
}

impl Codebase {
    /// Build a codebase from a seed. Calls and bodies start empty.
    pub fn from_seed(seed: &SeedSpec) -> SimulationResult<Self> {
        let mut codebase = Self::default();
        for class in &seed.classes {
            if class.methods.is_empty() {
                return Err(SimulationError::InvariantViolated {
                    message: format!("seed class '{}' has no methods", class.name),
                });
            }
            let seq = codebase.next_id();
            codebase
                .classes
                .add(ClassNode::new(&class.name, class.parent.clone(), seq))?;
            for method in &class.methods {
                codebase.insert_method(method, &class.name)?;
            }
        }
        if codebase.graph.is_empty() {
            return Err(SimulationError::EmptyCodebase);
        }
        Ok(codebase)
    }

    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ReferenceGraph {
        &mut self.graph
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn method_count(&self) -> usize {
        self.graph.method_count()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Total line count.
    pub fn code_size(&self) -> u64 {
        self.graph.total_lines()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.counter;
        self.counter += 1;
        id
    }

    /// Allocate `<prefix><n>`, skipping names already taken by seed entities.
    fn fresh_name(&mut self, prefix: &str) -> String {
        loop {
            let name = format!("{prefix}{}", self.next_id());
            if self.graph.get(&name).is_none() && !self.classes.contains(&name) {
                return name;
            }
        }
    }

    /// Create an empty class `Class_<n>`. The caller must give it a method
    /// before the step ends.
    pub fn create_class(&mut self, parent: Option<String>) -> SimulationResult<String> {
        let name = self.fresh_name("Class_");
        let seq = self.counter;
        self.classes.add(ClassNode::new(&name, parent, seq))?;
        Ok(name)
    }

    /// Create an empty method `method_<n>` in `class`. Fitness starts at 0.
    pub fn create_method(&mut self, class: &str) -> SimulationResult<NodeIndex> {
        if !self.classes.contains(class) {
            return Err(SimulationError::UnknownClass {
                name: class.to_string(),
            });
        }
        let name = self.fresh_name("method_");
        self.insert_method(&name, class)
    }

    fn insert_method(&mut self, name: &str, class: &str) -> SimulationResult<NodeIndex> {
        let seq = self.next_id();
        let idx = self.graph.add_method(MethodNode::new(name, class, seq))?;
        self.classes.attach_method(class, name)?;
        Ok(idx)
    }

    /// Append `int var<n> = <n>;` to a method.
    pub fn add_declaration(&mut self, idx: NodeIndex) -> SimulationResult<()> {
        let id = self.next_id();
        self.graph
            .require_mut(idx)?
            .body
            .push(Statement::Declaration { id });
        Ok(())
    }

    /// Remove one uniformly chosen declaration. Returns false if the body had none.
    pub fn remove_declaration(&mut self, idx: NodeIndex, rng: &mut StdRng) -> SimulationResult<bool> {
        let node = self.graph.require_mut(idx)?;
        let positions: Vec<usize> = node
            .body
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_declaration())
            .map(|(i, _)| i)
            .collect();
        match uniform_pick(&positions, rng) {
            Some(pos) => {
                node.body.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append an invocation of `callee` to `caller` and ensure the edge exists.
    pub fn add_invocation(&mut self, caller: NodeIndex, callee: NodeIndex) -> SimulationResult<()> {
        let target = self.graph.require(callee)?;
        let statement = Statement::Invocation {
            class: target.class.clone(),
            method: target.name.clone(),
        };
        self.graph.require_mut(caller)?.body.push(statement);
        self.graph.add_call(caller, callee);
        Ok(())
    }

    /// Delete every invocation of `callee` from `caller` and drop the edge.
    /// Returns the number of statements removed.
    pub fn remove_invocations(
        &mut self,
        caller: NodeIndex,
        callee: NodeIndex,
    ) -> SimulationResult<usize> {
        let callee_name = self.graph.require(callee)?.name.clone();
        let node = self.graph.require_mut(caller)?;
        let before = node.body.len();
        node.body.retain(|s| !s.invokes(&callee_name));
        let removed = before - node.body.len();
        self.graph.remove_call(caller, callee);
        Ok(removed)
    }

    /// Remove a method node and detach it from its class, removing the
    /// class if it became empty. Invocations held by callers are not touched.
    pub fn remove_method(&mut self, idx: NodeIndex) -> SimulationResult<RemovedMethod> {
        let node = self.graph.remove_method(idx)?;
        let class_removed = self.classes.detach_method(&node.class, &node.name)?;
        Ok(RemovedMethod {
            name: node.name,
            class: node.class,
            class_removed,
        })
    }

    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> SimulationResult<()> {
        let fail = |message: String| -> SimulationResult<()> {
            Err(SimulationError::InvariantViolated { message })
        };

        if self.graph.is_empty() {
            return Err(SimulationError::EmptyCodebase);
        }

        let mut listed = 0usize;
        for class in self.classes.iter() {
            if class.methods.is_empty() {
                return fail(format!("class '{}' has no methods", class.name));
            }
            for method in &class.methods {
                let Some(idx) = self.graph.get(method) else {
                    return fail(format!("class '{}' lists missing method '{method}'", class.name));
                };
                if self.graph.node(idx).map(|n| n.class.as_str()) != Some(class.name.as_str()) {
                    return fail(format!("method '{method}' not owned by '{}'", class.name));
                }
            }
            listed += class.methods.len();
        }
        if listed != self.graph.method_count() {
            return fail(format!(
                "{} methods in graph, {listed} listed by classes",
                self.graph.method_count()
            ));
        }

        for (idx, node) in self.graph.iter() {
            if !self.classes.contains(&node.class) {
                return fail(format!("method '{}' belongs to missing class '{}'", node.name, node.class));
            }
            if !(0.0..=1.0).contains(&node.fitness) {
                return fail(format!("method '{}' has fitness {}", node.name, node.fitness));
            }
            let mut invoked = FxHashSet::default();
            for statement in &node.body {
                if let Statement::Invocation { method, .. } = statement {
                    let Some(callee) = self.graph.get(method) else {
                        return fail(format!("'{}' invokes missing method '{method}'", node.name));
                    };
                    if !self.graph.has_call(idx, callee) {
                        return fail(format!("'{}' invokes '{method}' without an edge", node.name));
                    }
                    invoked.insert(callee);
                }
            }
            for callee in self.graph.callees(idx) {
                if !invoked.contains(&callee) {
                    return fail(format!("edge from '{}' has no invocation", node.name));
                }
            }
        }
        Ok(())
    }
}

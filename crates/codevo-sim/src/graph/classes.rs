//! Class registry: classes, their methods, and single inheritance.

use codevo_core::errors::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// A class grouping methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    /// Parent class name, if any.
    pub parent: Option<String>,
    /// Method names in creation order.
    pub methods: Vec<String>,
    pub seq: u64,
}

impl ClassNode {
    pub fn new(name: impl Into<String>, parent: Option<String>, seq: u64) -> Self {
        Self {
            name: name.into(),
            parent,
            methods: Vec::new(),
            seq,
        }
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

/// All live classes, kept in creation order.
///
/// A class is removed as soon as its last method goes. Parent links may
/// dangle afterwards; subclass counts only consider live classes.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassNode>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ClassNode> {
        self.classes.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> SimulationResult<&mut ClassNode> {
        self.classes
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| SimulationError::UnknownClass {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn add(&mut self, class: ClassNode) -> SimulationResult<()> {
        if self.contains(&class.name) {
            return Err(SimulationError::DuplicateName { name: class.name });
        }
        self.classes.push(class);
        Ok(())
    }

    pub fn attach_method(&mut self, class: &str, method: &str) -> SimulationResult<()> {
        self.get_mut(class)?.methods.push(method.to_string());
        Ok(())
    }

    /// Detach a method. Returns true if the class became empty and was removed.
    pub fn detach_method(&mut self, class: &str, method: &str) -> SimulationResult<bool> {
        let node = self.get_mut(class)?;
        let before = node.methods.len();
        node.methods.retain(|m| m != method);
        if node.methods.len() == before {
            return Err(SimulationError::UnknownMethod {
                name: format!("{class}.{method}"),
            });
        }
        if node.methods.is_empty() {
            self.classes.retain(|c| c.name != class);
            return Ok(true);
        }
        Ok(false)
    }

    /// Number of live classes naming `class` as parent.
    pub fn subclass_count(&self, class: &str) -> usize {
        self.classes
            .iter()
            .filter(|c| c.parent.as_deref() == Some(class))
            .count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }
}

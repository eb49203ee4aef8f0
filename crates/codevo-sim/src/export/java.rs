//! Java source rendering of a snapshot.

use std::fmt::Write;

use super::snapshot::{ClassSnapshot, CodebaseSnapshot};
use crate::graph::Statement;

/// Render one class as a Java compilation unit.
pub fn render_class(class: &ClassSnapshot) -> String {
    let mut out = String::new();
    match &class.parent {
        Some(parent) => {
            let _ = writeln!(out, "public class {} extends {} {{", class.name, parent);
        }
        None => {
            let _ = writeln!(out, "public class {} {{", class.name);
        }
    }
    for (i, method) in class.methods.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "    static void {}() {{", method.name);
        for statement in &method.body {
            let _ = match statement {
                Statement::Declaration { id } => writeln!(out, "        int var{id} = {id};"),
                Statement::Invocation { class, method } => {
                    writeln!(out, "        {class}.{method}();")
                }
            };
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

/// `(file name, source)` per class.
pub fn render_sources(snapshot: &CodebaseSnapshot) -> Vec<(String, String)> {
    snapshot
        .classes
        .iter()
        .map(|class| (format!("{}.java", class.name), render_class(class)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::snapshot::MethodSnapshot;

    #[test]
    fn test_render_class_with_parent_and_body() {
        let class = ClassSnapshot {
            name: "Class_3".into(),
            parent: Some("App".into()),
            methods: vec![MethodSnapshot {
                name: "method_4".into(),
                fitness: 0.5,
                lines: 2,
                in_degree: 0,
                body: vec![
                    Statement::Declaration { id: 7 },
                    Statement::Invocation {
                        class: "App".into(),
                        method: "main".into(),
                    },
                ],
            }],
        };
        let src = render_class(&class);
        assert_eq!(
            src,
            "public class Class_3 extends App {\n    static void method_4() {\n        int var7 = 7;\n        App.main();\n    }\n}\n"
        );
    }
}

//! Output surface: step logs, snapshots, Java sources, DOT graphs.

pub mod dot;
pub mod java;
pub mod snapshot;
pub mod step_log;
pub mod writer;

pub use dot::to_dot;
pub use java::{render_class, render_sources};
pub use snapshot::{ClassRow, ClassSnapshot, CodebaseSnapshot, MethodSnapshot, ReferenceRow};
pub use step_log::{read_json_lines, write_csv, write_json_lines, write_logs, CSV_HEADER};
pub use writer::write_outputs;

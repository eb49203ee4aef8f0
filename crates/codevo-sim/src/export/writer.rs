//! Writes a finished batch to an output directory.
//!
//! ```text
//! <output_dir>/steps.csv | steps.jsonl
//! <output_dir>/sim_<i>/snapshot.json
//! <output_dir>/sim_<i>/references.csv
//! <output_dir>/sim_<i>/classes.csv
//! <output_dir>/sim_<i>/graph.dot
//! <output_dir>/sim_<i>/src/<Class>.java     (write_sources only)
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use codevo_core::config::{ExportConfig, LogFormat};
use codevo_core::errors::ExportError;

use super::dot::to_dot;
use super::java::render_sources;
use super::snapshot::CodebaseSnapshot;
use super::step_log::write_logs;
use crate::engine::BatchRun;

/// Write every artifact for `runs` below `root/<output_dir>`.
/// Returns the paths written.
pub fn write_outputs(
    root: &Path,
    runs: &[BatchRun],
    config: &ExportConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    let out_dir = root.join(config.effective_output_dir());
    fs::create_dir_all(&out_dir)?;
    let mut written = Vec::new();

    let format = config.effective_format();
    let steps_path = out_dir.join(match format {
        LogFormat::Csv => "steps.csv",
        LogFormat::Json => "steps.jsonl",
    });
    let mut steps = BufWriter::new(File::create(&steps_path)?);
    let logs: Vec<_> = runs.iter().map(|r| &r.log).collect();
    write_logs(&mut steps, &logs, format)?;
    written.push(steps_path);

    for run in runs {
        let sim_dir = out_dir.join(format!("sim_{}", run.log.sim));
        fs::create_dir_all(&sim_dir)?;
        let snapshot = CodebaseSnapshot::capture(&run.codebase);

        let path = sim_dir.join("snapshot.json");
        fs::write(&path, snapshot.to_json()?)?;
        written.push(path);

        let path = sim_dir.join("references.csv");
        let mut file = BufWriter::new(File::create(&path)?);
        writeln!(file, "method,class,ref_count")?;
        for row in snapshot.reference_rows() {
            writeln!(file, "{},{},{}", row.method, row.class, row.ref_count)?;
        }
        file.flush()?;
        written.push(path);

        let path = sim_dir.join("classes.csv");
        let mut file = BufWriter::new(File::create(&path)?);
        writeln!(file, "class,subclasses,lines")?;
        for row in snapshot.class_rows() {
            writeln!(file, "{},{},{}", row.class, row.subclasses, row.lines)?;
        }
        file.flush()?;
        written.push(path);

        let path = sim_dir.join("graph.dot");
        fs::write(&path, to_dot(&run.codebase))?;
        written.push(path);

        if config.effective_write_sources() {
            let src_dir = sim_dir.join("src");
            fs::create_dir_all(&src_dir)?;
            for (name, source) in render_sources(&snapshot) {
                let path = src_dir.join(name);
                fs::write(&path, source)?;
                written.push(path);
            }
        }
    }

    tracing::info!(dir = %out_dir.display(), files = written.len(), "outputs written");
    Ok(written)
}

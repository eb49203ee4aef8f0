//! Step log writers: CSV table or one JSON record per line.

use std::io::{BufRead, Write};

use codevo_core::config::LogFormat;
use codevo_core::errors::ExportError;

use crate::engine::{StatisticsLog, StepRecord};

/// Column header of the CSV step log.
pub const CSV_HEADER: &str = "sim,step,fmin,action,fnum,fmean,fstd,fit_min,fit_max,code_size,changes";

/// Write `logs` in `format`. CSV gets a single header for all logs.
pub fn write_logs<W: Write>(
    writer: &mut W,
    logs: &[&StatisticsLog],
    format: LogFormat,
) -> Result<(), ExportError> {
    match format {
        LogFormat::Csv => {
            writeln!(writer, "{CSV_HEADER}")?;
            for log in logs {
                write_csv_rows(writer, log.records())?;
            }
        }
        LogFormat::Json => {
            for log in logs {
                write_json_lines(writer, log.records())?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: &mut W, log: &StatisticsLog) -> Result<(), ExportError> {
    write_logs(writer, &[log], LogFormat::Csv)
}

fn write_csv_rows<W: Write>(writer: &mut W, records: &[StepRecord]) -> Result<(), ExportError> {
    for r in records {
        let s = &r.summary;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.sim,
            r.step,
            r.fmin,
            r.action.name(),
            s.count,
            s.mean,
            s.std,
            s.min,
            s.max,
            r.code_size,
            r.change
        )?;
    }
    Ok(())
}

pub fn write_json_lines<W: Write>(writer: &mut W, records: &[StepRecord]) -> Result<(), ExportError> {
    for record in records {
        let line = serde_json::to_string(record).map_err(|e| ExportError::Serialization {
            message: e.to_string(),
        })?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Read records written by `write_json_lines`. Blank lines are skipped.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<StepRecord>, ExportError> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| ExportError::Serialization {
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

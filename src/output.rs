//! Serialization of generated records to files or stdout.

use crate::args::OutputFormat;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Default buffer size for output writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Write `records` to `writer` in `format`. Returns the number of records.
pub fn write_records<T: Serialize, W: Write>(
    writer: &mut W,
    records: &[T],
    format: OutputFormat,
) -> anyhow::Result<usize> {
    match format {
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *writer, record)?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, records)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(records.len())
}

/// Write `records` to `path`, or to stdout when `path` is `None`.
pub fn emit<T: Serialize>(
    records: &[T],
    path: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<usize> {
    let written = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
            let written = write_records(&mut writer, records, format)?;
            info!("Wrote {} records to {}", written, path.display());
            written
        }
        None => {
            let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, io::stdout().lock());
            write_records(&mut writer, records, format)?
        }
    };
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_jsonl() {
        let records = vec![json!({"a": 1}), json!({"a": 2})];
        let mut buffer = Vec::new();

        let written = write_records(&mut buffer, &records, OutputFormat::Jsonl).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\"a\":1}\n{\"a\":2}\n");
    }

    #[test]
    fn test_write_json_array() {
        let records = vec![json!({"a": 1})];
        let mut buffer = Vec::new();

        write_records(&mut buffer, &records, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, json!([{"a": 1}]));
    }

    #[test]
    fn test_emit_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.jsonl");
        let records = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})];

        let written = emit(&records, Some(&path), OutputFormat::Jsonl).unwrap();
        assert_eq!(written, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}

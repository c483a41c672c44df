//! Headless output formats.

use crate::cli::Format;
use flatsearch_core::{lookup, stringify, Document, FieldPath};
use serde_json::Value;
use std::io::Write;

/// Columns printed by [`Format::Table`], in order.
pub const TABLE_COLUMNS: &[&str] = &["id", "name", "price", "area", "numberOfRooms"];

/// Write `records` to `out` in `format`.
pub fn write<W: Write, R: Document>(format: Format, records: &[R], out: &mut W) -> anyhow::Result<()> {
    let docs: Vec<&Value> = records.iter().map(Document::document).collect();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &docs)?;
            writeln!(out)?;
        }
        Format::Jsonl => {
            for doc in docs {
                serde_json::to_writer(&mut *out, doc)?;
                writeln!(out)?;
            }
        }
        Format::Table => {
            writeln!(out, "{}", TABLE_COLUMNS.join("\t"))?;
            let paths: Vec<FieldPath> = TABLE_COLUMNS.iter().map(|c| FieldPath::new(*c)).collect();
            for doc in docs {
                let row: Vec<String> = paths
                    .iter()
                    .map(|path| lookup(doc, path).map(stringify).unwrap_or_default())
                    .collect();
                writeln!(out, "{}", row.join("\t"))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

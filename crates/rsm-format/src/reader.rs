//! File-level entry points.
//!
//! The whole pipeline is a pure transform of an in-memory text blob; the only
//! I/O is the initial whole-file read here, a single scoped acquisition of
//! the file handle released on every exit path. The read is guarded by a
//! size precheck so an adversarial file cannot balloon memory before the
//! decoder's own record limits apply.

use crate::build::build_mesh_with;
use crate::decoder::{decode_with, DecodeOptions};
use crate::error::RsmError;
use rsm_model::{Mesh, MeshSchema, SectionTable};
use std::path::Path;

/// Largest RSM file the readers will load, in bytes.
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// Read an RSM file and decode its section table with default options.
pub fn read_sections(path: impl AsRef<Path>) -> Result<SectionTable, RsmError> {
    read_sections_with(path, &DecodeOptions::default())
}

/// Read an RSM file and decode its section table.
pub fn read_sections_with(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<SectionTable, RsmError> {
    let text = read_text(path.as_ref())?;
    decode_with(&text, options)
}

/// Read an RSM file and build the validated mesh with default options and
/// the default schema.
pub fn read_mesh(path: impl AsRef<Path>) -> Result<Mesh, RsmError> {
    read_mesh_with(path, &DecodeOptions::default(), &MeshSchema::default())
}

/// Read an RSM file and build the validated mesh.
pub fn read_mesh_with(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
    schema: &MeshSchema,
) -> Result<Mesh, RsmError> {
    let table = read_sections_with(path, options)?;
    build_mesh_with(&table, schema)
}

fn read_text(path: &Path) -> Result<String, RsmError> {
    let len = std::fs::metadata(path)?.len();
    if len > MAX_FILE_BYTES {
        return Err(RsmError::limit_exceeded(
            format!("size of '{}'", path.display()),
            len as usize,
            MAX_FILE_BYTES as usize,
        ));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rsm-reader-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_mesh_from_file() {
        let path = temp_file(
            "ok.rsm",
            "vertices 3\n1 0 0 0\n2 1 0 0\n3 0 1 0\nfaces 1\n1 2 0 1 2\n",
        );
        let mesh = read_mesh(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_read_sections_from_file() {
        let path = temp_file("sections.rsm", "bones 1\n7 7\n");
        let table = read_sections(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.get("bones").unwrap().records, vec![vec![7, 7]]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_mesh("/nonexistent/model.rsm").unwrap_err();
        assert!(matches!(err, RsmError::Io(_)));
    }

    #[test]
    fn test_parse_failure_propagates() {
        let path = temp_file("bad.rsm", "vertices abc\n");
        let err = read_mesh(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, RsmError::MalformedHeader { .. }));
    }
}

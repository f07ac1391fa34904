//! Mesh builder: derives a validated [`Mesh`] from a [`SectionTable`].
//!
//! The builder is the schema-aware half of the pipeline. It knows which
//! columns of which sections are geometrically meaningful (via
//! [`MeshSchema`]) and checks referential integrity: every face index must
//! land inside the vertices section before the mesh is handed to a consumer,
//! because an out-of-range index would corrupt whatever topology the
//! consumer builds from it.

use crate::error::RsmError;
use rsm_model::{ColumnSpan, Mesh, MeshSchema, Record, SectionTable, Vec3i};

/// Build a mesh from the table using the default RSM schema
/// (`vertices` columns 1..=3, `faces` columns 2..=4).
pub fn build_mesh(table: &SectionTable) -> Result<Mesh, RsmError> {
    build_mesh_with(table, &MeshSchema::default())
}

/// Build a mesh from the table using an explicit schema.
///
/// Fails with [`RsmError::MissingSection`] if either schema section is
/// absent, [`RsmError::SchemaMismatch`] if a record is too narrow for its
/// column span, and [`RsmError::IndexOutOfRange`] if a face references a
/// vertex that does not exist. No partial mesh escapes on failure.
pub fn build_mesh_with(table: &SectionTable, schema: &MeshSchema) -> Result<Mesh, RsmError> {
    let vertex_section = table
        .get(&schema.vertex_section)
        .ok_or_else(|| RsmError::MissingSection(schema.vertex_section.clone()))?;
    let face_section = table
        .get(&schema.face_section)
        .ok_or_else(|| RsmError::MissingSection(schema.face_section.clone()))?;

    let mut vertices = Vec::with_capacity(vertex_section.len());
    for (i, record) in vertex_section.records.iter().enumerate() {
        let [x, y, z] = triple_at(&schema.vertex_section, i, record, &schema.vertex_columns)?;
        vertices.push(Vec3i::new(x, y, z));
    }

    let mut faces = Vec::with_capacity(face_section.len());
    for (i, record) in face_section.records.iter().enumerate() {
        let triple = triple_at(&schema.face_section, i, record, &schema.face_columns)?;
        for &index in &triple {
            if index < 0 || index as usize >= vertices.len() {
                return Err(RsmError::IndexOutOfRange {
                    face: i,
                    index,
                    vertices: vertices.len(),
                });
            }
        }
        faces.push([triple[0] as u32, triple[1] as u32, triple[2] as u32]);
    }

    Ok(Mesh { vertices, faces })
}

/// Extract the three columns a span names from a record.
///
/// Both mesh roles consume exactly three columns (X/Y/Z, or an index
/// triple); a record narrower than the span, or a span not three columns
/// wide, is a schema mismatch.
fn triple_at(
    section: &str,
    record_index: usize,
    record: &Record,
    span: &ColumnSpan,
) -> Result<[i64; 3], RsmError> {
    let needed = span.min_arity();
    if record.len() < needed {
        return Err(RsmError::SchemaMismatch {
            section: section.to_string(),
            record: record_index,
            needed,
            actual: record.len(),
        });
    }
    match record[span.offset..needed] {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(RsmError::SchemaMismatch {
            section: section.to_string(),
            record: record_index,
            needed,
            actual: record.len(),
        }),
    }
}

#![warn(missing_docs)]

//! Data model for RSM model files.
//!
//! RSM is a line-oriented text format: a file is a series of named sections,
//! each a `name count` header followed by `count` lines of whitespace-separated
//! integers. This crate defines the parsed representation — [`Record`],
//! [`Section`], [`SectionTable`] — and the derived [`Mesh`] value handed to
//! consumers, together with the [`MeshSchema`] that names which columns of
//! which sections carry geometry.
//!
//! The types here are purely declarative; decoding, validation, and encoding
//! live in the `rsm-format` crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed line inside a section: an ordered tuple of signed integers.
///
/// Arity is determined per-section by the data, not fixed globally.
pub type Record = Vec<i64>;

/// A named, length-prefixed group of records.
///
/// Record order is file order and is semantically meaningful: index `i`
/// within a section is an implicit record ID referenced by other sections
/// (face records reference `vertices` by position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section name, taken from token 0 of the header line.
    pub name: String,
    /// Records in file order.
    pub records: Vec<Record>,
}

impl Section {
    /// Create a section from a name and its records.
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Number of records in the section.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the section has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The complete decoded content of an RSM file: sections in file order,
/// addressable by name.
///
/// A repeated section name replaces the earlier entry's records while keeping
/// its original position, so re-encoding preserves first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionTable {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, returning the previous section of the same name if
    /// one existed. On replacement the section keeps its original position.
    pub fn insert(&mut self, section: Section) -> Option<Section> {
        match self.index.get(&section.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.sections[slot], section)),
            None => {
                self.index.insert(section.name.clone(), self.sections.len());
                self.sections.push(section);
                None
            }
        }
    }

    /// Get a section by name.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&slot| &self.sections[slot])
    }

    /// Whether a section of the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the table has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Total record count across all sections.
    pub fn total_records(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }
}

impl From<Vec<Section>> for SectionTable {
    fn from(sections: Vec<Section>) -> Self {
        let mut table = SectionTable::new();
        for section in sections {
            table.insert(section);
        }
        table
    }
}

impl From<SectionTable> for Vec<Section> {
    fn from(table: SectionTable) -> Self {
        table.sections
    }
}

/// 3D point with integer components (RSM stores lattice coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vec3i {
    /// X component.
    pub x: i64,
    /// Y component.
    pub y: i64,
    /// Z component.
    pub z: i64,
}

impl Vec3i {
    /// Create a new Vec3i.
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// The derived mesh value: vertex positions plus triangle index triples.
///
/// Constructed once from a [`SectionTable`], validated, and never mutated.
/// Every index in `faces` is a valid index into `vertices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions in section order.
    pub vertices: Vec<Vec3i>,
    /// Triangles as vertex index triples, in section order.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

/// A contiguous run of columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    /// First column used.
    pub offset: usize,
    /// Number of columns used.
    pub width: usize,
}

impl ColumnSpan {
    /// Create a span covering `width` columns starting at `offset`.
    pub fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    /// Minimum record arity this span requires.
    pub fn min_arity(&self) -> usize {
        self.offset + self.width
    }
}

/// Which sections and columns carry geometry.
///
/// The RSM layout leaves the meaning of the skipped leading columns
/// undeclared (a per-record ID/flag in `vertices`, two unused columns in
/// `faces`); the schema names the geometric ones explicitly rather than
/// slicing by magic numbers, so the mapping is documented and swappable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSchema {
    /// Section holding vertex records.
    pub vertex_section: String,
    /// Columns of a vertex record holding X, Y, Z.
    pub vertex_columns: ColumnSpan,
    /// Section holding face records.
    pub face_section: String,
    /// Columns of a face record holding the three vertex indices.
    pub face_columns: ColumnSpan,
}

impl Default for MeshSchema {
    fn default() -> Self {
        Self {
            vertex_section: "vertices".to_string(),
            vertex_columns: ColumnSpan::new(1, 3),
            face_section: "faces".to_string(),
            face_columns: ColumnSpan::new(2, 3),
        }
    }
}

#![warn(missing_docs)]

//! Decoder, validator, and encoder for the RSM text model format.
//!
//! An RSM file is a series of self-length-prefixed sections:
//!
//! ```text
//! vertices 3
//! 1 0 0 0
//! 2 1 0 0
//! 3 0 1 0
//! faces 1
//! 1 2 0 1 2
//! ```
//!
//! Each section opens with a `name count` header followed by exactly `count`
//! lines of whitespace-separated integers. The decoder reconstructs a
//! [`rsm_model::SectionTable`] from the text; the mesh builder derives a
//! validated [`rsm_model::Mesh`] from the `vertices` and `faces` sections.
//!
//! # Example
//!
//! ```no_run
//! use rsm_format::read_mesh;
//!
//! let mesh = read_mesh("model.rsm").unwrap();
//! println!("{} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
//! ```

mod build;
mod decoder;
mod error;
mod lexer;
mod reader;
mod writer;

pub use build::{build_mesh, build_mesh_with};
pub use decoder::{decode, decode_with, DecodeOptions, DuplicatePolicy};
pub use error::RsmError;
pub use reader::{read_mesh, read_mesh_with, read_sections, read_sections_with, MAX_FILE_BYTES};
pub use writer::{encode, write};

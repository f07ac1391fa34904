//! rsm CLI - inspector and exporter for RSM model files
//!
//! Decodes RSM text models, validates them, and exports the derived mesh.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rsm_format::{build_mesh, encode, DecodeOptions, DuplicatePolicy};
use rsm_model::{Mesh, Section};

#[derive(Parser)]
#[command(name = "rsm")]
#[command(about = "Inspect, validate, and export RSM model files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the sections and mesh stats of an RSM file
    Info {
        /// Path to the .rsm file
        file: PathBuf,
    },
    /// Validate an RSM file and report the first fault
    Check {
        /// Path to the .rsm file
        file: PathBuf,
        /// Reject duplicate sections and ragged record arities
        #[arg(long)]
        strict: bool,
    },
    /// Export the mesh of an RSM file to another format
    Export {
        /// Input .rsm file
        input: PathBuf,
        /// Output file (format determined by extension: .stl, .json, .rsm)
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => show_info(&file),
        Commands::Check { file, strict } => check_file(&file, strict),
        Commands::Export { input, output } => export_file(&input, &output),
    }
}

fn show_info(file: &PathBuf) -> Result<()> {
    let table = rsm_format::read_sections(file)
        .with_context(|| format!("failed to decode {}", file.display()))?;

    println!("RSM model: {}", file.display());
    println!("  Sections: {}", table.len());
    for section in table.iter() {
        match arity_range(section) {
            Some((lo, hi)) if lo == hi => {
                println!("  {}: {} records x {} columns", section.name, section.len(), lo);
            }
            Some((lo, hi)) => {
                println!(
                    "  {}: {} records, {}..{} columns (ragged)",
                    section.name,
                    section.len(),
                    lo,
                    hi
                );
            }
            None => println!("  {}: empty", section.name),
        }
    }

    match build_mesh(&table) {
        Ok(mesh) => {
            println!("\nMesh stats:");
            println!("  Vertices: {}", mesh.num_vertices());
            println!("  Triangles: {}", mesh.num_faces());
        }
        Err(e) => {
            println!("\nNo mesh derivable: {}", e);
        }
    }

    Ok(())
}

fn check_file(file: &PathBuf, strict: bool) -> Result<()> {
    let options = if strict {
        DecodeOptions {
            duplicate_policy: DuplicatePolicy::Error,
            require_uniform_arity: true,
            ..Default::default()
        }
    } else {
        DecodeOptions::default()
    };

    let table = rsm_format::read_sections_with(file, &options)
        .with_context(|| format!("{} failed to decode", file.display()))?;
    let mesh = build_mesh(&table)
        .with_context(|| format!("{} decoded but has no valid mesh", file.display()))?;

    println!(
        "{}: OK ({} sections, {} vertices, {} triangles)",
        file.display(),
        table.len(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(())
}

fn export_file(input: &PathBuf, output: &PathBuf) -> Result<()> {
    use std::fs;

    let table = rsm_format::read_sections(input)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "stl" => {
            let mesh = build_mesh(&table)?;
            fs::write(output, export_stl_bytes(&mesh))?;
            println!("Exported STL to {}", output.display());
        }
        "json" => {
            let mesh = build_mesh(&table)?;
            let json = serde_json::to_string_pretty(&mesh)?;
            fs::write(output, json)?;
            println!("Exported JSON to {}", output.display());
        }
        "rsm" => {
            fs::write(output, encode(&table))?;
            println!("Wrote normalized RSM to {}", output.display());
        }
        _ => {
            anyhow::bail!("Unknown output format: {}", ext);
        }
    }

    Ok(())
}

/// Smallest and largest record arity in a section, or None when empty.
fn arity_range(section: &Section) -> Option<(usize, usize)> {
    let lengths = section.records.iter().map(Vec::len);
    Some((lengths.clone().min()?, lengths.max()?))
}

/// Serialize a mesh as binary STL (80-byte header, triangle count, then 50
/// bytes per triangle with a computed facet normal).
fn export_stl_bytes(mesh: &Mesh) -> Vec<u8> {
    let mut data = Vec::with_capacity(84 + mesh.num_faces() * 50);

    let mut header = [b' '; 80];
    header[..18].copy_from_slice(b"rsm-cli STL export");
    data.extend_from_slice(&header);
    data.extend_from_slice(&(mesh.num_faces() as u32).to_le_bytes());

    for tri in &mesh.faces {
        let v0 = mesh.vertices[tri[0] as usize];
        let v1 = mesh.vertices[tri[1] as usize];
        let v2 = mesh.vertices[tri[2] as usize];

        let p0 = [v0.x as f32, v0.y as f32, v0.z as f32];
        let p1 = [v1.x as f32, v1.y as f32, v1.z as f32];
        let p2 = [v2.x as f32, v2.y as f32, v2.z as f32];

        // Compute normal
        let e1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let e2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let (nx, ny, nz) = if len > 1e-10 {
            (nx / len, ny / len, nz / len)
        } else {
            (0.0, 0.0, 1.0)
        };

        // Normal
        data.extend_from_slice(&nx.to_le_bytes());
        data.extend_from_slice(&ny.to_le_bytes());
        data.extend_from_slice(&nz.to_le_bytes());
        // Vertices
        for p in [p0, p1, p2] {
            data.extend_from_slice(&p[0].to_le_bytes());
            data.extend_from_slice(&p[1].to_le_bytes());
            data.extend_from_slice(&p[2].to_le_bytes());
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

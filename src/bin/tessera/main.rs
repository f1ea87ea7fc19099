//! Tessera CLI - polygon mesh modeling command-line tool.
//!
//! Usage: tessera <COMMAND> [OPTIONS] ...
//!
//! Run `tessera --help` for available commands. Set `RUST_LOG=debug` to see
//! per-stage detail from the library.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use tessera::algo::analysis::MeshReport;
use tessera::algo::bevel::Bevel;
use tessera::algo::conway::ConwayNotation;
use tessera::algo::repair::RemoveDoubleVertices;
use tessera::algo::subdivide::{CatmullClark, SubdivideOptions};
use tessera::io;
use tessera::algo::{MeshApply, Modifier};
use tessera::primitives;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Polygon mesh modeling CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh statistics and topology checks
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Write a seed solid or plane
    Generate {
        /// Shape to generate
        #[arg(value_enum)]
        shape: Shape,

        /// Output mesh file
        output: PathBuf,

        /// Edge length for the cube, circumradius for the other solids,
        /// side length for the plane
        #[arg(short, long, default_value = "1.0")]
        size: f64,

        /// Plane segments along each axis
        #[arg(long, default_value = "1")]
        segments: usize,
    },

    /// Catmull-Clark subdivide a mesh
    Subdivide {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Number of subdivision iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Build a polyhedron from Conway notation, e.g. `tI` or `dkC`
    Conway {
        /// Operator string, applied right to left
        notation: String,

        /// Output mesh file
        output: PathBuf,

        /// Apply the operators to this mesh instead of a seed letter
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Bevel every edge and vertex of a closed mesh
    Bevel {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Inset fraction, strictly between 0 and 1
        #[arg(short, long, default_value = "0.25")]
        amount: f64,
    },

    /// Merge vertices with identical (or rounded-identical) positions
    Weld {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Round coordinates to this many decimal places before comparing
        #[arg(short, long)]
        decimals: Option<u32>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
    Plane,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,

        Commands::Generate {
            shape,
            output,
            size,
            segments,
        } => cmd_generate(shape, &output, size, segments)?,

        Commands::Subdivide {
            input,
            output,
            iterations,
            sequential,
        } => {
            let options = SubdivideOptions::new(iterations).with_parallel(!sequential);
            let mode = if sequential { "sequential" } else { "parallel" };
            println!("Applying Catmull-Clark subdivision ({} iterations, {})...", iterations, mode);
            cmd_modify(&input, &output, &CatmullClark::with_options(options))?;
        }

        Commands::Conway { notation, output, input } => cmd_conway(&notation, &output, input.as_deref())?,

        Commands::Bevel { input, output, amount } => {
            println!("Beveling (amount={})...", amount);
            cmd_modify(&input, &output, &Bevel::new(amount)?)?;
        }

        Commands::Weld { input, output, decimals } => {
            let weld = match decimals {
                Some(places) => RemoveDoubleVertices::rounded(places)?,
                None => RemoveDoubleVertices::new(),
            };
            cmd_modify(&input, &output, &weld)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("{}", MeshReport::analyze(&mesh));

    Ok(())
}

fn cmd_generate(shape: Shape, output: &Path, size: f64, segments: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = match shape {
        Shape::Tetrahedron => primitives::tetrahedron(size),
        Shape::Cube => primitives::cube(size),
        Shape::Octahedron => primitives::octahedron(size),
        Shape::Icosahedron => primitives::icosahedron(size),
        Shape::Dodecahedron => primitives::dodecahedron(size),
        Shape::Plane => primitives::plane(size, size, segments, segments)?,
    };

    io::save(&mesh, output)?;
    println!(
        "Saved: {} ({} vertices, {} faces)",
        output.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );

    Ok(())
}

fn cmd_conway(notation: &str, output: &Path, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let notation = ConwayNotation::parse(notation)?;

    let start = Instant::now();
    let mesh = match input {
        Some(path) => {
            if notation.seed().is_some() {
                return Err(format!("'{}' names a seed solid; drop it when using --input", notation).into());
            }
            let mut mesh = io::load(path)?;
            mesh.apply(&notation.pipeline())?;
            mesh
        }
        None => notation.build()?,
    };
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_modify<M: Modifier>(input: &Path, output: &Path, modifier: &M) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = io::load(input)?;

    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let start = Instant::now();
    mesh.apply(modifier)?;
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

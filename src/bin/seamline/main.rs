//! Seamline CLI - UV seam straightening command-line tool.
//!
//! Usage: seamline <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `seamline --help` for available commands.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use seamline::algo::{
    classify_regions, group_walls, run_with_progress, segment_islands, AlignScope, Progress,
    StraightenOptions, UvSink,
};
use seamline::io::{self, UvMesh};
use seamline::mesh::{CornerUvs, FaceId, HalfEdgeMesh};

#[derive(Parser)]
#[command(name = "seamline")]
#[command(author, version, about = "UV seam straightening CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh, seam and island information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// UV distance above which an edge counts as a seam
        #[arg(short, long, default_value = "1e-6")]
        tolerance: f64,
    },

    /// Straighten seam borders and smooth island interiors
    Straighten {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Number of interior smoothing iterations
        #[arg(short, long, default_value = "2")]
        iterations: usize,

        /// Which corners each wall aligns
        #[arg(short, long, value_enum, default_value = "border")]
        scope: ScopeArg,

        /// Faces to process, e.g. "0-99,120" (default: all)
        #[arg(short, long)]
        faces: Option<String>,

        /// UV distance above which an edge counts as a seam
        #[arg(short, long, default_value = "1e-6")]
        tolerance: f64,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    /// Align every border corner at the wall's seam vertices
    Border,
    /// Align only the wall faces' own seam corners
    Wall,
}

impl From<ScopeArg> for AlignScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Border => AlignScope::Border,
            ScopeArg::Wall => AlignScope::Wall,
        }
    }
}

/// Writes the straightened mesh once the run is complete.
struct ObjSink {
    path: PathBuf,
}

impl UvSink for ObjSink {
    fn commit(&mut self, mesh: &HalfEdgeMesh, uvs: &CornerUvs) -> seamline::error::Result<()> {
        io::save(mesh, uvs, &self.path)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level);
    builder.parse_default_env();

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, tolerance } => {
            cmd_info(&input, tolerance)?;
        }

        Commands::Straighten {
            input,
            output,
            iterations,
            scope,
            faces,
            tolerance,
            sequential,
        } => {
            cmd_straighten(
                &input,
                &output,
                iterations,
                scope.into(),
                faces.as_deref(),
                tolerance,
                sequential,
            )?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
///
/// When stderr is not a terminal, updates go to the log instead.
fn create_progress() -> Progress {
    if !std::io::stderr().is_terminal() {
        return Progress::logged();
    }

    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only ever move forward
        let old = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent <= old && raw_percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

/// Load a mesh and mark every UV-split edge as a seam.
fn load_seamed(input: &Path, tolerance: f64) -> Result<UvMesh, Box<dyn std::error::Error>> {
    let mut loaded: UvMesh = io::load(input)?;
    let seams = loaded.uvs.mark_seams_from_splits(&mut loaded.mesh, tolerance)?;
    println!(
        "Loaded: {} vertices, {} faces, {} seam edges",
        loaded.mesh.num_vertices(),
        loaded.mesh.num_faces(),
        seams
    );
    Ok(loaded)
}

fn cmd_info(input: &Path, tolerance: f64) -> Result<(), Box<dyn std::error::Error>> {
    let UvMesh { mesh, uvs } = load_seamed(input, tolerance)?;

    println!("File: {}", input.display());
    println!("Edges: {}", mesh.num_edges());
    println!("Half-edges: {}", mesh.num_halfedges());

    let boundary = mesh
        .edge_ids()
        .filter(|&e| mesh.edge_faces(e).count() == 1)
        .count();
    if boundary == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        println!("Topology: Open ({} boundary edges)", boundary);
    }

    if let Some((min, max)) = uvs.mesh_bounding_box(&mesh) {
        println!(
            "UV bounds: ({:.4}, {:.4}) to ({:.4}, {:.4})",
            min.x, min.y, max.x, max.y
        );
    }

    let faces: Vec<FaceId> = mesh.face_ids().collect();
    let islands = segment_islands(&mesh, &faces);
    println!("\nIslands: {}", islands.len());
    for (i, island) in islands.iter().enumerate() {
        let regions = classify_regions(&mesh, island);
        let walls = group_walls(&mesh, &uvs, &regions.fringe);
        println!(
            "  #{:<4} faces={:<6} border={:<6} fringe={:<6} inner verts={:<6} walls={}",
            i,
            island.len(),
            regions.border.len(),
            regions.fringe.len(),
            regions.inner.len(),
            walls.len()
        );
    }

    Ok(())
}

fn cmd_straighten(
    input: &Path,
    output: &Path,
    iterations: usize,
    scope: AlignScope,
    faces: Option<&str>,
    tolerance: f64,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let UvMesh { mesh, mut uvs } = load_seamed(input, tolerance)?;

    let selection: Vec<FaceId> = match faces {
        Some(list) => parse_face_ranges(list, mesh.num_faces())?
            .into_iter()
            .map(FaceId::new)
            .collect(),
        None => mesh.face_ids().collect(),
    };

    let options = StraightenOptions::default()
        .with_smooth_iterations(iterations)
        .with_scope(scope)
        .with_parallel(!sequential);

    let mode = if sequential { "sequential" } else { "parallel" };
    println!(
        "Straightening {} faces ({:?} scope, {} smoothing iterations, {})...",
        selection.len(),
        scope,
        iterations,
        mode
    );

    let progress = create_progress();
    let mut sink = ObjSink {
        path: output.to_path_buf(),
    };

    let start = Instant::now();
    let report = run_with_progress(&mesh, &mut uvs, &selection, &options, &progress, &mut sink)?;
    let elapsed = start.elapsed();

    println!(
        "Result: {} islands, {} walls, {} corners changed",
        report.num_islands(),
        report.num_walls(),
        report.num_changed()
    );
    for (i, island) in report.islands.iter().enumerate() {
        if let Some(err) = &island.error {
            println!("  island #{} skipped: {}", i, err);
        }
    }
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

/// Parse a comma separated list of face indices and inclusive ranges.
fn parse_face_ranges(list: &str, num_faces: usize) -> Result<Vec<usize>, String> {
    let mut faces = Vec::new();

    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (lo, hi) = match part.split_once('-') {
            Some((a, b)) => (parse_face(a, num_faces)?, parse_face(b, num_faces)?),
            None => {
                let f = parse_face(part, num_faces)?;
                (f, f)
            }
        };
        if lo > hi {
            return Err(format!("empty face range '{}'", part));
        }
        faces.extend(lo..=hi);
    }

    if faces.is_empty() {
        return Err(format!("no faces in '{}'", list));
    }
    Ok(faces)
}

fn parse_face(s: &str, num_faces: usize) -> Result<usize, String> {
    let f: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid face index '{}'", s))?;
    if f >= num_faces {
        return Err(format!("face {} out of range (mesh has {})", f, num_faces));
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_face_ranges() {
        assert_eq!(parse_face_ranges("0-3,7", 10).unwrap(), vec![0, 1, 2, 3, 7]);
        assert_eq!(parse_face_ranges(" 5 , 2-2 ", 10).unwrap(), vec![5, 2]);
        assert!(parse_face_ranges("4-2", 10).is_err());
        assert!(parse_face_ranges("0-10", 10).is_err());
        assert!(parse_face_ranges("x", 10).is_err());
        assert!(parse_face_ranges(",", 10).is_err());
    }

    #[test]
    fn test_verbosity_parsing() {
        let cli = Cli::parse_from(["seamline", "-vv", "info", "mesh.obj"]);
        assert_eq!(cli.verbose, 2);
        let cli = Cli::parse_from([
            "seamline", "straighten", "a.obj", "b.obj", "--scope", "wall", "-i", "0",
        ]);
        match cli.command {
            Commands::Straighten { scope, iterations, .. } => {
                assert!(scope == ScopeArg::Wall);
                assert_eq!(iterations, 0);
            }
            _ => panic!("expected straighten"),
        }
    }
}

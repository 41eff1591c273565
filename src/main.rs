//! Binary entry point for the `mz3` command-line tool.
//!
//! Reads `input_mesh_path` through the registry, re-encodes it to
//! `output_mesh_path`, gzip-compressing when `use_compression` is non-zero.
//! A `clap` parse failure exits non-zero with `clap`'s own usage message; a
//! codec failure prints a one-line diagnostic to stderr and exits non-zero.

use clap::Parser;

use mz3r::cli::Args;
use mz3r::log_at;

fn main() {
    let args = Args::parse();
    mz3r::log::set_display_level(2);

    if let Err(err) = run(&args) {
        eprintln!("mz3: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let entry = mz3r::registry::lookup(&args.input_mesh_path).ok_or_else(|| {
        anyhow::anyhow!(
            "{}: no codec registered for this extension",
            args.input_mesh_path.display()
        )
    })?;
    if !(entry.can_read)(&args.input_mesh_path) {
        anyhow::bail!(
            "{}: not a readable MZ3 file",
            args.input_mesh_path.display()
        );
    }

    let out_entry = mz3r::registry::lookup(&args.output_mesh_path).ok_or_else(|| {
        anyhow::anyhow!(
            "{}: no codec registered for this extension",
            args.output_mesh_path.display()
        )
    })?;
    if !(out_entry.can_write)(&args.output_mesh_path) {
        anyhow::bail!(
            "{}: not a writable MZ3 path",
            args.output_mesh_path.display()
        );
    }

    let mesh = (entry.read)(&args.input_mesh_path)?;
    log_at!(
        2,
        "{}: {} vertices, {} faces\n",
        args.input_mesh_path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );

    (out_entry.write)(&mesh, &args.output_mesh_path, args.compress())?;
    log_at!(2, "{}: wrote mesh\n", args.output_mesh_path.display());
    Ok(())
}

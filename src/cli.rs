//! Command-line argument parsing for the `mz3` example binary.
//!
//! Three positional arguments: input mesh path, output mesh path, and a
//! compression flag parsed as an integer (non-zero means "compress").

use std::path::PathBuf;

use clap::Parser;

/// Read an MZ3 mesh and write it back out, optionally gzip-compressed.
#[derive(Debug, Parser)]
#[command(name = "mz3", version)]
pub struct Args {
    /// Path to the input mesh (.mz3, plain or gzip).
    pub input_mesh_path: PathBuf,

    /// Path to the output mesh (.mz3).
    pub output_mesh_path: PathBuf,

    /// Non-zero to gzip-compress the output.
    #[arg(value_parser = clap::value_parser!(i64))]
    pub use_compression: i64,
}

impl Args {
    pub fn compress(&self) -> bool {
        self.use_compression != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_positional_args() {
        let args = Args::parse_from(["mz3", "in.mz3", "out.mz3", "1"]);
        assert_eq!(args.input_mesh_path, PathBuf::from("in.mz3"));
        assert_eq!(args.output_mesh_path, PathBuf::from("out.mz3"));
        assert!(args.compress());
    }

    #[test]
    fn zero_means_no_compression() {
        let args = Args::parse_from(["mz3", "in.mz3", "out.mz3", "0"]);
        assert!(!args.compress());
    }

    #[test]
    fn missing_args_is_an_error() {
        let result = Args::try_parse_from(["mz3", "in.mz3"]);
        assert!(result.is_err());
    }
}

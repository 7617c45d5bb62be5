//! The `pixc` binary.
//!
//! Parses arguments, initialises logging and hands off to the driver
//! library. Exit code 0 on success, 1 on any compiler error, with the
//! diagnostic on stderr.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pixc_drv::{run, Config, EmitKind};

/// Compiler from PixIR-source to PixIR stack-machine assembly.
#[derive(Parser, Debug)]
#[command(name = "pixc")]
#[command(author = "Pix Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles PixIR-source programs to PixIR assembly", long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Output path for the PixIR stream (default: input with `.pixir`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stage to emit
    #[arg(long, value_enum, default_value = "asm")]
    emit: EmitKind,

    /// Enable debug logging (RUST_LOG is honoured otherwise)
    #[arg(short, long, env = "PIXC_VERBOSE")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        input: cli.input,
        output: cli.output,
        emit: cli.emit,
    };

    if let Err(e) = run(&config) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(["pixc", "scene.pix"]);
        assert_eq!(cli.input, PathBuf::from("scene.pix"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.emit, EmitKind::Asm);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_output() {
        let cli = Cli::parse_from(["pixc", "scene.pix", "-o", "out.pixir"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.pixir")));
    }

    #[test]
    fn test_cli_parse_emit_stage() {
        let cli = Cli::parse_from(["pixc", "scene.pix", "--emit", "tokens"]);
        assert_eq!(cli.emit, EmitKind::Tokens);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["pixc", "--verbose", "scene.pix"]);
        assert!(cli.verbose);
    }
}

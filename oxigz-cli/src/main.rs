//! OxiGz CLI - in-memory gzip decompression
//!
//! Decompresses, tests and inspects single-member gzip files.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{DecompressOptions, cmd_completions, cmd_decompress, cmd_info, cmd_test};
use oxigz_gzip::DEFAULT_CHUNK_SIZE;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxigz")]
#[command(author, version, about = "In-memory gzip decompressor")]
#[command(long_about = "
OxiGz maps a gzip file into memory, parses its header in place and inflates
the payload in bounded chunks into a single output buffer.

Examples:
  oxigz decompress data.txt.gz
  oxigz decompress data.gz -o data.txt --chunk-size 4096
  oxigz decompress -N download.gz
  oxigz test *.gz
  oxigz info data.txt.gz --json
  oxigz completions bash
")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a gzip file
    #[command(alias = "d")]
    Decompress {
        /// gzip file to decompress
        input: PathBuf,

        /// Output file (default: input without its .gz suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compressed bytes fed to the inflater per step
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: NonZeroUsize,

        /// Fixed output buffer size (default: sized from the trailer)
        #[arg(long)]
        buffer_size: Option<usize>,

        /// Skip header CRC and trailer checks
        #[arg(long)]
        no_verify: bool,

        /// Restore the stored file name and modification time
        #[arg(short = 'N', long)]
        name: bool,

        /// Overwrite existing output without asking
        #[arg(short, long)]
        force: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Test gzip file integrity
    #[command(alias = "t")]
    Test {
        /// gzip files to test
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the header fields of a gzip file
    #[command(alias = "i")]
    Info {
        /// gzip file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decompress {
            input,
            output,
            chunk_size,
            buffer_size,
            no_verify,
            name,
            force,
            verbose,
        } => cmd_decompress(
            &input,
            &DecompressOptions {
                output: output.as_deref(),
                chunk_size,
                buffer_size,
                verify: !no_verify,
                restore_name: name,
                force,
                verbose,
            },
        ),
        Commands::Test { inputs, verbose } => cmd_test(&inputs, verbose),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Completions { shell } => cmd_completions(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

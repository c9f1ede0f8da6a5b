//! plainzip CLI - builds ASCII-safe ZIP/JAR archives and patches existing
//! ones with an alphabet-preserving padding injector.
//!
//! A Pure Rust utility wrapping the constrained DEFLATE encoder
//! (`plainzip-deflate`) and the single-entry ZIP container layer
//! (`plainzip-archive`).

mod alphabet;
mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use commands::{cmd_inject, cmd_pack, cmd_verify};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plainzip")]
#[command(author, version, about = "Build and patch ASCII-safe ZIP/JAR archives")]
#[command(long_about = "
plainzip produces ZIP/JAR archives whose every byte lies within a caller-
chosen subset of ASCII, by synthesizing the DEFLATE Huffman codebook under
that constraint rather than filtering bytes after the fact.

Examples:
  plainzip pack -o payload.jar -n Exploit.class input.bin
  plainzip pack -o safe.zip --exclude \"&<'>\\\"()\" -n note.txt input.txt
  plainzip inject -i payload.jar -o patched.jar -p '<!--' -a '-->'
  plainzip verify -i safe.zip
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a file into a single-entry ZIP/JAR whose every byte is in the allowed alphabet.
    Pack {
        /// File to compress and wrap.
        input: PathBuf,

        /// Output archive path.
        #[arg(short, long)]
        output: PathBuf,

        /// Name to give the entry inside the archive.
        #[arg(short = 'n', long, default_value = "entry.bin")]
        entry_name: String,

        /// Bytes excluded from the allowed alphabet, on top of everything
        /// outside printable ASCII (default: shell/HTML-hostile bytes).
        #[arg(short, long, default_value = "&<'>\"()")]
        exclude: String,

        /// Maximum padding-search attempts before giving up.
        #[arg(long, default_value_t = plainzip_archive::DEFAULT_ATTEMPT_CEILING)]
        max_attempts: u64,
    },

    /// Prepend/append bytes to an existing ZIP, patching every internal offset.
    Inject {
        /// Input ZIP archive.
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the patched archive.
        #[arg(short, long)]
        output: PathBuf,

        /// Bytes to prepend before the archive.
        #[arg(short, long)]
        prepend: Option<String>,

        /// Bytes to append after the archive.
        #[arg(short, long)]
        append: Option<String>,
    },

    /// Extract an archive's entry and report round-trip and alphabet status.
    Verify {
        /// ZIP archive to verify.
        #[arg(short, long)]
        input: PathBuf,

        /// Bytes excluded from the allowed alphabet, on top of everything
        /// outside printable ASCII (default: shell/HTML-hostile bytes).
        #[arg(short, long, default_value = "&<'>\"()")]
        exclude: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack {
            input,
            output,
            entry_name,
            exclude,
            max_attempts,
        } => cmd_pack(&input, &output, &entry_name, &exclude, max_attempts),
        Commands::Inject {
            input,
            output,
            prepend,
            append,
        } => cmd_inject(&input, &output, prepend.as_deref(), append.as_deref()),
        Commands::Verify { input, exclude } => cmd_verify(&input, &exclude),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "plainzip", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

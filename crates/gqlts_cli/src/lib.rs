//! Command-line interface for gqlts.
//!
//! # Usage
//!
//! ```bash
//! # Generate a declaration module from an introspection result
//! gqlts generate schema.json -o types.js
//!
//! # Emit the @flow module pragma header
//! gqlts generate schema.json -o types.js --module
//!
//! # Traverse additional roots beyond the schema's query type
//! gqlts generate schema.json --root Mutation
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use gqlts_codegen::{CodegenOptions, Generator};
use gqlts_schema::load_introspection;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gqlts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a TypeScript declaration module from an introspection result
    #[command(alias = "gen")]
    Generate {
        /// Introspection JSON file
        #[arg(required = true)]
        schema: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the @flow module pragma header
        #[arg(long)]
        module: bool,

        /// Additional root types to traverse
        #[arg(long = "root")]
        roots: Vec<String>,
    },

    /// Print version information
    Version,
}

pub fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            schema,
            output,
            module,
            roots,
        } => generate(&schema, output.as_deref(), module, roots, cli.quiet, cli.verbose),
        Commands::Version => {
            println!("gqlts {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn generate(
    schema_path: &Path,
    output: Option<&Path>,
    module: bool,
    roots: Vec<String>,
    quiet: bool,
    verbose: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if verbose {
        println!("{} {}", "Reading".blue(), schema_path.display());
    }

    let source = std::fs::read_to_string(schema_path)?;
    let schema = match load_introspection(&source) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(1);
        }
    };

    let options = CodegenOptions {
        module_preamble: module,
        extra_roots: roots,
    };
    let code = match Generator::with_options(&schema, options).generate() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(1);
        }
    };
    tracing::debug!(bytes = code.len(), "generated declaration module");

    match output {
        Some(path) => {
            std::fs::write(path, &code)?;
            if !quiet {
                println!("{} {}", "Generated".green(), path.display());
            }
        }
        None => {
            println!("{code}");
        }
    }

    Ok(0)
}

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Opendime CLI
//!
//! Entry point for the `opendime` binary. Parses CLI arguments, initializes
//! logging and dispatches to a subcommand:
//!
//! - `keyconv`   — re-encode a private key for every chain
//! - `sigtoaddr` — recover the addresses behind a signed message
//! - `crypt`     — encrypt to a message signer, decrypt with their key
//! - `selftest`  — run the known-answer checks
//! - `version`   — print build version information
//!
//! Reports go to stdout, logs to stderr. Any failure exits non-zero with a
//! message naming the stage that failed.

mod cli;
mod commands;
mod logging;
mod output;
mod selftest;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};

use opendime_keys::{K256Recovery, ManualRecovery};

use cli::{Commands, Engine, OpendimeCli};
use commands::OutputOptions;

fn main() -> Result<()> {
    let cli = OpendimeCli::parse();
    logging::init_logging(&cli.global.log_level, cli.global.log_format);

    let opts = OutputOptions {
        json: cli.global.json,
        verbose: cli.global.verbose,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut input = io::stdin().lock();

    let result = match cli.command {
        Commands::Keyconv(args) => commands::run_keyconv(&args, opts, &mut input, &mut out),
        Commands::Sigtoaddr(args) => commands::run_sigtoaddr(&args, opts, &mut out),
        Commands::Crypt(args) => commands::run_crypt(&args, opts, &mut input, &mut out),
        Commands::Selftest(args) => match args.engine {
            Engine::Manual => selftest::run_selftest(&ManualRecovery, opts, &mut out),
            Engine::K256 => selftest::run_selftest(&K256Recovery, opts, &mut out),
        },
        Commands::Version => print_version(&mut out),
    };
    out.flush()?;
    result
}

/// Prints version information to stdout.
fn print_version<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "opendime {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "rustc    {}", rustc_version())?;
    Ok(())
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

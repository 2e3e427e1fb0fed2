#[path = "src/cli.rs"]
mod cli;

use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use cli::JwtDecodeArgs;
use std::{env, fs, io};

/// Completion scripts land here, next to the manifest.
const COMPLETIONS_DIR: &str = "contrib/completions";

fn main() -> io::Result<()> {
    // Only the flag definitions affect the generated scripts.
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");

    fs::create_dir_all(COMPLETIONS_DIR)?;

    let mut cmd = JwtDecodeArgs::command();
    let bin_name = env!("CARGO_PKG_NAME");
    for shell in [
        Shell::Bash,
        Shell::Elvish,
        Shell::Fish,
        Shell::PowerShell,
        Shell::Zsh,
    ] {
        generate_to(shell, &mut cmd, bin_name, COMPLETIONS_DIR)?;
    }

    Ok(())
}

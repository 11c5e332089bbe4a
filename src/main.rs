use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use ext_icon_gen::render;

/// The tool is deliberately option-free: the icon set is fixed build-time
/// data. Deriving `Parser` anyway gives `--help`/`--version` and rejects
/// stray arguments.
#[derive(Debug, Parser)]
#[clap(
    name = "ext-icon-gen",
    about = "Generate the translator extension's PNG toolbar icons",
    version
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    // Outputs land next to the binary regardless of the caller's cwd, so the
    // extension packaging picks them up from a known location.
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe_dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    std::env::set_current_dir(exe_dir)
        .with_context(|| format!("Failed to change directory to {}", exe_dir.display()))?;

    println!("Generating extension icons...\n");

    render::generate_icons(Path::new("."))?;

    println!("\nAll icons generated");
    Ok(())
}

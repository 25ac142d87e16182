use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use kudo_core::{FileId, compile_to_c};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, help = "Input file (defaults to stdin)")]
    input: Option<String>,

    #[arg(short, long, help = "Path for the generated C source")]
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let (source, label) = match &cli.input {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {path}"))?,
            path.clone(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, String::from("<stdin>"))
        }
    };

    let unit = compile_to_c(FileId::MAIN, &source)?;
    if !unit.is_ok() {
        for diagnostic in &unit.diagnostics {
            eprintln!("{}", diagnostic.render(&label));
        }
        bail!(
            "compilation failed with {} error(s)",
            unit.diagnostics.len()
        );
    }

    write_output(&cli.output, unit.code.as_bytes())
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}

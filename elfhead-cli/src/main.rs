use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use elfhead_core::Binary;
use std::io::{self, Write};
use std::process::ExitCode;

mod render;

/// Exit status for every usage, I/O and format failure.
const EXIT_FAILURE: u8 = 98;

/// Display the information contained in the ELF header of a file
#[derive(Parser)]
#[command(
    name = "elf_header",
    about = "Display the information contained in the ELF header of a file",
    version,
    author
)]
struct Cli {
    /// Path to the ELF file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Also show machine, offsets, flags and table sizes
    #[arg(short, long)]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One field per line
    Text,
    /// Every field in a table
    Table,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            err.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            err.print()?;
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    let bin = match Binary::open(&cli.path) {
        Ok(bin) => bin,
        Err(err) => {
            log::debug!("{:?}", err);
            eprintln!("{} {}", "Error:".red().bold(), err);
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    log::info!(
        "{}: 64-bit: {}, executable: {}, machine {}, entry {:#x}",
        bin.path,
        bin.header.is_64(),
        bin.header.is_executable(),
        bin.header.machine_name(),
        bin.header.entry_point
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => render::text(&bin.header, cli.all, &mut out)?,
        Format::Table => render::table(&bin.header, &mut out)?,
        Format::Json => render::json(&bin.header, &mut out)?,
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

//! find-terminals - PDO information out of the Beckhoff ESI (TwinCAT XML) files.

use clap::{CommandFactory, Parser};
use ek_esi::{
    DirectoryRepository, EsiError, NamePattern, Registry, TerminalRecord, find_matching,
    render_terminal,
};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

const AFTER_HELP: &str = "\
Examples:
  find-terminals EL5042
  find-terminals 'EL504[0123]'
  find-terminals EL5042 --json";

#[derive(Parser)]
#[command(name = "find-terminals")]
#[command(about = "Tool for getting PDO information out of the TwinCAT XML files", long_about = None)]
#[command(after_help = AFTER_HELP)]
#[command(version)]
struct Cli {
    /// Regular expressions matched (case-insensitively, from the start) against terminal names
    #[arg(value_name = "REGEX")]
    patterns: Vec<String>,

    /// Print one JSON record per terminal instead of the report
    #[arg(long)]
    json: bool,

    /// Directory holding the ESI XML files
    #[arg(long, value_name = "DIR", default_value = "BhcConfigFiles")]
    dir: PathBuf,

    /// Terminal registry to compare against
    #[arg(long, value_name = "FILE", default_value = "terminals.json")]
    registry: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.patterns.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        process::exit(1);
    }

    match run(&cli) {
        Ok(()) => {}
        // The reader went away (`find-terminals EL | head`); nothing left to report.
        Err(e) if is_broken_pipe(&e) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn is_broken_pipe(error: &EsiError) -> bool {
    matches!(error, EsiError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
}

fn run(cli: &Cli) -> Result<(), EsiError> {
    let pattern = NamePattern::new(cli.patterns.as_slice())?;
    let registry = Registry::load(&cli.registry)?;
    info!("Loaded {} registry entries from {}", registry.len(), cli.registry.display());

    let repository = DirectoryRepository::new(&cli.dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (match_idx, result) in find_matching(&repository, pattern).enumerate() {
        let terminal = result?;

        if cli.json {
            writeln!(out, "{}", TerminalRecord::new(&terminal, &registry).to_json_line()?)?;
            continue;
        }

        if match_idx > 0 {
            writeln!(out)?;
        }
        let mut report = String::new();
        render_terminal(&mut report, &terminal, &registry)?;
        out.write_all(report.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_pipe_is_not_an_error() {
        let closed = EsiError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(is_broken_pipe(&closed));

        let missing = EsiError::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(!is_broken_pipe(&missing));
        assert!(!is_broken_pipe(&EsiError::NoPatterns));
    }
}

//! # chemcite
//!
//! Check NMR peak lists and HRMS lines and print them formatted for publication.
//!
//! ```bash
//! # Check the 1H NMR lines in a file
//! chemcite h1 spectra.txt
//!
//! # Check HRMS lines from the clipboard with the strict grammar
//! pbpaste | chemcite hrms --strict
//! ```

mod config;

use std::{io::Read, path::PathBuf};

use anyhow::{Context, Result};
use chemcite::prelude::*;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use crate::config::Config;

/// chemcite - check and format NMR and HRMS descriptions
#[derive(Parser)]
#[command(name = "chemcite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check 1H NMR peak lists, one per line
    H1(Options),
    /// Check HRMS lines, one per line
    Hrms(Options),
}

/// The options shared by all commands
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug)]
struct Options {
    /// The input file, read from stdin when left out
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Use the strict grammar and check decimal precision
    #[arg(long)]
    strict: bool,

    /// Do not enforce or round coupling constants
    #[arg(long)]
    no_auto_fix_j: bool,

    /// Allow p, h, and hept without coupling constants
    #[arg(long)]
    general_multiplet: bool,

    /// The language for messages (en or zh)
    #[arg(long)]
    language: Option<Language>,

    /// A TOML file with a [parsing] table, command line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the full citations as JSON
    #[arg(long)]
    json: bool,
}

impl Options {
    fn settings(&self) -> Result<ParseSettings> {
        let mut settings = match &self.config {
            Some(path) => Config::from_file(path)?.parsing,
            None => ParseSettings::default(),
        };
        if self.strict {
            settings.strict = true;
        }
        if self.no_auto_fix_j {
            settings.auto_fix_j = false;
        }
        if self.general_multiplet {
            settings.general_multiplet = true;
        }
        if let Some(language) = self.language {
            settings.language = language;
        }
        Ok(settings)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read from stdin")?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::H1(options) => run(&options, cite_h1),
        Commands::Hrms(options) => run(&options, cite_hrms),
    }
}

fn run<T: CitableRecord + Serialize>(
    options: &Options,
    cite: fn(&str, &ParseSettings) -> Vec<Citation<T>>,
) -> Result<()> {
    let settings = options.settings()?;
    let text = options.read_input()?;
    info!("Parsing with {settings:?}");
    let citations = cite(&text, &settings);

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&citations).context("Failed to serialise citations")?
        );
    } else {
        for citation in &citations {
            println!("{}", citation.plain());
            for annotation in citation.annotations() {
                eprintln!("{}", annotation.to_error(&text, settings.language));
            }
        }
    }

    let failed = citations.iter().filter(|c| !c.is_ready()).count();
    info!(
        "{} of {} records are ready to be cited",
        citations.len() - failed,
        citations.len()
    );
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} records are not ready to be cited",
            citations.len()
        );
    }
    Ok(())
}

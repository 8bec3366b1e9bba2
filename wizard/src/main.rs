//! Scripted wizard driver.
//!
//! Replays a TOML script (`.wizard/wizard.toml`) against the navigation
//! controller and reports where the wizard ended up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wizard::exit_codes;
use wizard::io::config::load_config;
use wizard::io::init::{InitOptions, init_workspace};
use wizard::io::script_store::load_script;
use wizard::run::{Transcript, run_script};

#[derive(Parser)]
#[command(
    name = "wizard",
    version,
    about = "Replay scripted project wizards against the navigation controller"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.wizard/` with a default config and a sample script.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check a script for structural errors without running it.
    Check { script: PathBuf },
    /// Replay a script's actions and print the transcript.
    Run {
        script: PathBuf,
        /// Print the full transcript as JSON.
        #[arg(long)]
        json: bool,
        #[arg(long, default_value = ".wizard/config.toml")]
        config: PathBuf,
    },
}

fn main() {
    wizard::logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Check { script } => cmd_check(&script),
        Command::Run {
            script,
            json,
            config,
        } => cmd_run(&script, &config, json),
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let paths = init_workspace(Path::new("."), &InitOptions { force })?;
    println!("wrote {}", paths.config_path.display());
    println!("wrote {}", paths.script_path.display());
    Ok(exit_codes::OK)
}

fn cmd_check(path: &Path) -> Result<i32> {
    let script = load_script(path)?;
    println!(
        "ok: {} steps, {} modes, {} actions",
        script.steps.len(),
        script.modes.len(),
        script.actions.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_run(script_path: &Path, config_path: &Path, json: bool) -> Result<i32> {
    let config = load_config(config_path)?;
    let script = load_script(script_path)?;
    let transcript = run_script(&script, &config)?;
    if json {
        let payload = serde_json::to_string_pretty(&transcript).context("serialize transcript")?;
        println!("{}", payload);
    } else {
        print_summary(&transcript);
    }
    Ok(exit_codes::for_status(transcript.status))
}

fn print_summary(transcript: &Transcript) {
    println!("{}", transcript.title);
    for record in &transcript.actions {
        println!("  {} -> {}", record.action, record.current);
    }
    for error in &transcript.errors {
        match &error.title {
            Some(title) => println!("  error: {}: {}", title, error.message),
            None => println!("  error: {}", error.message),
        }
    }
    println!("status: {} at {}", transcript.status, transcript.current);
    if let Some(path) = &transcript.project_file {
        println!("project: {}", path.display());
    }
    if let Some(path) = &transcript.compile_output {
        println!("output: {}", path.display());
    }
    if let Some(sdk) = &transcript.sdk {
        println!("sdk: {}", sdk);
    }
}

// Main entry point for benchreport

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use benchreport::case::Case;
use benchreport::cli::Cli;
use benchreport::config::Config;
use benchreport::logging;
use benchreport::reporters::ReporterManager;
use benchreport::session::Session;
use benchreport::utils::FileUtils;

fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = Config::load();

    let manager = Arc::new(
        ReporterManager::with_builtin_reporters().context("Failed to register reporters")?,
    );
    let matches = Cli::command_with_reporters(&manager).get_matches();
    let (cli, args) = Cli::from_matches_with_reporters(&manager, &matches)?;

    logging::init(cli.effective_verbose(config.as_ref()));
    if cli.verbose {
        info!("Starting benchreport v{}", env!("CARGO_PKG_VERSION"));
    }

    if cli.config {
        print_config(&cli, config.as_ref());
        return Ok(());
    }

    if let Some(config_file) = &cli.init_config {
        let toml_content = Config::default().to_toml();
        std::fs::write(config_file, toml_content)
            .with_context(|| format!("Failed to write {}", config_file.display()))?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        return Ok(());
    }

    if let Some(shell_type) = &cli.completion {
        return handle_completion(&manager, shell_type);
    }

    if cli.list_reporters {
        list_reporters(&manager);
        return Ok(());
    }

    let files = collect_inputs(&cli.inputs);
    if files.is_empty() {
        warn!("No results files provided. Use 'benchreport --help' for usage.");
        return Ok(());
    }

    let runtime = match &config {
        Some(config) => config.to_runtime_config()?,
        None => Default::default(),
    };
    let mut session = Session::new(manager)
        .with_args(args)
        .with_runtime_config(runtime)
        .with_output_dir(cli.effective_output_dir(config.as_ref()));
    if let Some(log_path) = cli.effective_reports_log(config.as_ref()) {
        session = session.with_reports_log_path(log_path);
    }

    for file in &files {
        let content = FileUtils::read_file(file)?;
        let case = Case::from_json(&content)
            .with_context(|| format!("Invalid results file: {}", file.display()))?;
        session.add_case(case);
    }

    let reported = session.report()?;
    info!(
        "Produced {} report(s) for {} case(s)",
        reported,
        session.cases().len()
    );
    Ok(())
}

fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(FileUtils::collect_results_files(input));
        } else if input.exists() {
            files.push(input.clone());
        } else {
            warn!("Path not found: {}", input.display());
        }
    }
    files
}

fn list_reporters(manager: &ReporterManager) {
    for reporter in manager.reporters() {
        println!("{}: {}", reporter.name(), reporter.description());
        for choice in reporter.choices().iter() {
            println!("  {:<24} {}", choice.flags().join(", "), choice.description());
        }
    }
}

fn print_config(cli: &Cli, config: Option<&Config>) {
    println!("Current configuration:");
    println!(
        "    Output directory: {}",
        cli.effective_output_dir(config).display()
    );
    match cli.effective_reports_log(config) {
        Some(path) => println!("    Reports log: {}", path.display()),
        None => println!("    Reports log: disabled"),
    }
    println!("    Verbose: {}", cli.effective_verbose(config));

    match config {
        Some(cfg) => {
            println!("\n  Configuration file loaded:");
            if let Some(width) = cfg.table.virtual_width {
                println!("    Table virtual width: {}", width);
            }
            if let Some(full_data) = cfg.json.full_data {
                println!("    JSON full data: {}", full_data);
            }
            if let Some(width) = cfg.graph.width {
                println!("    Graph width: {}", width);
            }
            if let Some(height) = cfg.graph.height {
                println!("    Graph height: {}", height);
            }
            if let Some(from_zero) = cfg.graph.y_starts_at_zero {
                println!("    Graph y axis starts at zero: {}", from_zero);
            }
        }
        None => {
            println!("\n  No configuration file loaded");
            println!("  Create one with: benchreport --init-config .benchreportrc.toml");
        }
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}

fn handle_completion(manager: &ReporterManager, shell_type: &str) -> Result<()> {
    use clap_complete::{Shell, generate};

    let shell = match shell_type {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" => Shell::PowerShell,
        _ => return Err(anyhow::anyhow!("Unsupported shell type '{}'", shell_type)),
    };

    let mut cmd = Cli::command_with_reporters(manager);
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut std::io::stdout());

    Ok(())
}

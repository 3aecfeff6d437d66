use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ts_explorer::rubric::{load_from_path, run_checks, CheckOutcome, CheckReport};
use ts_explorer::{Explorer, Shape};

#[derive(Parser)]
#[command(name = "ts-explorer")]
#[command(about = "Structural checks for TypeScript snippets", long_about = None)]
#[command(version)]
struct Cli {
    /// Log more detail (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a rubric of structural checks
    Check {
        /// Rubric TOML file
        #[arg(short, long)]
        rubric: PathBuf,

        /// Directory the rubric's file paths are relative to (defaults to the rubric's directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the top-level declarations of a file
    Outline {
        /// TypeScript source file
        file: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { rubric, root, json } => cmd_check(&rubric, root, json),
        Commands::Outline { file } => cmd_outline(&file),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "ts_explorer=debug",
        _ => "ts_explorer=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(rubric: &Path, root: Option<PathBuf>, json: bool) -> Result<ExitCode> {
    let config = load_from_path(rubric)?;
    let root = root
        .or_else(|| config.base_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let reports = run_checks(&config, &root);
    let all_passed = reports.iter().all(|report| report.outcome.is_passed());

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        if !config.meta.name.is_empty() {
            println!("{}", config.meta.name.bold());
        }
        for report in &reports {
            print_report(report);
        }
        print_summary(&reports);
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &CheckReport) {
    match &report.outcome {
        CheckOutcome::Passed => println!("{} {}", "✓".green(), report.id),
        CheckOutcome::Failed { reason } => {
            println!("{} {}: {}", "✗".red(), report.id, reason);
            println!("  File: {}", report.file);
        }
        CheckOutcome::Error { message } => {
            eprintln!("{} {}: Error - {}", "✗".red(), report.id, message);
        }
    }
    if let Some(description) = &report.description {
        println!("  {}", description.dimmed());
    }
    for warning in &report.warnings {
        println!("  {}", format!("Warning: {warning}").yellow());
    }
}

fn print_summary(reports: &[CheckReport]) {
    let passed = reports.iter().filter(|r| r.outcome.is_passed()).count();
    let failed = reports.len() - passed;

    println!();
    let summary = format!("{passed} passed, {failed} failed");
    if failed == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn cmd_outline(file: &Path) -> Result<ExitCode> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let explorer = Explorer::new(&source);

    if explorer.is_empty() {
        println!("{}", "(empty)".dimmed());
        return Ok(ExitCode::SUCCESS);
    }

    for entry in explorer.statements() {
        println!("{}", describe(&entry));
        if entry.node().map(|n| n.shape()) == Some(Shape::Class) {
            for member in entry.find_methods().iter().chain(&entry.find_class_props()) {
                println!("  {}", describe(member));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn describe(entry: &Explorer) -> String {
    let Some(node) = entry.node() else {
        return "(empty)".to_string();
    };
    let label = node.shape().label();
    if node.shape() == Shape::If {
        let condition = entry.find_conditions().into_iter().next().unwrap_or_default();
        let branches = entry.find_if_bodies().len();
        return format!("{} ({condition}) [{branches} branches]", label.cyan());
    }
    let name = entry.name().unwrap_or("<anonymous>");

    let mut line = format!("{} {}", label.cyan(), name.bold());
    if matches!(node.shape(), Shape::Function | Shape::Method) {
        let params = entry.find_parameters().len();
        line.push_str(&format!(" ({params} parameters)"));
        let returns = entry.return_annotation();
        if !returns.is_empty() {
            line.push_str(&format!(" -> {returns}"));
        }
    } else {
        let annotation = entry.annotation();
        if !annotation.is_empty() && node.shape() != Shape::TypeAlias {
            line.push_str(&format!(": {annotation}"));
        }
    }
    line
}

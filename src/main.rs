//! NutriAdvisor - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use nutriadvisor::cli::{AdviseArgs, Args, Commands, Verbosity};
use nutriadvisor::config::Config;
use nutriadvisor::dataset::{Dataset, Query};
use nutriadvisor::doctor::{has_failures, Doctor, HealthCheck, HealthStatus};
use nutriadvisor::errors::AdvisorError;
use nutriadvisor::matcher::{find_best_match, MatchWeights};
use nutriadvisor::repl::{
    is_command, AssessmentForm, AssessmentRecord, DisplayManager, ReplSession,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let dataset_path = args
        .data
        .clone()
        .unwrap_or_else(|| config.dataset.path.clone());

    match &args.command {
        Some(Commands::Advise(advise)) => {
            run_advise(advise, &dataset_path, &config.weights, verbosity)
        }
        Some(Commands::Dataset) => run_dataset(&dataset_path),
        Some(Commands::Doctor) => run_doctor(dataset_path, args.config.clone()),
        Some(Commands::Config) => run_config(args.config.as_deref(), &config),
        None => run_interactive(&dataset_path, &config.weights, verbosity),
    }
}

/// One-shot advice from CLI flags
fn run_advise(
    advise: &AdviseArgs,
    dataset_path: &Path,
    weights: &MatchWeights,
    verbosity: Verbosity,
) -> Result<()> {
    let dataset = Dataset::load(dataset_path)
        .with_context(|| format!("Cannot load dataset from {}", dataset_path.display()))?;

    let query = Query {
        bmi: advise.bmi,
        gender: advise.gender,
        activity: advise.activity,
        rice: advise.rice,
        beans: advise.beans,
        soft_drinks: advise.soft_drinks,
        snacks: advise.snacks,
        fruits: advise.fruits,
        vegetables: advise.vegetables,
    };

    let display = DisplayManager::new();
    match find_best_match(&query, &dataset, weights) {
        Ok(recommendation) => {
            if advise.json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                display.show_recommendation(&recommendation, verbosity.show_details());
            }
            Ok(())
        }
        Err(AdvisorError::NoMatch) => {
            display.show_no_match();
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the reference dataset summary
fn run_dataset(dataset_path: &Path) -> Result<()> {
    let dataset = Dataset::load(dataset_path)
        .with_context(|| format!("Cannot load dataset from {}", dataset_path.display()))?;
    let summary = dataset.summary();

    println!("\n{}", "Reference Dataset".bold().cyan());
    println!("{}", "-".repeat(60).cyan());
    println!("  Source:      {}", dataset_path.display());
    println!("  Profiles:    {}", summary.rows);
    println!(
        "  Risk levels: {} low / {} medium / {} high",
        summary.low_risk.to_string().green(),
        summary.medium_risk.to_string().yellow(),
        summary.high_risk.to_string().red()
    );
    println!(
        "  BMI range:   {:.1} - {:.1}",
        summary.bmi_min, summary.bmi_max
    );
    if summary.missing_advice > 0 {
        println!(
            "  {}",
            format!("{} profiles have no advice text", summary.missing_advice).yellow()
        );
    }
    println!();

    Ok(())
}

/// Run environment diagnostics and exit non-zero on failures
fn run_doctor(dataset_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    println!("\n{}", "NutriAdvisor Doctor".bold().cyan());
    println!("{}", "=".repeat(60).cyan());

    let doctor = Doctor::new(dataset_path, config_path);
    let checks = doctor.run_diagnostics();
    print_checks(&checks);

    let passed = checks
        .iter()
        .filter(|c| c.status == HealthStatus::Pass)
        .count();
    let warned = checks
        .iter()
        .filter(|c| matches!(c.status, HealthStatus::Warn(_)))
        .count();
    let failed = checks.len() - passed - warned;

    println!(
        "\n{} passed, {} warnings, {} failed\n",
        passed.to_string().green(),
        warned.to_string().yellow(),
        failed.to_string().red()
    );

    if has_failures(&checks) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_checks(checks: &[HealthCheck]) {
    for check in checks {
        match &check.status {
            HealthStatus::Pass => println!("  {} {}", "✓".green(), check.name),
            HealthStatus::Warn(msg) => {
                println!("  {} {} - {}", "⚠".yellow(), check.name, msg.yellow())
            }
            HealthStatus::Fail(msg) => {
                println!("  {} {} - {}", "✗".red(), check.name, msg.red())
            }
        }
    }
}

/// Display the active configuration
fn run_config(config_override: Option<&Path>, config: &Config) -> Result<()> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    println!("\n{}", "Configuration".bold().cyan());
    println!("{}", "-".repeat(60).cyan());
    println!("  File: {}\n", path.display());

    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    for line in rendered.lines() {
        println!("  {}", line);
    }
    println!();

    Ok(())
}

/// Interactive assessment session
fn run_interactive(dataset_path: &Path, weights: &MatchWeights, verbosity: Verbosity) -> Result<()> {
    let mut repl = match ReplSession::default_history_path() {
        Some(path) => ReplSession::with_history(path)?,
        None => ReplSession::new()?,
    };
    if verbosity.show_details() {
        repl.set_verbose(true);
    }

    let dataset = if verbosity.show_progress() {
        let _spinner = repl.display_mut().start_loading("Loading reference dataset...");
        match Dataset::load(dataset_path) {
            Ok(dataset) => {
                repl.display_mut()
                    .finish_with_success(&format!("Loaded {} reference profiles", dataset.len()));
                dataset
            }
            Err(e) => {
                repl.display_mut().finish_with_error("Could not load dataset");
                return Err(e)
                    .with_context(|| format!("Cannot load dataset from {}", dataset_path.display()));
            }
        }
    } else {
        Dataset::load(dataset_path)
            .with_context(|| format!("Cannot load dataset from {}", dataset_path.display()))?
    };

    if verbosity.show_progress() {
        repl.show_welcome(env!("CARGO_PKG_VERSION"), &dataset);
    }
    if dataset.is_empty() {
        repl.display()
            .show_warning("The dataset has no profiles; assessments cannot produce advice");
    }

    let genders = dataset.genders();

    loop {
        let input = match repl.read_input() {
            Ok(Some(line)) => line,
            Ok(None) => {
                // Ctrl-D at the main prompt ends the session
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(e) if e.to_string() == "Interrupted" => {
                println!();
                continue;
            }
            Err(e) => return Err(e),
        };

        if is_command(&input) {
            if !repl.handle_command(&input, &dataset, weights)? {
                break;
            }
            continue;
        }

        // Anything else, including a bare Enter, starts an assessment
        let outcome = {
            let mut form = AssessmentForm::new(repl.input_mut(), genders.clone());
            form.run()
        };

        let query = match outcome {
            Ok(Some(query)) => query,
            Ok(None) => {
                repl.display().show_info("Assessment abandoned");
                continue;
            }
            Err(e) if e.to_string() == "Interrupted" => {
                println!();
                repl.display().show_info("Assessment cancelled");
                continue;
            }
            Err(e) => return Err(e),
        };

        match find_best_match(&query, &dataset, weights) {
            Ok(recommendation) => {
                repl.display()
                    .show_recommendation(&recommendation, repl.is_verbose());
                repl.record_assessment(AssessmentRecord {
                    timestamp: chrono::Utc::now(),
                    bmi: query.bmi,
                    gender: query.gender,
                    activity: query.activity,
                    risk: recommendation.risk,
                    advice: recommendation.advice.clone(),
                    score: recommendation.score,
                });
            }
            Err(AdvisorError::NoMatch) => repl.display().show_no_match(),
            Err(e) => return Err(e.into()),
        }
    }

    repl.save()?;
    Ok(())
}

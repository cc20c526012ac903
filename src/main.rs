//! apply-form - Job application submission
//!
//! Collects an applicant's details, skills, personality answers and resume,
//! then posts them as one JSON document to the hiring webhook.

mod api;
mod app;
mod config;
mod form;
mod payload;
mod resume;
mod submit;
mod view;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::form::cli::SubmitArgs;

/// apply-form - Send a job application
#[derive(Parser)]
#[command(name = "apply-form")]
#[command(version)]
#[command(about = "Fill in a job application and send it to the hiring team")]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the application step by step (default)
    Apply,

    /// Submit an application from flags (for scripts)
    Submit(SubmitArgs),

    /// List the accepted values for choices and checkboxes
    Options,

    /// Show configuration path and settings
    Config {
        /// Write a config file with the current settings if none exists
        #[arg(long, default_value_t = false)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        format!("{}=debug", env!("CARGO_PKG_NAME").replace('-', "_"))
    } else {
        "warn".to_string()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Using default configuration");
        Config::default()
    });

    match cli.command {
        Some(Commands::Apply) | None => {
            let rt = tokio::runtime::Runtime::new()?;
            form::cli::run_application_flow(&rt, &config)
        }
        Some(Commands::Submit(args)) => {
            let rt = tokio::runtime::Runtime::new()?;
            form::cli::run_quick_submit(&rt, &config, args)
        }
        Some(Commands::Options) => {
            form::cli::print_options();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { init }) => {
            show_config_info(&config, init)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_config_info(cfg: &Config, init: bool) -> Result<()> {
    println!("{}", "apply-form Configuration\n".bright_cyan().bold());

    match config::get_config_path() {
        Ok(path) => {
            println!("{} {}", "Config file:".bright_yellow(), path.bright_white());
            if std::path::Path::new(&path).exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else if init {
                cfg.save()?;
                println!("  {} {}", "Status:".bright_cyan(), "Created".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created yet (using defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    println!("\n{}", "Webhook:".bright_white().bold());
    println!("  {} {}", "URL:".bright_cyan(), cfg.webhook.url);
    println!(
        "  {} {}",
        "Timeout:".bright_cyan(),
        cfg.webhook
            .timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    println!("  {} {}", "Verify SSL:".bright_cyan(), cfg.webhook.verify_ssl);

    println!("\n{}", "Form:".bright_white().bold());
    println!(
        "  {} {} bytes",
        "Max resume size:".bright_cyan(),
        cfg.form.max_resume_bytes
    );
    println!(
        "  {} {} ms",
        "Success message shown for:".bright_cyan(),
        cfg.form.success_hide_ms
    );

    Ok(())
}

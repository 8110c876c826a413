//! Validate command

use clap::Args;
use console::style;
use tracing::info;

use quayside_adapters::{detect_packagers, select_packager, PackageOptions, PackageRequest, PackagerRegistry};
use quayside_core::config::load_config_or_default;
use quayside_core::config::validation::{validate_config, validate_for_publish};
use quayside_core::error::WorkflowError;
use quayside_core::{PublishPlanner, QuaysideError};

use crate::cli::{Cli, OutputFormat};

/// Validate configuration and project layout
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let (config, config_path) = match load_config_or_default(&cwd) {
            Ok((config, path)) => {
                if path.is_none() {
                    warnings.push("No configuration file found, using defaults".to_string());
                }
                (Some(config), path)
            }
            Err(e) => {
                errors.push(format!("Configuration: {}", e));
                (None, None)
            }
        };

        let mut packagers = Vec::new();
        if let Some(ref cfg) = config {
            if let Err(e) = validate_config(cfg) {
                errors.push(format!("Configuration validation: {}", e));
            } else if let Err(e) = validate_for_publish(cfg) {
                warnings.push(format!("Not ready to publish: {}", e));
            }

            let registry = PackagerRegistry::new();
            packagers = detect_packagers(&cwd, &registry);
            match select_packager(&cwd, &cfg.package.tool, &registry) {
                Ok(packager) => {
                    let identity = PublishPlanner::new(cfg).identity(None);
                    let request = PackageRequest::new(identity, PackageOptions::from_config(cfg));
                    match packager.validate_packagable(&cwd, &request) {
                        Ok(result) => {
                            errors.extend(result.errors);
                            warnings.extend(result.warnings);
                        }
                        Err(e) => errors.push(format!("Packager check: {}", e)),
                    }
                }
                Err(e) => warnings.push(format!("Packager detection: {}", e)),
            }
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "packagers": packagers,
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", style(path.display()).cyan());
                    }
                    if !packagers.is_empty() {
                        println!("Build tools: {}", packagers.join(", "));
                    }
                    println!();

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        println!("{} All checks passed", style("✓").green().bold());
                    }
                }
            }
        }

        if !passed {
            return Err(QuaysideError::from(WorkflowError::ValidationFailed(format!(
                "{} problem(s) found",
                errors.len()
            )))
            .into());
        }

        Ok(())
    }
}

//! ai-health-probe - one-shot health report for an Ollama-compatible service
//!
//! Checks the service, then the requested models (or every installed model),
//! and prints the results as JSON. Exits non-zero when the service cannot
//! take requests or any checked model is unhealthy.

#![allow(missing_docs)]

use ai_health_probe::utils::logging::{LogFormat, init_tracing};
use ai_health_probe::{HealthCheckClient, HealthCheckConfig, HealthCheckResult, HealthStatus};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "ai-health-probe", version, about = "Probe an AI inference service and its models")]
struct Args {
    /// YAML configuration file. Defaults come from AI_HEALTH_* variables otherwise.
    #[arg(short, long, env = "AI_HEALTH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Model to check. Repeat for several; all installed models when omitted.
    #[arg(short, long = "model")]
    models: Vec<String>,

    /// Only check the service, skip models
    #[arg(long)]
    service_only: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    service: &'a HealthCheckResult,
    models: Vec<&'a HealthCheckResult>,
}

impl Report<'_> {
    fn render(&self) -> ai_health_probe::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

async fn load_config(args: &Args) -> ai_health_probe::Result<HealthCheckConfig> {
    let mut config = match &args.config {
        Some(path) => HealthCheckConfig::from_file(path).await?,
        None => HealthCheckConfig::from_env()?,
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
        config.validate_config()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = init_tracing("ai_health_probe=info", format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match load_config(&args).await.and_then(HealthCheckClient::new) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = client.check_service_health().await;
    let models = if args.service_only || !service.status().allows_requests() {
        Vec::new()
    } else if args.models.is_empty() {
        client.check_available_models_health().await
    } else {
        client.check_models_health(&args.models).await
    };

    let report = Report {
        service: &service,
        models: models.iter().map(|m| m.as_ref()).collect(),
    };
    match report.render() {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let models_ok = models.iter().all(|m| m.status() != HealthStatus::Unhealthy);
    if service.status().allows_requests() && models_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

use alumni_match::cli::commands::{Cli, Commands};
use alumni_match::domain::entities::profile::ProfileFeatures;
use alumni_match::domain::error::DomainError;
use alumni_match::infrastructure::config::Settings;
use alumni_match::AlumniMatch;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match Settings::from_env() {
        Ok(settings) => match AlumniMatch::new(&settings) {
            Ok(am) => run_command(&am, &settings, cli.command).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        print_json(&json!({ "status": "error", "message": e.to_string() }));
        tracing::error!(error = %e, "command failed");
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run_command(am: &AlumniMatch, settings: &Settings, cmd: Commands) -> Result<(), DomainError> {
    match cmd {
        Commands::Train => {
            let report = am.train().await?;
            print_json(&json!({ "status": "success", "training": report }));
        }
        Commands::Recommend { json, top_n } => {
            let value: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| DomainError::InvalidQuery(format!("malformed JSON: {e}")))?;
            let query = ProfileFeatures::from_query(&value)?;
            let recommendations = am.recommend(&query, top_n.unwrap_or(settings.top_n))?;
            print_json(&json!({ "status": "success", "recommendations": recommendations }));
        }
        Commands::Similar { user_id, top_n } => {
            let recommendations = am.similar(&user_id, top_n.unwrap_or(settings.top_n))?;
            print_json(&json!({ "status": "success", "recommendations": recommendations }));
        }
        Commands::Stats => {
            print_json(&json!({ "status": "success", "stats": am.stats()? }));
        }
        Commands::Runs => {
            print_json(&json!({ "status": "success", "runs": am.runs()? }));
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

use clap::Parser;
use menicka::core::ConfigProvider;
use menicka::domain::model::WriteOutcome;
use menicka::utils::error::{ErrorSeverity, MenuError};
use menicka::utils::{logger, validation::Validate};
use menicka::{CliConfig, LocalStorage, MenuEngine, MenuPipeline};
use std::path::Path;

fn exit_code(e: &MenuError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &MenuError, stage: &str) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e).max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting menicka");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let dry_run = cli.dry_run;
    let config = match cli.into_app_config() {
        Ok(config) => config,
        Err(e) => fail(&e, "Loading configuration"),
    };

    if let Err(e) = config.validate() {
        fail(&e, "Configuration validation");
    }

    tracing::info!(
        "✅ {} sources configured, {} fallback menus",
        config.sources().len(),
        config.fallback_menus().len()
    );

    let output_path = config.output_path().to_string();
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = match MenuPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e, "Building HTTP client"),
    };
    tracing::info!("📅 Building menus for {:?}", pipeline.today());

    let engine = MenuEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - the snapshot will not be written");
        match engine.collect().await {
            Ok(menus) => println!("{}", serde_json::to_string_pretty(&menus)?),
            Err(e) => fail(&e, "Dry run"),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(outcome) => {
            let path = Path::new(&output_path).join(outcome.path());
            match outcome {
                WriteOutcome::Written { generated_at, .. } => {
                    tracing::info!("✅ Snapshot written ({})", generated_at);
                    println!("✅ Menus saved to: {}", path.display());
                }
                WriteOutcome::Unchanged { .. } => {
                    println!("ℹ️ Menus unchanged, kept: {}", path.display());
                }
            }
        }
        Err(e) => fail(&e, "Menu update"),
    }

    Ok(())
}

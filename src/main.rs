use clap::Parser;
use manuscript_counter::utils::{error::CounterError, logger, validation::Validate};
use manuscript_counter::{
    server, AppConfig, CliConfig, CountService, FileDocument, RegionCounter, ResourceLocks,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting manuscript-counter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let counter = match config.counter_config() {
        Ok(counter_config) => RegionCounter::new(counter_config),
        Err(e) => exit_with(&e),
    };
    tracing::debug!(
        exclusions = counter.config().exclusions().len(),
        max_line_bytes = counter.config().max_line_bytes(),
        "counter configured"
    );

    let service = Arc::new(CountService::new(
        Arc::new(counter),
        Arc::new(FileDocument::new(&config.document_path)),
        ResourceLocks::new(),
        config.goal,
    ));

    if cli.once {
        match service.count().await {
            Ok(result) => {
                println!("{}", serde_json::to_string(&result)?);
                return Ok(());
            }
            Err(e) => exit_with(&e),
        }
    }

    tracing::info!(
        "📄 Counting {} (goal: {})",
        config.document_path,
        service.goal()
    );

    let listener = match server::bind(&config.host, config.port).await {
        Ok(listener) => listener,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = server::serve(listener, server::router(service, &config.index_path)).await {
        exit_with(&e);
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> Result<AppConfig, CounterError> {
    let config = cli.resolve()?;
    config.validate()?;
    Ok(config)
}

fn exit_with(e: &CounterError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

use clap::Parser;
use news_verify::utils::error::{DetectorError, ErrorSeverity};
use news_verify::utils::{logger, validation::Validate};
use news_verify::{build_state, serve, CliConfig, ServiceConfig};

fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if config.monitoring.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting news-verify v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", redacted(&config));
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    // One process, a fixed pool of runtime worker threads.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {}", e);
            std::process::exit(3);
        }
    };

    tracing::info!(
        "Runtime started with {} worker threads",
        config.server.worker_threads
    );

    if let Err(e) = runtime.block_on(run(config)) {
        tracing::error!(
            "❌ Service failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }
}

async fn run(config: ServiceConfig) -> news_verify::Result<()> {
    let state = build_state(&config)?;
    state.monitor.log_stats("Startup");

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    serve(listener, state).await
}

fn exit_code(e: &DetectorError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn redacted(config: &ServiceConfig) -> ServiceConfig {
    let mut config = config.clone();
    if !config.factcheck.api_key.is_empty() {
        config.factcheck.api_key = "***".to_string();
    }
    if config.classifier.token.is_some() {
        config.classifier.token = Some("***".to_string());
    }
    config
}

use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use school_registry::cli::{Cli, Commands, cmd_promote_admin, cmd_snapshot};
use school_registry::config::AppConfig;
use school_registry::errors::StoreError;
use school_registry::runtime::lifetime;
use school_registry::storage::Storage;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();

    let cli = Cli::parse();
    let start_time = chrono::Utc::now();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {} v{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = match lifetime::startup::prepare_startup(config).await {
        Ok(startup) => startup,
        Err(e) => {
            error!("Failed to open storage: {}", e);
            report(&cli.command, &e);
            return ExitCode::FAILURE;
        }
    };
    let storage = startup.storage;

    debug!(
        "Storage ready in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_time)
            .num_milliseconds()
    );

    let outcome = tokio::select! {
        res = execute(&cli.command, storage.as_ref(), config) => Some(res),
        _ = lifetime::shutdown::listen_for_shutdown() => None,
    };

    // 无论成功、失败还是被中断都要释放连接池
    lifetime::shutdown::close_storage(&storage).await;

    match outcome {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(e)) => {
            report(&cli.command, &e);
            ExitCode::FAILURE
        }
        None => {
            warn!("Command interrupted before completion");
            ExitCode::from(130)
        }
    }
}

async fn execute(
    command: &Commands,
    storage: &dyn Storage,
    config: &AppConfig,
) -> Result<(), StoreError> {
    match command {
        Commands::PromoteAdmin { username } => {
            let username = username
                .as_deref()
                .unwrap_or(&config.admin.promote_username);
            cmd_promote_admin(storage, username).await?;
        }
        Commands::Snapshot => {
            println!("{}", cmd_snapshot(storage).await?);
        }
    }
    Ok(())
}

/// 快照命令失败时输出脱敏的 ErrorBody JSON，其余命令只写日志
fn report(command: &Commands, err: &StoreError) {
    if *command == Commands::Snapshot {
        match serde_json::to_string_pretty(&err.to_body()) {
            Ok(body) => println!("{body}"),
            Err(e) => error!("Failed to encode error body: {}", e),
        }
    }
}

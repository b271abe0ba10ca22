use anyhow::Context;
use clap::Parser;
use fractal_music::app::commands;
use fractal_music::config::Command;
use fractal_music::utils::error::{ErrorSeverity, FractalError};
use fractal_music::utils::{logger, validation::Validate};
use fractal_music::{server, AppConfig, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting fractal-music {}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Configuration: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Serve(_) => server::serve(config).await,
        Command::Render(args) => commands::render(&config, args).await.map(|path| {
            println!("✅ Render completed successfully!");
            println!("📁 Output saved to: {}", path.display());
        }),
        Command::Backtrace(args) => commands::backtrace(&config, args).await.map(|path| {
            println!("✅ Back trace completed successfully!");
            println!("📁 Output saved to: {}", path.display());
        }),
        Command::Zeros(args) => commands::zeros_report(&config, args).map(|report| {
            print!("{}", report);
        }),
    };

    if let Err(e) = result {
        report_and_exit(e);
    }

    Ok(())
}

fn report_and_exit(e: FractalError) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

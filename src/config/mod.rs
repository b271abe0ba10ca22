pub mod cli;
pub mod toml_config;

pub use cli::LocalStorage;
pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
pub use args::{BacktraceArgs, Cli, Command, RenderArgs, ServeArgs, ZerosArgs};

#[cfg(feature = "cli")]
mod args {
    use super::AppConfig;
    use crate::domain::model::OutputFormat;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Parser)]
    #[command(name = "fractal-music")]
    #[command(version)]
    #[command(about = "Renders inverse-iteration fractals and finds polynomial zeros")]
    pub struct Cli {
        #[arg(long, global = true, help = "Path to a TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Subcommand)]
    pub enum Command {
        /// 啟動 HTTP 服務
        Serve(ServeArgs),
        /// 以 w² + c 或多項式做逆向迭代
        Render(RenderArgs),
        /// 產生回溯樹
        Backtrace(BacktraceArgs),
        /// 列出多項式的零點與重數
        Zeros(ZerosArgs),
    }

    #[derive(Debug, Args)]
    pub struct ServeArgs {
        #[arg(long)]
        pub host: Option<String>,

        #[arg(long)]
        pub port: Option<u16>,

        #[arg(long, help = "Locale for parsing complex query parameters, e.g. de_DE")]
        pub locale: Option<String>,
    }

    #[derive(Debug, Args)]
    pub struct RenderArgs {
        #[arg(short, long, default_value = "10", help = "Recursion depth")]
        pub n: usize,

        #[arg(long, allow_hyphen_values = true, help = "Constant c of w² + c (default i)")]
        pub c0: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Start value (default 1, or 0 for polynomials)")]
        pub z0: Option<String>,

        #[arg(
            long,
            allow_hyphen_values = true,
            help = "Semicolon separated coefficients, highest power first"
        )]
        pub coefficients: Option<String>,

        #[arg(long)]
        pub width: Option<u32>,

        #[arg(long, help = "Locale for parsing complex numbers, e.g. en_US")]
        pub locale: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        pub format: OutputFormat,

        #[arg(short, long, default_value = "./output")]
        pub output: PathBuf,

        #[arg(long, help = "Log CPU and memory usage")]
        pub monitor: bool,
    }

    #[derive(Debug, Args)]
    pub struct BacktraceArgs {
        #[arg(long, allow_hyphen_values = true)]
        pub imax: Option<i64>,

        #[arg(long, allow_hyphen_values = true)]
        pub spread: Option<i64>,

        #[arg(long)]
        pub width: Option<u32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        pub format: OutputFormat,

        #[arg(short, long, default_value = "./output")]
        pub output: PathBuf,

        #[arg(long, help = "Log CPU and memory usage")]
        pub monitor: bool,
    }

    #[derive(Debug, Args)]
    pub struct ZerosArgs {
        #[arg(allow_hyphen_values = true, help = "Semicolon separated coefficients, highest power first")]
        pub coefficients: String,

        #[arg(long, default_value = "1e-4", help = "Distance below which zeros are merged")]
        pub eps: f64,

        #[arg(long, help = "Locale for parsing complex numbers, e.g. en_US")]
        pub locale: Option<String>,
    }

    impl Cli {
        /// 命令列參數覆蓋設定檔
        pub fn apply_overrides(&self, config: &mut AppConfig) {
            if self.json_logs {
                config.logging.json = true;
            }

            let locale = match &self.command {
                Command::Serve(args) => {
                    if let Some(host) = &args.host {
                        config.server.host = host.clone();
                    }
                    if let Some(port) = args.port {
                        config.server.port = port;
                    }
                    args.locale.as_ref()
                }
                Command::Render(args) => args.locale.as_ref(),
                Command::Zeros(args) => args.locale.as_ref(),
                Command::Backtrace(_) => None,
            };

            if let Some(locale) = locale {
                config.mls.locale = locale.clone();
            }
        }
    }

}

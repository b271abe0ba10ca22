use crate::config::{AppConfig, BacktraceArgs, LocalStorage, RenderArgs, ZerosArgs};
use crate::core::engine::{FractalKind, RenderEngine, RenderJob};
use crate::core::render::validate_width;
use crate::core::BackTrace;
use crate::math::{newton, Complex, ComplexPolynomial};
use crate::utils::error::Result;
use crate::utils::number::{parse_coefficients, parse_complex};
use std::fmt::Write as _;
use std::path::PathBuf;

/// 命令列寬度優先，否則取設定檔
pub fn resolve_width(config: &AppConfig, width: Option<u32>) -> Result<u32> {
    let width = width.unwrap_or(config.render.width);
    validate_width(width)?;
    Ok(width)
}

/// 把 `render` 的參數組成工作
pub fn render_job(config: &AppConfig, args: &RenderArgs) -> Result<RenderJob> {
    let locale = config.number_locale();

    let (kind, default_z0) = match &args.coefficients {
        Some(text) => (
            FractalKind::Polynomial {
                coefficients: parse_coefficients(text, locale)?,
            },
            Complex::ZERO,
        ),
        None => (
            FractalKind::Square {
                c: parse_complex(args.c0.as_deref(), Complex::I, locale),
            },
            Complex::ONE,
        ),
    };

    Ok(RenderJob {
        kind,
        z0: parse_complex(args.z0.as_deref(), default_z0, locale),
        depth: args.n,
        width: resolve_width(config, args.width)?,
        format: args.format,
    })
}

/// 執行 `render`，回傳輸出檔的完整路徑
pub async fn render(config: &AppConfig, args: &RenderArgs) -> Result<PathBuf> {
    let job = render_job(config, args)?;

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = RenderEngine::new_with_monitoring(LocalStorage::new(&args.output), args.monitor);
    let path = engine.render(&job).await?;
    Ok(args.output.join(path))
}

pub async fn backtrace(config: &AppConfig, args: &BacktraceArgs) -> Result<PathBuf> {
    let width = resolve_width(config, args.width)?;
    let backtrace = BackTrace::new(args.imax, args.spread);

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = RenderEngine::new_with_monitoring(LocalStorage::new(&args.output), args.monitor);
    let path = engine.backtrace(&backtrace, width, args.format).await?;
    Ok(args.output.join(path))
}

/// `zeros` 的輸出：先印多項式，再一行一個零點
pub fn zeros_report(config: &AppConfig, args: &ZerosArgs) -> Result<String> {
    let coefficients = parse_coefficients(&args.coefficients, config.number_locale())?;
    let tolerance = newton::grouping_tolerance(Some(args.eps))?;

    let p = ComplexPolynomial::new(&coefficients);
    let zeros = newton::zeros(&p, None, newton::ZEROS_EPS2, tolerance)?;
    tracing::debug!("Found {} distinct zeros of {}", zeros.len(), p);

    let mut report = String::new();
    let _ = writeln!(report, "p(z) = {}", p);
    if zeros.is_empty() {
        report.push_str("(no zeros)\n");
    }
    for zero in &zeros {
        let _ = writeln!(report, "{}", zero);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cli, Command};
    use crate::core::OutputFormat;
    use crate::utils::error::FractalError;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> (AppConfig, Command) {
        let cli = Cli::parse_from(args.iter().copied());
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        (config, cli.command)
    }

    fn render_args(output: PathBuf, width: Option<u32>) -> RenderArgs {
        RenderArgs {
            n: 4,
            c0: None,
            z0: None,
            coefficients: None,
            width,
            locale: None,
            format: OutputFormat::Csv,
            output,
            monitor: false,
        }
    }

    fn zeros_args(coefficients: &str, eps: f64) -> ZerosArgs {
        ZerosArgs {
            coefficients: coefficients.to_string(),
            eps,
            locale: None,
        }
    }

    #[test]
    fn test_resolve_width() {
        let config = AppConfig::default();
        assert_eq!(resolve_width(&config, None).unwrap(), config.render.width);
        assert_eq!(resolve_width(&config, Some(64)).unwrap(), 64);

        for width in [0, 15, 8193, 100_000] {
            assert!(
                matches!(
                    resolve_width(&config, Some(width)),
                    Err(FractalError::InvalidArgument { .. })
                ),
                "width {} should be rejected",
                width
            );
        }
    }

    #[tokio::test]
    async fn test_oversized_width_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::default();

        let args = render_args(temp_dir.path().to_path_buf(), Some(100_000));
        assert!(matches!(
            render(&config, &args).await,
            Err(FractalError::InvalidArgument { .. })
        ));

        let args = BacktraceArgs {
            imax: Some(3),
            spread: Some(2),
            width: Some(9000),
            format: OutputFormat::Png,
            output: temp_dir.path().to_path_buf(),
            monitor: false,
        };
        assert!(matches!(
            backtrace(&config, &args).await,
            Err(FractalError::InvalidArgument { .. })
        ));

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_render_returns_joined_output_path() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out");
        let config = AppConfig::default();

        let path = render(&config, &render_args(output.clone(), Some(64)))
            .await
            .unwrap();
        assert_eq!(path, output.join("fractal.csv"));
        assert!(path.exists());

        let args = BacktraceArgs {
            imax: Some(3),
            spread: Some(2),
            width: None,
            format: OutputFormat::Csv,
            output: output.clone(),
            monitor: false,
        };
        let path = backtrace(&config, &args).await.unwrap();
        assert_eq!(path, output.join("backtrace.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_render_job_uses_locale_flag() {
        let (config, command) = parse(&[
            "fractal-music",
            "render",
            "--locale",
            "en_US",
            "--c0",
            "-1+0.5i",
        ]);
        let Command::Render(args) = command else {
            panic!("expected render command");
        };

        let job = render_job(&config, &args).unwrap();
        assert_eq!(job.z0, Complex::ONE);
        assert!(matches!(
            job.kind,
            FractalKind::Square { c } if c == Complex::new(-1.0, 0.5)
        ));
    }

    #[test]
    fn test_render_job_default_locale_falls_back() {
        // de_DE 下小數點寫法解析失敗，退回 i
        let (config, command) = parse(&["fractal-music", "render", "--c0", "-1+0.5i"]);
        let Command::Render(args) = command else {
            panic!("expected render command");
        };

        let job = render_job(&config, &args).unwrap();
        assert!(matches!(job.kind, FractalKind::Square { c } if c == Complex::I));
        assert_eq!(job.width, config.render.width);
    }

    #[test]
    fn test_render_job_polynomial_defaults_to_origin() {
        let config = AppConfig::default();
        let mut args = render_args(PathBuf::from("unused"), None);
        args.coefficients = Some("1; 0; -1".to_string());

        let job = render_job(&config, &args).unwrap();
        assert_eq!(job.z0, Complex::ZERO);
        assert!(matches!(
            job.kind,
            FractalKind::Polynomial { ref coefficients } if coefficients.len() == 3
        ));
    }

    #[test]
    fn test_zeros_report_lists_zeros() {
        let config = AppConfig::default();
        let report = zeros_report(&config, &zeros_args("1;0;-1", 1e-4)).unwrap();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("p(z) = "));
        assert!(!report.contains("(no zeros)"));
    }

    #[test]
    fn test_zeros_report_constant_polynomial() {
        let config = AppConfig::default();
        let report = zeros_report(&config, &zeros_args("5", 1e-4)).unwrap();

        assert_eq!(report.lines().count(), 2);
        assert_eq!(report.lines().last(), Some("(no zeros)"));
    }

    #[test]
    fn test_zeros_report_rejects_bad_eps() {
        let config = AppConfig::default();
        for eps in [0.0, -1e-4, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                zeros_report(&config, &zeros_args("1;0;-1", eps)),
                Err(FractalError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_zeros_locale_flag() {
        // 英文語系下 "0.5" 是合法係數
        let (config, command) = parse(&["fractal-music", "zeros", "2;-1", "--locale", "en_US"]);
        let Command::Zeros(mut args) = command else {
            panic!("expected zeros command");
        };
        args.coefficients = "1;-0.5".to_string();

        let report = zeros_report(&config, &args).unwrap();
        assert_eq!(report.lines().count(), 2);
        assert!(report.lines().nth(1).is_some_and(|line| line.contains("0.5")));
    }
}

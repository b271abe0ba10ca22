use super::AppState;
use crate::core::render::{encode_png, plot, plot_traced};
use crate::core::{BackTrace, Calculator, PolynomialFractal, SquareFractal, Storage};
use crate::math::{newton, Complex, ComplexPolynomial, Zero};
use crate::utils::error::{FractalError, Result};
use crate::utils::number::{parse_coefficients, parse_complex};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

pub const DEFAULT_DEPTH: i64 = 10;
pub const DEFAULT_POLYNOMIAL_DEPTH: i64 = 5;

impl IntoResponse for FractalError {
    fn into_response(self) -> Response {
        let status = match self {
            FractalError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ref e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("❌ {} ({})", self, self.recovery_suggestion());
        } else {
            warn!("⚠️ Rejected request: {}", self);
        }

        let body = json!({
            "error": self.user_friendly_message(),
            "category": self.category(),
        });
        (status, Json(body)).into_response()
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

fn depth(n: Option<i64>, default: i64) -> Result<usize> {
    let n = n.unwrap_or(default);
    usize::try_from(n).map_err(|_| FractalError::InvalidArgument {
        message: format!("Maximal recursion depth should be at least 1, got {}", n),
    })
}

fn render_png(state: &AppState, points: &[Complex]) -> Result<Response> {
    let image = plot(points, state.config.render.width)?;
    info!(
        "🖼️ Rendered {} points as {}x{} PNG",
        points.len(),
        image.width(),
        image.height()
    );
    Ok(png_response(encode_png(&image)?))
}

#[derive(Debug, Deserialize)]
pub struct SquareQuery {
    pub n: Option<i64>,
    pub c0: Option<String>,
    pub z0: Option<String>,
}

/// `w² + c` 的逆向迭代
pub async fn square_png(
    State(state): State<AppState>,
    Query(query): Query<SquareQuery>,
) -> Result<Response> {
    let c = parse_complex(query.c0.as_deref(), Complex::I, state.locale);
    let z0 = parse_complex(query.z0.as_deref(), Complex::ONE, state.locale);
    let n = depth(query.n, DEFAULT_DEPTH)?;

    let fractal = SquareFractal::new(c);
    let points = Calculator::calculate(&fractal, z0, n)?;

    render_png(&state, &points)
}

#[derive(Debug, Deserialize)]
pub struct PolynomialQuery {
    pub coefficients: Option<String>,
    pub z0: Option<String>,
    pub n: Option<i64>,
}

fn required_coefficients(state: &AppState, coefficients: Option<&str>) -> Result<Vec<Complex>> {
    let text = coefficients.ok_or_else(|| FractalError::InvalidArgument {
        message: "Parameter 'coefficients' is required".to_string(),
    })?;
    parse_coefficients(text, state.locale)
}

pub async fn polynomial_png(
    State(state): State<AppState>,
    Query(query): Query<PolynomialQuery>,
) -> Result<Response> {
    let coefficients = required_coefficients(&state, query.coefficients.as_deref())?;
    let z0 = parse_complex(query.z0.as_deref(), Complex::ZERO, state.locale);
    let n = depth(query.n, DEFAULT_POLYNOMIAL_DEPTH)?;

    let fractal = PolynomialFractal::new(&coefficients)?;
    let points = Calculator::calculate(&fractal, z0, n)?;

    render_png(&state, &points)
}

pub async fn sample_png(State(state): State<AppState>) -> Result<Response> {
    let bytes = state
        .storage
        .read_file(&state.config.render.sample_path)
        .await?;
    Ok(png_response(bytes))
}

#[derive(Debug, Deserialize)]
pub struct BackTraceQuery {
    pub imax: Option<i64>,
    pub spread: Option<i64>,
}

pub async fn backtrace_png(
    State(state): State<AppState>,
    Query(query): Query<BackTraceQuery>,
) -> Result<Response> {
    let points = BackTrace::new(query.imax, query.spread).calculate()?;

    let image = plot_traced(&points, state.config.render.width)?;
    info!(
        "🌳 Rendered back trace with {} nodes as {}x{} PNG",
        points.len(),
        image.width(),
        image.height()
    );
    Ok(png_response(encode_png(&image)?))
}

#[derive(Debug, Deserialize)]
pub struct ZerosQuery {
    pub coefficients: Option<String>,
    pub eps: Option<f64>,
}

pub async fn zeros(
    State(state): State<AppState>,
    Query(query): Query<ZerosQuery>,
) -> Result<Json<Vec<Zero>>> {
    let coefficients = required_coefficients(&state, query.coefficients.as_deref())?;
    let tolerance = newton::grouping_tolerance(query.eps)?;

    let p = ComplexPolynomial::new(&coefficients);
    let zeros = newton::zeros(&p, None, newton::ZEROS_EPS2, tolerance)?;

    Ok(Json(zeros))
}

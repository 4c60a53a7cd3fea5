mod error;
mod inputs;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::net::TcpListener;

pub use error::{CliError, InputError};
use inputs::{
    CompoundArgs, CompoundPayload, ProjectionArgs, ProjectionPayload, RetirementArgs,
    RetirementPayload, build_compound_input, build_projection_input, build_retirement_input,
    compound_args_from_payload, projection_args_from_payload, retirement_args_from_payload,
};

use crate::core::{
    ProjectionCache, ProjectionInput, YearRecord, analyze_retirement, compound_interest_series,
    retirement_snapshot,
};

#[derive(Parser, Debug)]
#[command(
    name = "wealth-projection",
    about = "Deterministic retirement, Coast FIRE and compound-interest projections",
    after_help = "Run `wealth-projection serve [port]` to start the HTTP API."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Year-by-year keep-contributing vs coast projection
    Project(ProjectionArgs),
    /// Earliest retirement age under the 4% rule
    RetirementAge(RetirementArgs),
    /// Compound vs simple interest accumulation
    Compound(CompoundArgs),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse<'a> {
    end_age: u32,
    retirement_age: u32,
    retirement_snapshot: Option<&'a YearRecord>,
    years: &'a [YearRecord],
}

impl<'a> ProjectionResponse<'a> {
    fn new(input: &ProjectionInput, years: &'a [YearRecord]) -> Self {
        Self {
            end_age: input.end_age(),
            retirement_age: input.retirement_age,
            retirement_snapshot: retirement_snapshot(years),
            years,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Runs one CLI subcommand and returns its pretty-printed JSON output.
pub fn run_cli<I, T>(args: I) -> Result<String, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let output = match cli.command {
        Command::Project(args) => {
            let input = build_projection_input(&args)?;
            let years = crate::core::project(&input);
            serde_json::to_string_pretty(&ProjectionResponse::new(&input, &years))?
        }
        Command::RetirementAge(args) => {
            let input = build_retirement_input(&args)?;
            serde_json::to_string_pretty(&analyze_retirement(&input))?
        }
        Command::Compound(args) => {
            let input = build_compound_input(&args)?;
            serde_json::to_string_pretty(&compound_interest_series(&input))?
        }
    };
    Ok(output)
}

pub fn router(cache: Arc<ProjectionCache>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route(
            "/api/retirement-age",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route(
            "/api/compound-interest",
            get(compound_get_handler).post(compound_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(cache)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(Arc::new(ProjectionCache::default()));

    let listener = TcpListener::bind(addr).await?;
    log::info!("projection API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(
    State(cache): State<Arc<ProjectionCache>>,
    Query(payload): Query<ProjectionPayload>,
) -> Response {
    projection_handler_impl(&cache, payload)
}

async fn projection_post_handler(
    State(cache): State<Arc<ProjectionCache>>,
    Json(payload): Json<ProjectionPayload>,
) -> Response {
    projection_handler_impl(&cache, payload)
}

async fn retirement_get_handler(Query(payload): Query<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

async fn retirement_post_handler(Json(payload): Json<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

async fn compound_get_handler(Query(payload): Query<CompoundPayload>) -> Response {
    compound_handler_impl(payload)
}

async fn compound_post_handler(Json(payload): Json<CompoundPayload>) -> Response {
    compound_handler_impl(payload)
}

fn projection_handler_impl(cache: &ProjectionCache, payload: ProjectionPayload) -> Response {
    let input = match build_projection_input(&projection_args_from_payload(payload)) {
        Ok(input) => input,
        Err(err) => return rejected("projection", &err),
    };
    let years = cache.get_or_compute(&input);
    json_response(StatusCode::OK, ProjectionResponse::new(&input, &years))
}

fn retirement_handler_impl(payload: RetirementPayload) -> Response {
    match build_retirement_input(&retirement_args_from_payload(payload)) {
        Ok(input) => json_response(StatusCode::OK, analyze_retirement(&input)),
        Err(err) => rejected("retirement-age", &err),
    }
}

fn compound_handler_impl(payload: CompoundPayload) -> Response {
    match build_compound_input(&compound_args_from_payload(payload)) {
        Ok(input) => json_response(StatusCode::OK, compound_interest_series(&input)),
        Err(err) => rejected("compound-interest", &err),
    }
}

fn rejected(endpoint: &str, err: &InputError) -> Response {
    log::warn!("rejected {endpoint} request: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

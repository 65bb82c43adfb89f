//! AWS Lambda handler for the `/solve` endpoint
//!
//! Accepts `{ "spending": [...], "income": [...] }` and returns
//! `{ "status": 0, "irr": ... }` or `{ "status": <nonzero> }`.
//! Solver options are read once from IRR_* environment variables.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use irr_solver::{handle_solve, SolveRequest, SolverOptions};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn with_cors(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let response = with_cors(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?;
    Ok(response)
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &ErrorBody { error: message })
}

fn is_solve_path(path: &str) -> bool {
    matches!(path.trim_end_matches('/'), "" | "/solve")
}

/// Lambda handler function
async fn handler(event: Request, options: &SolverOptions) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();

    // Handle CORS preflight
    if method == "OPTIONS" {
        return Ok(with_cors(200).body(Body::Empty)?);
    }

    if !is_solve_path(event.uri().path()) {
        return error_response(404, "Not found");
    }

    if method != "POST" {
        return error_response(405, "Method not allowed");
    }

    let parsed: Result<SolveRequest, serde_json::Error> = match event.body() {
        Body::Text(s) => serde_json::from_str(s),
        Body::Binary(b) => serde_json::from_slice(b),
        Body::Empty => serde_json::from_str("{}"),
    };

    let request = match parsed {
        Ok(r) => r,
        Err(e) => {
            return error_response(400, &format!("Invalid JSON: {}", e));
        }
    };

    let response = handle_solve(&request, options);
    log::info!(
        "Solved {} periods: status {}",
        request.spending.len(),
        response.status
    );

    json_response(200, &response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let options = SolverOptions::from_env();
    log::info!("Starting IRR solver with {:?}", options);

    run(service_fn(move |event: Request| async move { handler(event, &options).await })).await
}

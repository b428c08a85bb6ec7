// Smart Unit Converter - Web Server
// Browser form + REST API with Axum

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use smart_unit_converter::{
    Category, ConversionEngine, ConversionReport, Direction, HistoryLedger, HistoryRecord,
    DISPLAY_WINDOW,
};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

/// Shared application state
///
/// One ledger for the whole process. Per-session isolation belongs to a
/// session-management layer in front of this server, not to the core.
#[derive(Clone)]
struct AppState {
    engine: ConversionEngine,
    ledger: Arc<Mutex<HistoryLedger>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

/// Conversion request body
#[derive(Deserialize)]
struct ConvertRequest {
    category: String,
    direction: String,
    value: f64,
}

/// Conversion response
#[derive(Serialize)]
struct ConvertResponse {
    result: f64,
    formatted: String,
    history: Vec<String>,
}

/// One category with its direction pairs
#[derive(Serialize)]
struct CategoryResponse {
    name: &'static str,
    label: &'static str,
    directions: Vec<DirectionResponse>,
}

#[derive(Serialize)]
struct DirectionResponse {
    name: &'static str,
    label: &'static str,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/categories - Categories with their direction pairs
async fn get_categories() -> impl IntoResponse {
    let categories: Vec<CategoryResponse> = Category::ALL
        .iter()
        .map(|c| CategoryResponse {
            name: c.as_str(),
            label: c.label(),
            directions: c
                .directions()
                .iter()
                .map(|d| DirectionResponse {
                    name: d.as_str(),
                    label: d.label(),
                })
                .collect(),
        })
        .collect();

    Json(ApiResponse::ok(categories))
}

/// POST /api/convert - Run a conversion and record it
async fn convert(
    State(state): State<AppState>,
    Json(req): Json<ConvertRequest>,
) -> impl IntoResponse {
    // Caller-boundary validation; the engine itself does no range checks
    if req.value <= 0.0 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err("Please enter a value greater than 0.")),
        )
            .into_response();
    }

    let Some(category) = Category::parse_label(&req.category) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(format!(
                "unknown category '{}'",
                req.category
            ))),
        )
            .into_response();
    };

    let Some(direction) = Direction::parse_label(&req.direction) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(format!(
                "unknown conversion '{}'",
                req.direction
            ))),
        )
            .into_response();
    };

    match state.engine.convert(category, direction, req.value) {
        Ok(result) => {
            let record = HistoryRecord::new(category, direction, req.value, result);
            let formatted = record.formatted.clone();

            let mut ledger = state.ledger.lock().unwrap();
            ledger.append(record);
            let history = ledger.recent_entries(DISPLAY_WINDOW);

            (
                StatusCode::OK,
                Json(ApiResponse::ok(ConvertResponse {
                    result,
                    formatted,
                    history,
                })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        )
            .into_response(),
    }
}

/// GET /api/history - Recent conversion history (last 5)
async fn get_history(State(state): State<AppState>) -> impl IntoResponse {
    let ledger = state.ledger.lock().unwrap();
    Json(ApiResponse::ok(ledger.recent_entries(DISPLAY_WINDOW)))
}

/// POST /api/history/clear - Clear the history (idempotent)
async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    let mut ledger = state.ledger.lock().unwrap();
    ledger.clear();
    Json(ApiResponse::ok("History cleared"))
}

/// GET /api/report - Plain-text export of the recent history window
async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    let ledger = state.ledger.lock().unwrap();
    let report = ConversionReport::from_ledger(&ledger);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report.to_text(),
    )
}

/// GET / - Serve the conversion form
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Smart Unit Converter - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState {
        engine: ConversionEngine::new(),
        ledger: Arc::new(Mutex::new(HistoryLedger::new())),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/categories", get(get_categories))
        .route("/convert", post(convert))
        .route("/history", get(get_history))
        .route("/history/clear", post(clear_history))
        .route("/report", get(get_report))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/categories");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState {
            engine: ConversionEngine::new(),
            ledger: Arc::new(Mutex::new(HistoryLedger::new())),
        }
    }

    #[tokio::test]
    async fn test_convert_rejects_nonpositive_value() {
        let state = test_state();
        let response = convert(
            State(state.clone()),
            Json(ConvertRequest {
                category: "Length".to_string(),
                direction: "Kilometers -> Miles".to_string(),
                value: 0.0,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_convert_rejects_mismatched_pair() {
        let state = test_state();
        let response = convert(
            State(state.clone()),
            Json(ConvertRequest {
                category: "Length".to_string(),
                direction: "Celsius ➡️ Fahrenheit".to_string(),
                value: 5.0,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_convert_appends_one_record() {
        let state = test_state();
        let response = convert(
            State(state.clone()),
            Json(ConvertRequest {
                category: "📏 Length".to_string(),
                direction: "Kilometers ➡️ Miles".to_string(),
                value: 10.0,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_history_is_idempotent() {
        let state = test_state();
        clear_history(State(state.clone())).await;
        clear_history(State(state.clone())).await;
        assert!(state.ledger.lock().unwrap().is_empty());
    }
}

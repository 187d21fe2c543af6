//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::board::{BoardError, RandomBoard};
use crate::domain::{
    FlightError, FlightNumber, InvalidTerminalId, LandingTime, Plane, ShuttleId, TerminalId,
};
use crate::graph::GraphError;
use crate::planner::PathFinder;
use crate::security::SecurityError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/terminals", get(list_terminals).post(insert_terminal))
        .route("/terminals/:id", delete(remove_terminal))
        .route("/terminals/:id/shuttles", get(outgoing_shuttles))
        .route("/shuttles", post(insert_shuttle))
        .route("/shuttles/:id", delete(remove_shuttle))
        .route("/routes/shortest", get(shortest_route))
        .route("/routes/fastest", get(fastest_route))
        .route("/landings", post(add_plane))
        .route("/landings/allocate", post(allocate_slot))
        .route("/landings/:flight/emergency", post(emergency_landing))
        .route("/board", get(arrivals_board).post(sort_board))
        .route("/security/passengers", post(add_passenger))
        .route(
            "/security/passengers/:passport_id",
            get(get_passenger).delete(remove_passenger),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_terminals(State(state): State<AppState>) -> Json<TerminalListResponse> {
    let airport = state.airport();
    let terminals = airport
        .graph
        .terminals()
        .into_iter()
        .map(TerminalResult::from_terminal)
        .collect();

    Json(TerminalListResponse {
        terminals,
        shuttle_capacity: airport.graph.shuttle_capacity(),
    })
}

async fn insert_terminal(
    State(state): State<AppState>,
    Json(req): Json<CreateTerminalRequest>,
) -> Result<Response, AppError> {
    let id = TerminalId::parse(&req.id)?;
    let terminal = state.airport().graph.insert_terminal(id, req.waiting_time)?;

    Ok((
        StatusCode::CREATED,
        Json(TerminalResult::from_terminal(&terminal)),
    )
        .into_response())
}

async fn remove_terminal(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<TerminalResult>, AppError> {
    let id = TerminalId::parse(&id)?;
    let removed = state.airport().graph.remove_terminal(&id)?;
    Ok(Json(TerminalResult::from_terminal(&removed)))
}

async fn outgoing_shuttles(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<ShuttleListResponse>, AppError> {
    let id = TerminalId::parse(&id)?;
    let airport = state.airport();
    let shuttles = airport
        .graph
        .outgoing_shuttles(&id)?
        .iter()
        .map(ShuttleResult::from_shuttle)
        .collect();

    Ok(Json(ShuttleListResponse {
        terminal: id.as_str().to_string(),
        shuttles,
    }))
}

async fn insert_shuttle(
    State(state): State<AppState>,
    Json(req): Json<CreateShuttleRequest>,
) -> Result<Response, AppError> {
    let origin = TerminalId::parse(&req.origin)?;
    let destination = TerminalId::parse(&req.destination)?;
    let shuttle = state
        .airport()
        .graph
        .insert_shuttle(&origin, &destination, req.travel_time)?;

    Ok((
        StatusCode::CREATED,
        Json(ShuttleResult::from_shuttle(&shuttle)),
    )
        .into_response())
}

async fn remove_shuttle(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<u64>,
) -> Result<Json<ShuttleResult>, AppError> {
    let mut airport = state.airport();
    let not_found = || AppError::NotFound {
        message: format!("unknown shuttle: {}", ShuttleId(id)),
    };

    let shuttle = airport.graph.shuttle(ShuttleId(id)).cloned().ok_or_else(not_found)?;
    if !airport.graph.remove_shuttle(&shuttle) {
        return Err(not_found());
    }
    Ok(Json(ShuttleResult::from_shuttle(&shuttle)))
}

fn parse_route(query: &RouteQuery) -> Result<(TerminalId, TerminalId), AppError> {
    Ok((TerminalId::parse(&query.from)?, TerminalId::parse(&query.to)?))
}

async fn shortest_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResult>, AppError> {
    let (from, to) = parse_route(&query)?;
    let airport = state.airport();
    let path = PathFinder::new(&airport.graph).shortest_path(&from, &to)?;
    Ok(Json(RouteResult::from_path(&path)))
}

async fn fastest_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResult>, AppError> {
    let (from, to) = parse_route(&query)?;
    let airport = state.airport();
    let path = PathFinder::new(&airport.graph)
        .fastest_path(&from, &to)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("no route from {from} to {to}"),
        })?;
    Ok(Json(RouteResult::from_path(&path)))
}

async fn add_plane(
    State(state): State<AppState>,
    Json(req): Json<AddPlaneRequest>,
) -> Result<Response, AppError> {
    let flight = FlightNumber::parse(&req.flight)?;
    let time = LandingTime::parse_hhmm(&req.time)?;

    let mut airport = state.airport();
    airport.dispatcher.add_plane(flight.clone(), time);
    info!(%flight, %time, "Queued plane for landing");

    Ok((
        StatusCode::CREATED,
        Json(LandingResponse {
            flight: Some(flight.as_str().to_string()),
            queued: airport.dispatcher.len(),
        }),
    )
        .into_response())
}

async fn allocate_slot(
    State(state): State<AppState>,
    Json(req): Json<AllocateSlotRequest>,
) -> Result<Json<LandingResponse>, AppError> {
    let now = LandingTime::parse_hhmm(&req.current_time)?;

    let mut airport = state.airport();
    let flight = airport.dispatcher.allocate_landing_slot(now);
    Ok(Json(LandingResponse {
        flight: flight.map(|f| f.as_str().to_string()),
        queued: airport.dispatcher.len(),
    }))
}

async fn emergency_landing(
    State(state): State<AppState>,
    UrlPath(flight): UrlPath<String>,
) -> Result<Json<LandingResponse>, AppError> {
    let flight = FlightNumber::parse(&flight)?;

    let mut airport = state.airport();
    let landed = airport
        .dispatcher
        .emergency_landing(&flight)
        .ok_or_else(|| AppError::NotFound {
            message: format!("flight {flight} is not queued"),
        })?;
    warn!(%landed, "Emergency landing");

    Ok(Json(LandingResponse {
        flight: Some(landed.as_str().to_string()),
        queued: airport.dispatcher.len(),
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Planes waiting to land, earliest first.
async fn arrivals_board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let planes: Vec<Plane> = state.airport().dispatcher.planes().iter().cloned().collect();

    if accepts_html(&headers) {
        let template = BoardTemplate {
            planes: planes.iter().map(PlaneView::from_plane).collect(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let planes = planes.iter().map(PlaneResult::from_plane).collect();
        Ok(Json(BoardResponse { planes }).into_response())
    }
}

/// Sort a batch of `FLIGHT,HH:MM` lines posted as plain text.
async fn sort_board(body: String) -> Result<Json<BoardResponse>, AppError> {
    let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut board = RandomBoard::from_csv_lines(&lines)?;
    let planes = board.sort().iter().map(PlaneResult::from_plane).collect();
    Ok(Json(BoardResponse { planes }))
}

async fn add_passenger(
    State(state): State<AppState>,
    Json(req): Json<AddPassengerRequest>,
) -> Result<Response, AppError> {
    let mut airport = state.airport();
    airport.security.add_passenger(&req.name, &req.passport_id)?;

    let visits = airport.security.visits(&req.passport_id).unwrap_or(1);
    let status = if visits == 1 {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(PassengerResult {
            passport_id: req.passport_id,
            name: req.name,
            visits,
        }),
    )
        .into_response())
}

async fn get_passenger(
    State(state): State<AppState>,
    UrlPath(passport_id): UrlPath<String>,
) -> Result<Json<PassengerResult>, AppError> {
    let airport = state.airport();
    let (Some(name), Some(visits)) = (
        airport.security.get(&passport_id),
        airport.security.visits(&passport_id),
    ) else {
        return Err(AppError::NotFound {
            message: format!("unknown passenger: {passport_id}"),
        });
    };

    Ok(Json(PassengerResult {
        name: name.to_string(),
        passport_id,
        visits,
    }))
}

async fn remove_passenger(
    State(state): State<AppState>,
    UrlPath(passport_id): UrlPath<String>,
) -> Result<StatusCode, AppError> {
    if state.airport().security.remove(&passport_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("unknown passenger: {passport_id}"),
        })
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownTerminal(_) => AppError::NotFound {
                message: e.to_string(),
            },
            GraphError::DuplicateTerminal(_) => AppError::Conflict {
                message: e.to_string(),
            },
        }
    }
}

impl From<InvalidTerminalId> for AppError {
    fn from(e: InvalidTerminalId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<FlightError> for AppError {
    fn from(e: FlightError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SecurityError> for AppError {
    fn from(e: SecurityError) -> Self {
        match e {
            SecurityError::EmptyPassportId => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Conflict {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "Request failed");
        } else {
            tracing::debug!(%status, %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

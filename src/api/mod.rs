//! JSON HTTP API over the planning core

use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{instrument, warn};

use crate::{
    TripEstimatorError,
    geo::distance_km,
    models::{Airport, Coordinate, EstimationResult, Place, TripQuery},
    planner::{PlanRequest, PlanningContext, TripPlan, TripPlanner},
    weather::WeatherCondition,
};

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: TripPlanner,
}

/// Maps library errors onto HTTP responses
pub struct ApiError(TripEstimatorError);

impl From<TripEstimatorError> for ApiError {
    fn from(err: TripEstimatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            warn!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = json!({
            "error": self.0.code().as_str(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

// Extractor failures share the error envelope of library errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TripEstimatorError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(TripEstimatorError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(TripEstimatorError::validation(rejection.body_text()))
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct DistanceParams {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponse {
    pub distance_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct PointParams {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightEstimateRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherConditionResponse {
    pub code: u8,
    pub condition: WeatherCondition,
    pub label: String,
    /// Outdoor plans are likely to be disrupted
    pub wet: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/distance", get(get_distance))
        .route("/airports/nearest", get(get_nearest_airport))
        .route("/flight/estimate", post(estimate_flight))
        .route("/estimate", post(estimate))
        .route("/plan", post(plan))
        .route("/places/normalize", post(normalize_places))
        .route("/weather/condition/{code}", get(weather_condition))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

#[instrument(level = "debug")]
async fn get_distance(
    params: Result<Query<DistanceParams>, QueryRejection>,
) -> ApiResult<DistanceResponse> {
    let Query(params) = params?;
    let from = Coordinate::new(params.from_lat, params.from_lon)?;
    let to = Coordinate::new(params.to_lat, params.to_lon)?;
    Ok(Json(DistanceResponse {
        distance_km: distance_km(&from, &to),
    }))
}

#[instrument(level = "debug", skip(state))]
async fn get_nearest_airport(
    State(state): State<AppState>,
    params: Result<Query<PointParams>, QueryRejection>,
) -> ApiResult<Airport> {
    let Query(params) = params?;
    let point = Coordinate::new(params.lat, params.lon)?;
    Ok(Json(state.planner.airports().nearest(&point).clone()))
}

#[instrument(level = "debug", skip(state))]
async fn estimate_flight(
    State(state): State<AppState>,
    request: Result<Json<FlightEstimateRequest>, JsonRejection>,
) -> ApiResult<PlanningContext> {
    let Json(request) = request?;
    let context = state
        .planner
        .flight_context(&request.origin, &request.destination)?;
    Ok(Json(context))
}

#[instrument(level = "debug", skip(state))]
async fn estimate(
    State(state): State<AppState>,
    query: Result<Json<TripQuery>, JsonRejection>,
) -> ApiResult<EstimationResult> {
    let Json(query) = query?;
    Ok(Json(state.planner.estimator().estimate(&query)?))
}

#[instrument(level = "debug", skip(state))]
async fn plan(
    State(state): State<AppState>,
    request: Result<Json<PlanRequest>, JsonRejection>,
) -> ApiResult<TripPlan> {
    let Json(request) = request?;
    Ok(Json(state.planner.plan(&request)?))
}

/// Accepts one provider place object or an array of them
#[instrument(level = "debug", skip(payload))]
async fn normalize_places(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Vec<Place>> {
    let Json(payload) = payload?;
    let places = match &payload {
        Value::Array(items) => items
            .iter()
            .map(Place::from_json)
            .collect::<crate::Result<Vec<_>>>()?,
        other => vec![Place::from_json(other)?],
    };
    Ok(Json(places))
}

async fn weather_condition(
    code: Result<Path<u8>, PathRejection>,
) -> ApiResult<WeatherConditionResponse> {
    let Path(code) = code?;
    let condition = WeatherCondition::from_code(code);
    Ok(Json(WeatherConditionResponse {
        code,
        condition,
        label: condition.label().to_string(),
        wet: condition.is_wet(),
    }))
}

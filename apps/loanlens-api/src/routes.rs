use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use time::OffsetDateTime;

use loanlens_service::{
	Error as ServiceError, LoanDataParams, LoanDataResponse, NplResponse, StatusResponse,
	SummaryParams, SummaryResponse,
};

use crate::state::AppState;

/// `/loan-data/summary` is a static segment, so it is matched before `/loan-data/{loan_type}`.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/status", get(status))
		.route("/loan-data", get(loan_data))
		.route("/loan-data/summary", get(summary))
		.route("/loan-data/{loan_type}", get(loan_data_for_type))
		.route("/npl-data", get(npl_data))
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
	status: &'static str,
	version: &'static str,
	#[serde(with = "loanlens_service::rfc3339")]
	timestamp: OffsetDateTime,
}

async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		version: loanlens_cli::VERSION,
		timestamp: OffsetDateTime::now_utc(),
	})
}

async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
	let response = state.service.status().await?;

	Ok(Json(response))
}

async fn loan_data(
	State(state): State<AppState>,
	Query(params): Query<LoanDataParams>,
) -> Result<Json<LoanDataResponse>, ApiError> {
	let response = state.service.loan_data(params).await?;

	Ok(Json(response))
}

async fn loan_data_for_type(
	State(state): State<AppState>,
	Path(loan_type): Path<String>,
	Query(params): Query<LoanDataParams>,
) -> Result<Json<LoanDataResponse>, ApiError> {
	let response = state.service.loan_data_for_type(&loan_type, params).await?;

	Ok(Json(response))
}

async fn summary(
	State(state): State<AppState>,
	Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
	let response = state.service.summary(params).await?;

	Ok(Json(response))
}

async fn npl_data(State(state): State<AppState>) -> Result<Json<NplResponse>, ApiError> {
	let response = state.service.npl_data().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { field, message } => json_error(
				StatusCode::BAD_REQUEST,
				"invalid_request",
				message,
				Some(vec![field.to_string()]),
			),
			ServiceError::Storage { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message, None),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

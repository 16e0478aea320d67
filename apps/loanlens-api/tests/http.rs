use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use loanlens_api::{routes, state::AppState};
use loanlens_config::Reporting;
use loanlens_service::{BoxFuture, Error, LoanLensService, ReportSource, Result};
use loanlens_storage::{
	models::{RawLoanRow, RawNplRow, RawStatusRow, RawSummaryRow},
	sql::Statement,
	tables::SourceTable,
};

struct FakeSource {
	failing: bool,
	calls: Arc<AtomicUsize>,
}
impl FakeSource {
	fn new(failing: bool) -> Self {
		Self { failing, calls: Arc::new(AtomicUsize::new(0)) }
	}

	fn check(&self, statement: &Statement) -> Result<()> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if self.failing {
			return Err(Error::Storage {
				message: format!("connection refused while reading {}", statement.table),
			});
		}

		Ok(())
	}
}
impl ReportSource for FakeSource {
	fn loan_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawLoanRow>>> {
		Box::pin(async move {
			self.check(statement)?;

			let telco = match statement.table {
				SourceTable::AirtelLoans => "Airtel",
				_ => "MTN",
			};

			Ok(vec![RawLoanRow {
				load_date: Some("2025-01-07".to_string()),
				telco: Some(telco.to_string()),
				loan_type: Some("Nano 7D".to_string()),
				gross_lent: Some("100".to_string()),
				sfee_lent: Some("12".to_string()),
				..Default::default()
			}])
		})
	}

	fn summary_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawSummaryRow>>> {
		Box::pin(async move {
			self.check(statement)?;

			Ok(Vec::new())
		})
	}

	fn npl_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawNplRow>>> {
		Box::pin(async move {
			self.check(statement)?;

			Ok(vec![RawNplRow {
				loan_type: Some("Grand Total".to_string()),
				report_date: Some("2025-03-02".to_string()),
				..Default::default()
			}])
		})
	}

	fn status_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawStatusRow>>> {
		Box::pin(async move {
			self.check(statement)?;

			Ok(vec![RawStatusRow {
				latest_date: Some("2025-01-07".to_string()),
				total_records: Some("12".to_string()),
			}])
		})
	}
}

fn app(failing: bool) -> (Router, Arc<AtomicUsize>) {
	let source = FakeSource::new(failing);
	let calls = source.calls.clone();
	let service = LoanLensService::with_source(Reporting::default(), Arc::new(source));

	(routes::router(AppState::from_service(service)), calls)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = serde_json::from_slice(&body).expect("Failed to parse response.");

	(status, json)
}

#[tokio::test]
async fn health_ok_without_touching_the_store() {
	let (app, calls) = app(true);
	let (status, json) = get_json(app, "/health").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "ok");
	assert!(
		json["version"]
			.as_str()
			.is_some_and(|version| version.starts_with(concat!(env!("CARGO_PKG_VERSION"), "-")))
	);
	assert!(json["timestamp"].is_string());
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn loan_data_returns_records_count_and_filters() {
	let (app, calls) = app(false);
	let (status, json) = get_json(app, "/loan-data").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["count"], 2);
	assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
	assert_eq!(json["data"][0]["date"], "2025-01-07");
	assert_eq!(json["data"][0]["principal_lent"], 88.0);
	assert_eq!(json["data"][0]["denom"], 0);
	assert_eq!(json["filters"]["telco"], "both");
	assert_eq!(json["filters"]["days"], 7);
	assert_eq!(json["filters"]["limit"], 1_000);
	assert!(json["filters"]["loan_type"].is_null());
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn loan_type_path_maps_to_product_name() {
	let (app, calls) = app(false);
	let (status, json) = get_json(app, "/loan-data/7?telco=airtel").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["filters"]["loan_type"], "Nano 7D");
	assert_eq!(json["filters"]["telco"], "airtel");
	assert_eq!(json["filters"]["limit"], 500);
	assert_eq!(json["count"], 1);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_loan_type_path_is_a_client_error() {
	let (app, calls) = app(false);
	let (status, json) = get_json(app, "/loan-data/9").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_request");
	assert_eq!(json["fields"][0], "loan_type");
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_telco_is_a_client_error() {
	let (app, calls) = app(false);
	let (status, json) = get_json(app, "/loan-data?telco=orange").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_request");
	assert!(json["message"].as_str().is_some_and(|message| message.contains("orange")));
	assert_eq!(json["fields"], serde_json::json!(["telco"]));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
	let (app, _) = app(true);
	let (status, json) = get_json(app, "/loan-data").await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "storage_error");
	assert!(json["fields"].is_null());
	assert!(json["message"].as_str().is_some_and(|message| message.contains("connection refused")));
}

#[tokio::test]
async fn summary_route_is_not_read_as_a_loan_type() {
	let (app, _) = app(false);
	let (status, json) = get_json(app, "/loan-data/summary?days=90").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["count"], 0);
	assert_eq!(json["filters"]["days"], 90);
	assert_eq!(json["filters"]["telco"], "both");
	assert!(json["summary"].is_array());
}

#[tokio::test]
async fn npl_data_includes_report_date_and_timestamp() {
	let (app, _) = app(false);
	let (status, json) = get_json(app, "/npl-data").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["count"], 1);
	assert_eq!(json["report_date"], "2025-03-02");
	assert_eq!(json["npl_data"][0]["arrears_percentage"], 0.0);
	assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn status_lists_both_operator_tables() {
	let (app, _) = app(false);
	let (status, json) = get_json(app, "/status").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["tables"][0]["table"], "airtel_loan_performance");
	assert_eq!(json["tables"][1]["table"], "mtn_loan_performance");
	assert_eq!(json["tables"][1]["total_records"], 12);
}

//! Turns loosely typed query-string values into validated statement inputs.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use loanlens_config::Reporting;
use loanlens_storage::{
	queries::{DateWindow, LoanQuery},
	tables::OperatorFilter,
};

use crate::{Error, Result, normalize};

// Keeps `CURRENT_DATE - days` inside the date range Postgres accepts.
const MAX_WINDOW_DAYS: u32 = 36_500;
const LOAN_TYPE_DAYS: [u32; 4] = [7, 14, 21, 30];

/// Query string of `/loan-data` and `/loan-data/{loan_type}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanDataParams {
	pub loan_type: Option<String>,
	pub telco: Option<String>,
	pub days: Option<String>,
	pub start_date: Option<String>,
	pub end_date: Option<String>,
	pub limit: Option<String>,
}

/// Query string of `/loan-data/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryParams {
	pub telco: Option<String>,
	pub days: Option<String>,
}

/// Maps a `/loan-data/{loan_type}` path segment such as `7` to its stored name `Nano 7D`.
pub fn loan_type_from_path(segment: &str) -> Result<String> {
	let trimmed = segment.trim();
	let days = trimmed
		.parse::<u32>()
		.ok()
		.filter(|days| LOAN_TYPE_DAYS.contains(days))
		.ok_or_else(|| Error::InvalidRequest {
			field: "loan_type",
			message: format!(
				"Unknown loan type '{trimmed}'. Expected one of 7, 14, 21, or 30."
			),
		})?;

	Ok(format!("Nano {days}D"))
}

pub(crate) fn resolve_operators(raw: Option<&str>) -> Result<OperatorFilter> {
	let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
		return Ok(OperatorFilter::Both);
	};

	OperatorFilter::parse(raw).ok_or_else(|| Error::InvalidRequest {
		field: "telco",
		message: format!("Unknown telco '{raw}'. Expected one of airtel, mtn, or both."),
	})
}

/// Non-numeric input falls back to `default`; numbers, fractional ones truncated, are clamped to
/// `1..=max`.
pub(crate) fn resolve_positive(raw: Option<&str>, default: u32, max: u32) -> u32 {
	match raw.and_then(normalize::parse_i64) {
		Some(value) => value.clamp(1, i64::from(max)) as u32,
		None => default.min(max),
	}
}

pub(crate) fn resolve_days(raw: Option<&str>, default: u32) -> u32 {
	resolve_positive(raw, default, MAX_WINDOW_DAYS)
}

pub(crate) fn resolve_window(params: &LoanDataParams, default_days: u32) -> Result<DateWindow> {
	let start = params.start_date.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
	let end = params.end_date.as_deref().map(str::trim).filter(|raw| !raw.is_empty());

	match (start, end) {
		(Some(start), Some(end)) => Ok(DateWindow::Range {
			start: parse_date("start_date", start)?,
			end: parse_date("end_date", end)?,
		}),
		_ => Ok(DateWindow::Trailing { days: resolve_days(params.days.as_deref(), default_days) }),
	}
}

/// `path_loan_type` wins over the `loan_type` query value when present.
pub(crate) fn resolve_loan_query(
	params: &LoanDataParams,
	path_loan_type: Option<String>,
	default_limit: u32,
	reporting: &Reporting,
) -> Result<LoanQuery> {
	let operators = resolve_operators(params.telco.as_deref())?;
	let window = resolve_window(params, reporting.default_window_days)?;
	let loan_type = path_loan_type.or_else(|| {
		params.loan_type.as_deref().filter(|raw| !raw.trim().is_empty()).map(str::to_string)
	});
	let limit = resolve_positive(params.limit.as_deref(), default_limit, reporting.max_limit);

	Ok(LoanQuery { operators, window, loan_type, limit })
}

fn parse_date(field: &'static str, raw: &str) -> Result<Date> {
	Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| {
		Error::InvalidRequest {
			field,
			message: format!("{field} must be a YYYY-MM-DD date, got '{raw}'."),
		}
	})
}

use serde::{Deserialize, Serialize};

use loanlens_storage::queries::{self, DateWindow, LoanQuery};

use crate::{
	LoanLensService, Result,
	normalize::{self, to_date},
	params::{self, LoanDataParams},
	records::LoanRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFilters {
	pub loan_type: Option<String>,
	pub telco: String,
	/// Set for trailing windows, `None` for an explicit date range.
	pub days: Option<u32>,
	pub start_date: Option<String>,
	pub end_date: Option<String>,
	pub limit: u32,
}
impl From<&LoanQuery> for LoanFilters {
	fn from(query: &LoanQuery) -> Self {
		let (days, start_date, end_date) = match query.window {
			DateWindow::Trailing { days } => (Some(days), None, None),
			DateWindow::Range { start, end } => (
				None,
				Some(to_date(Some(&start.to_string()))),
				Some(to_date(Some(&end.to_string()))),
			),
		};

		Self {
			loan_type: query.loan_type.clone(),
			telco: query.operators.as_str().to_string(),
			days,
			start_date,
			end_date,
			limit: query.limit,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDataResponse {
	pub data: Vec<LoanRecord>,
	pub count: usize,
	pub filters: LoanFilters,
}

impl LoanLensService {
	/// `/loan-data`: every loan type, per-table limit `reporting.default_limit`.
	pub async fn loan_data(&self, params: LoanDataParams) -> Result<LoanDataResponse> {
		let query = params::resolve_loan_query(
			&params,
			None,
			self.reporting.default_limit,
			&self.reporting,
		)
		.inspect_err(|err| tracing::warn!(error = %err, "Rejected loan data request."))?;

		self.run_loan_query(query).await
	}

	/// `/loan-data/{loan_type}`: one `Nano {N}D` product, per-table limit
	/// `reporting.loan_type_limit`.
	pub async fn loan_data_for_type(
		&self,
		segment: &str,
		params: LoanDataParams,
	) -> Result<LoanDataResponse> {
		let query = params::loan_type_from_path(segment)
			.and_then(|loan_type| {
				params::resolve_loan_query(
					&params,
					Some(loan_type),
					self.reporting.loan_type_limit,
					&self.reporting,
				)
			})
			.inspect_err(|err| tracing::warn!(error = %err, "Rejected loan type request."))?;

		self.run_loan_query(query).await
	}

	// Tables run in order and the first failure fails the request, so a response never holds
	// totals for only some operators.
	async fn run_loan_query(&self, query: LoanQuery) -> Result<LoanDataResponse> {
		let statements = queries::build_loan_query(&query);
		let mut batches = Vec::with_capacity(statements.len());

		for statement in &statements {
			let rows = self.source.loan_rows(statement).await.inspect_err(|err| {
				tracing::error!(table = %statement.table, error = %err, "Loan data query failed.");
			})?;

			batches.push(normalize::normalize_loan_rows(rows));
		}

		let data = normalize::merge_by_date_desc(batches);

		tracing::debug!(
			telco = query.operators.as_str(),
			tables = statements.len(),
			rows = data.len(),
			"Served loan data."
		);

		Ok(LoanDataResponse { count: data.len(), filters: LoanFilters::from(&query), data })
	}
}

use serde::{Deserialize, Serialize};

use loanlens_storage::queries;

use crate::{
	LoanLensService, Result, normalize,
	params::{self, SummaryParams},
	records::SummaryRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFilters {
	pub telco: String,
	pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
	pub summary: Vec<SummaryRecord>,
	pub count: usize,
	pub filters: SummaryFilters,
}

impl LoanLensService {
	pub async fn summary(&self, params: SummaryParams) -> Result<SummaryResponse> {
		let operators = params::resolve_operators(params.telco.as_deref())
			.inspect_err(|err| tracing::warn!(error = %err, "Rejected summary request."))?;
		let days = params::resolve_days(params.days.as_deref(), self.reporting.summary_window_days);
		let mut batches = Vec::new();

		for statement in queries::build_summary_query(operators, days) {
			let rows = self.source.summary_rows(&statement).await.inspect_err(|err| {
				tracing::error!(table = %statement.table, error = %err, "Summary query failed.");
			})?;

			batches.push(normalize::normalize_summary_rows(rows));
		}

		let summary = normalize::merge_summaries(batches);

		Ok(SummaryResponse {
			count: summary.len(),
			filters: SummaryFilters { telco: operators.as_str().to_string(), days },
			summary,
		})
	}
}

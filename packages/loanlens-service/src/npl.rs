use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use loanlens_storage::queries;

use crate::{LoanLensService, Result, normalize, records::NplRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NplResponse {
	pub npl_data: Vec<NplRecord>,
	pub count: usize,
	/// Latest `report_date` of the outstanding-balance table, `None` when it is empty.
	pub report_date: Option<String>,
	#[serde(with = "crate::rfc3339")]
	pub timestamp: OffsetDateTime,
}

impl LoanLensService {
	pub async fn npl_data(&self) -> Result<NplResponse> {
		let statement = queries::build_npl_query();
		let rows = self.source.npl_rows(&statement).await.inspect_err(|err| {
			tracing::error!(table = %statement.table, error = %err, "NPL query failed.");
		})?;
		let npl_data = normalize::normalize_npl_rows(rows);
		let report_date = npl_data
			.iter()
			.map(|record| record.report_date.as_str())
			.find(|date| !date.is_empty())
			.map(str::to_string);

		Ok(NplResponse {
			count: npl_data.len(),
			report_date,
			npl_data,
			timestamp: OffsetDateTime::now_utc(),
		})
	}
}

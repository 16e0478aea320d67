use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use loanlens_storage::queries;

use crate::{LoanLensService, Result, normalize, records::StatusRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
	pub tables: Vec<StatusRecord>,
	#[serde(with = "crate::rfc3339")]
	pub timestamp: OffsetDateTime,
}

impl LoanLensService {
	/// Latest `load_date` and row count of each operator table.
	pub async fn status(&self) -> Result<StatusResponse> {
		let mut tables = Vec::new();

		for (operator, statement) in queries::build_status_query() {
			let rows = self.source.status_rows(&statement).await.inspect_err(|err| {
				tracing::error!(table = %statement.table, error = %err, "Status query failed.");
			})?;

			tables.push(normalize::normalize_status_row(
				operator.id(),
				statement.table.name(),
				rows.into_iter().next(),
			));
		}

		Ok(StatusResponse { tables, timestamp: OffsetDateTime::now_utc() })
	}
}

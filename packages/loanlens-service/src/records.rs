use serde::{Deserialize, Serialize};

/// One normalized `(date, telco, country, loan_type, denom)` snapshot.
///
/// Counts are integers. Amounts and `overall_actives_wtd` are floats even where the source stores
/// integers. `principal_lent` and `gross_recovered` are always derived, never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
	/// `YYYY-MM-DD`.
	pub date: String,
	pub telco: String,
	pub country: String,
	pub loan_type: String,
	pub denom: i64,
	pub qualified_base: i64,
	pub overall_actives_daily: i64,
	pub overall_actives_wtd: f64,
	pub overall_actives_mtd: i64,
	pub overall_actives_ytd: i64,
	pub lending_txns: i64,
	pub gross_lent: f64,
	pub sfee_lent: f64,
	pub principal_lent: f64,
	pub late_fees_charged: f64,
	pub setup_fees_charged: f64,
	pub interest_fees_charged: f64,
	pub daily_fees_charged: f64,
	pub recovery_txns: i64,
	pub principal_recovered: f64,
	pub sfee_recovered: f64,
	pub gross_recovered: f64,
	pub late_fees_recovered: f64,
	pub setup_fees_recovered: f64,
	pub interest_fees_recovered: f64,
	pub daily_fees_recovered: f64,
	/// `YYYY-MM-DD HH:MM:SS`, or empty when the source has none.
	pub processed_at: String,
	pub file_source: String,
}

/// Trailing-window totals per `(loan_type, telco)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
	pub loan_type: String,
	pub telco: String,
	pub record_count: i64,
	pub total_lending_txns: i64,
	pub total_gross_lent: f64,
	pub total_sfee_lent: f64,
	pub total_principal_lent: f64,
	pub total_recovery_txns: i64,
	pub total_principal_recovered: f64,
	pub total_sfee_recovered: f64,
	pub total_gross_recovered: f64,
	pub avg_qualified_base: f64,
	pub latest_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NplRecord {
	pub loan_type: String,
	pub report_date: String,
	pub total_balance: f64,
	pub within_tenure: f64,
	pub days_1_30: f64,
	pub days_31_60: f64,
	pub days_61_90: f64,
	pub days_91_120: f64,
	pub days_121_150: f64,
	pub days_151_180: f64,
	pub days_181_plus: f64,
	/// Share of the balance past tenure, in percent. `0.0` when `total_balance` is zero.
	pub arrears_percentage: f64,
	pub net_recovered_value: f64,
	pub unrecovered_percentage_net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
	pub telco: String,
	pub table: String,
	/// `None` when the table is empty.
	pub latest_date: Option<String>,
	pub total_records: i64,
}

//! Raw rows as fetched. Every column is selected as `text` so physical column types may drift
//! without breaking decoding; typing happens in the service normalizer.

/// Columns of a per-operator loan-activity table, in projection order.
pub const LOAN_COLUMNS: [&str; 26] = [
	"load_date",
	"telco",
	"country",
	"loan_type",
	"denom",
	"qualified_base",
	"overall_actives_daily",
	"overall_actives_wtd",
	"overall_actives_mtd",
	"overall_actives_ytd",
	"lending_txns",
	"gross_lent",
	"sfee_lent",
	"late_fees_charged",
	"setup_fees_charged",
	"interest_fees_charged",
	"daily_fees_charged",
	"recovery_txns",
	"principal_recovered",
	"sfee_recovered",
	"late_fees_recovered",
	"setup_fees_recovered",
	"interest_fees_recovered",
	"daily_fees_recovered",
	"processed_at",
	"file_source",
];

/// Arrears buckets of the outstanding-balance table, youngest first.
pub const NPL_BUCKET_COLUMNS: [&str; 7] = [
	"days_1_30",
	"days_31_60",
	"days_61_90",
	"days_91_120",
	"days_121_150",
	"days_151_180",
	"days_181_plus",
];

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawLoanRow {
	pub load_date: Option<String>,
	pub telco: Option<String>,
	pub country: Option<String>,
	pub loan_type: Option<String>,
	pub denom: Option<String>,
	pub qualified_base: Option<String>,
	pub overall_actives_daily: Option<String>,
	pub overall_actives_wtd: Option<String>,
	pub overall_actives_mtd: Option<String>,
	pub overall_actives_ytd: Option<String>,
	pub lending_txns: Option<String>,
	pub gross_lent: Option<String>,
	pub sfee_lent: Option<String>,
	pub late_fees_charged: Option<String>,
	pub setup_fees_charged: Option<String>,
	pub interest_fees_charged: Option<String>,
	pub daily_fees_charged: Option<String>,
	pub recovery_txns: Option<String>,
	pub principal_recovered: Option<String>,
	pub sfee_recovered: Option<String>,
	pub late_fees_recovered: Option<String>,
	pub setup_fees_recovered: Option<String>,
	pub interest_fees_recovered: Option<String>,
	pub daily_fees_recovered: Option<String>,
	pub processed_at: Option<String>,
	pub file_source: Option<String>,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawSummaryRow {
	pub loan_type: Option<String>,
	pub telco: Option<String>,
	pub record_count: Option<String>,
	pub total_lending_txns: Option<String>,
	pub total_gross_lent: Option<String>,
	pub total_sfee_lent: Option<String>,
	pub total_recovery_txns: Option<String>,
	pub total_principal_recovered: Option<String>,
	pub total_sfee_recovered: Option<String>,
	pub total_late_fees_recovered: Option<String>,
	pub total_setup_fees_recovered: Option<String>,
	pub total_interest_fees_recovered: Option<String>,
	pub total_daily_fees_recovered: Option<String>,
	pub avg_qualified_base: Option<String>,
	pub latest_date: Option<String>,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawNplRow {
	pub loan_type: Option<String>,
	pub report_date: Option<String>,
	pub total_balance: Option<String>,
	pub within_tenure: Option<String>,
	pub days_1_30: Option<String>,
	pub days_31_60: Option<String>,
	pub days_61_90: Option<String>,
	pub days_91_120: Option<String>,
	pub days_121_150: Option<String>,
	pub days_151_180: Option<String>,
	pub days_181_plus: Option<String>,
	pub net_recovered_value: Option<String>,
	pub unrecovered_percentage_net: Option<String>,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawStatusRow {
	pub latest_date: Option<String>,
	pub total_records: Option<String>,
}

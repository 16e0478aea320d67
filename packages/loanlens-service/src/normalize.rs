//! Pure conversion of raw text rows into typed output records.
//!
//! Nothing here fails: unparsable or missing numbers become zero and missing strings become
//! empty, so one bad cell never costs the caller a whole response.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use time::{
	Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use loanlens_storage::models::{RawLoanRow, RawNplRow, RawStatusRow, RawSummaryRow};

use crate::records::{LoanRecord, NplRecord, StatusRecord, SummaryRecord};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn normalize_loan_rows(rows: Vec<RawLoanRow>) -> Vec<LoanRecord> {
	rows.into_iter().map(normalize_loan_row).collect()
}

pub fn normalize_loan_row(row: RawLoanRow) -> LoanRecord {
	let principal_lent = difference(row.gross_lent.as_deref(), row.sfee_lent.as_deref());
	let gross_recovered = sum(&[
		row.principal_recovered.as_deref(),
		row.sfee_recovered.as_deref(),
		row.late_fees_recovered.as_deref(),
		row.setup_fees_recovered.as_deref(),
		row.interest_fees_recovered.as_deref(),
		row.daily_fees_recovered.as_deref(),
	]);

	LoanRecord {
		date: to_date(row.load_date.as_deref()),
		telco: row.telco.unwrap_or_default(),
		country: row.country.unwrap_or_default(),
		loan_type: row.loan_type.unwrap_or_default(),
		denom: to_i64(row.denom.as_deref()),
		qualified_base: to_i64(row.qualified_base.as_deref()),
		overall_actives_daily: to_i64(row.overall_actives_daily.as_deref()),
		overall_actives_wtd: to_f64(row.overall_actives_wtd.as_deref()),
		overall_actives_mtd: to_i64(row.overall_actives_mtd.as_deref()),
		overall_actives_ytd: to_i64(row.overall_actives_ytd.as_deref()),
		lending_txns: to_i64(row.lending_txns.as_deref()),
		gross_lent: to_f64(row.gross_lent.as_deref()),
		sfee_lent: to_f64(row.sfee_lent.as_deref()),
		principal_lent,
		late_fees_charged: to_f64(row.late_fees_charged.as_deref()),
		setup_fees_charged: to_f64(row.setup_fees_charged.as_deref()),
		interest_fees_charged: to_f64(row.interest_fees_charged.as_deref()),
		daily_fees_charged: to_f64(row.daily_fees_charged.as_deref()),
		recovery_txns: to_i64(row.recovery_txns.as_deref()),
		principal_recovered: to_f64(row.principal_recovered.as_deref()),
		sfee_recovered: to_f64(row.sfee_recovered.as_deref()),
		gross_recovered,
		late_fees_recovered: to_f64(row.late_fees_recovered.as_deref()),
		setup_fees_recovered: to_f64(row.setup_fees_recovered.as_deref()),
		interest_fees_recovered: to_f64(row.interest_fees_recovered.as_deref()),
		daily_fees_recovered: to_f64(row.daily_fees_recovered.as_deref()),
		processed_at: to_timestamp(row.processed_at.as_deref()),
		file_source: row.file_source.unwrap_or_default(),
	}
}

/// Concatenates per-table batches and orders the result by `date` descending.
///
/// Equal dates keep batch order, then per-table order.
pub fn merge_by_date_desc(batches: Vec<Vec<LoanRecord>>) -> Vec<LoanRecord> {
	let mut merged = batches.into_iter().flatten().collect::<Vec<_>>();

	merged.sort_by(|a, b| b.date.cmp(&a.date));

	merged
}

pub fn normalize_summary_rows(rows: Vec<RawSummaryRow>) -> Vec<SummaryRecord> {
	rows.into_iter()
		.map(|row| SummaryRecord {
			total_gross_lent: to_f64(row.total_gross_lent.as_deref()),
			total_sfee_lent: to_f64(row.total_sfee_lent.as_deref()),
			total_principal_lent: difference(
				row.total_gross_lent.as_deref(),
				row.total_sfee_lent.as_deref(),
			),
			total_recovery_txns: to_i64(row.total_recovery_txns.as_deref()),
			total_principal_recovered: to_f64(row.total_principal_recovered.as_deref()),
			total_sfee_recovered: to_f64(row.total_sfee_recovered.as_deref()),
			total_gross_recovered: sum(&[
				row.total_principal_recovered.as_deref(),
				row.total_sfee_recovered.as_deref(),
				row.total_late_fees_recovered.as_deref(),
				row.total_setup_fees_recovered.as_deref(),
				row.total_interest_fees_recovered.as_deref(),
				row.total_daily_fees_recovered.as_deref(),
			]),
			avg_qualified_base: to_f64(row.avg_qualified_base.as_deref()),
			latest_date: to_date(row.latest_date.as_deref()),
			record_count: to_i64(row.record_count.as_deref()),
			total_lending_txns: to_i64(row.total_lending_txns.as_deref()),
			loan_type: row.loan_type.unwrap_or_default(),
			telco: row.telco.unwrap_or_default(),
		})
		.collect()
}

/// Orders merged summaries by `(loan_type, telco)`.
pub fn merge_summaries(batches: Vec<Vec<SummaryRecord>>) -> Vec<SummaryRecord> {
	let mut merged = batches.into_iter().flatten().collect::<Vec<_>>();

	merged.sort_by(|a, b| a.loan_type.cmp(&b.loan_type).then_with(|| a.telco.cmp(&b.telco)));

	merged
}

/// Normalizes NPL rows and puts them in reporting order.
pub fn normalize_npl_rows(rows: Vec<RawNplRow>) -> Vec<NplRecord> {
	let mut records = rows.into_iter().map(normalize_npl_row).collect::<Vec<_>>();

	records.sort_by(|a, b| {
		npl_category_rank(&a.loan_type)
			.cmp(&npl_category_rank(&b.loan_type))
			.then_with(|| a.loan_type.cmp(&b.loan_type))
	});

	records
}

pub fn normalize_npl_row(row: RawNplRow) -> NplRecord {
	let total_balance = to_f64(row.total_balance.as_deref());
	let within_tenure = to_f64(row.within_tenure.as_deref());
	let net_recovered_value = to_f64(row.net_recovered_value.as_deref());
	let arrears = total_balance - within_tenure;
	let unrecovered_percentage_net = row
		.unrecovered_percentage_net
		.as_deref()
		.and_then(parse_f64)
		.unwrap_or_else(|| round2(percentage(arrears - net_recovered_value, arrears)));

	NplRecord {
		loan_type: row.loan_type.unwrap_or_default(),
		report_date: to_date(row.report_date.as_deref()),
		total_balance,
		within_tenure,
		days_1_30: to_f64(row.days_1_30.as_deref()),
		days_31_60: to_f64(row.days_31_60.as_deref()),
		days_61_90: to_f64(row.days_61_90.as_deref()),
		days_91_120: to_f64(row.days_91_120.as_deref()),
		days_121_150: to_f64(row.days_121_150.as_deref()),
		days_151_180: to_f64(row.days_151_180.as_deref()),
		days_181_plus: to_f64(row.days_181_plus.as_deref()),
		arrears_percentage: round2(percentage(arrears, total_balance)),
		net_recovered_value,
		unrecovered_percentage_net,
	}
}

/// Canonical reporting position: 7, 14, 21 and 30 day products, the grand total, then the rest.
pub fn npl_category_rank(loan_type: &str) -> u8 {
	let lowered = loan_type.trim().to_ascii_lowercase();

	if lowered.contains("grand total") {
		return 5;
	}

	match first_number(&lowered) {
		Some(7) => 1,
		Some(14) => 2,
		Some(21) => 3,
		Some(30) => 4,
		_ => 6,
	}
}

pub fn normalize_status_row(telco: &str, table: &str, row: Option<RawStatusRow>) -> StatusRecord {
	let row = row.unwrap_or_default();
	let latest_date = row.latest_date.as_deref().map(|raw| to_date(Some(raw)));

	StatusRecord {
		telco: telco.to_string(),
		table: table.to_string(),
		latest_date,
		total_records: to_i64(row.total_records.as_deref()),
	}
}

/// Lenient integer: accepts `"12"` and `"12.0"`; anything else is `0`.
pub fn to_i64(raw: Option<&str>) -> i64 {
	raw.and_then(parse_i64).unwrap_or(0)
}

/// Lenient float: `NaN`, infinities and unparsable text are `0.0`.
pub fn to_f64(raw: Option<&str>) -> f64 {
	raw.and_then(parse_f64).unwrap_or(0.0)
}

/// Integer text, or decimal text truncated toward zero.
pub fn parse_i64(raw: &str) -> Option<i64> {
	let raw = raw.trim();

	raw.parse::<i64>().ok().or_else(|| parse_f64(raw).map(|value| value.trunc() as i64))
}

/// Finite float text; `None` for blanks, garbage, `NaN` and infinities.
pub fn parse_f64(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `YYYY-MM-DD`, or `""` when absent. Text that is not a date passes through trimmed.
pub fn to_date(raw: Option<&str>) -> String {
	let Some(raw) = raw.map(str::trim) else {
		return String::new();
	};

	raw.get(..10)
		.and_then(|head| Date::parse(head, DATE_FORMAT).ok())
		.and_then(|date| date.format(DATE_FORMAT).ok())
		.unwrap_or_else(|| raw.to_string())
}

/// `YYYY-MM-DD HH:MM:SS`, or `""` when absent. Fractional seconds and offsets are dropped.
pub fn to_timestamp(raw: Option<&str>) -> String {
	let Some(raw) = raw.map(str::trim) else {
		return String::new();
	};

	if let Some(head) = raw.get(..19) {
		let head = head.replacen('T', " ", 1);

		if let Some(formatted) = PrimitiveDateTime::parse(&head, TIMESTAMP_FORMAT)
			.ok()
			.and_then(|value| value.format(TIMESTAMP_FORMAT).ok())
		{
			return formatted;
		}
	}
	if raw.len() == 10
		&& let Ok(date) = Date::parse(raw, DATE_FORMAT)
		&& let Ok(formatted) = date.midnight().format(TIMESTAMP_FORMAT)
	{
		return formatted;
	}

	raw.to_string()
}

/// `numerator / denominator * 100`, defined as `0.0` for a zero or non-finite result.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
	if denominator == 0.0 {
		return 0.0;
	}

	let value = numerator / denominator * 100.0;

	if value.is_finite() { value } else { 0.0 }
}

pub fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}

// Derived money is computed on the stored decimal text so `288920.22 - 47019.22` is exactly
// `241901`, then converted once.
fn to_decimal(raw: Option<&str>) -> Decimal {
	let Some(raw) = raw.map(str::trim) else {
		return Decimal::ZERO;
	};

	raw.parse::<Decimal>()
		.ok()
		.or_else(|| parse_f64(raw).and_then(Decimal::from_f64_retain))
		.unwrap_or(Decimal::ZERO)
}

fn decimal_to_f64(value: Option<Decimal>) -> f64 {
	value.and_then(|value| value.to_f64()).filter(|value| value.is_finite()).unwrap_or(0.0)
}

fn difference(minuend: Option<&str>, subtrahend: Option<&str>) -> f64 {
	decimal_to_f64(to_decimal(minuend).checked_sub(to_decimal(subtrahend)))
}

fn sum(parts: &[Option<&str>]) -> f64 {
	decimal_to_f64(
		parts.iter().try_fold(Decimal::ZERO, |total, part| total.checked_add(to_decimal(*part))),
	)
}

fn first_number(text: &str) -> Option<u32> {
	let start = text.find(|ch: char| ch.is_ascii_digit())?;
	let digits = text[start..].chars().take_while(char::is_ascii_digit).collect::<String>();

	digits.parse().ok()
}

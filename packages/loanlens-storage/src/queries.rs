//! Statement construction for the reporting endpoints.
//!
//! Loan statements are built once per physical operator table. Each one is restricted to the
//! latest `processed_at` per `(load_date, loan_type, denom)` within that same table, ordered by
//! `load_date DESC, loan_type ASC`, and limited independently of the other tables.

use time::Date;

use crate::{
	models::{LOAN_COLUMNS, NPL_BUCKET_COLUMNS},
	sql::{Param, SqlBuilder, Statement},
	tables::{Operator, OperatorFilter, SourceTable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
	/// `load_date >= CURRENT_DATE - days`, evaluated on the store's clock.
	Trailing { days: u32 },
	/// `load_date BETWEEN start AND end`, both inclusive.
	Range { start: Date, end: Date },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanQuery {
	pub operators: OperatorFilter,
	pub window: DateWindow,
	/// Case-sensitive substring of the stored `loan_type`.
	pub loan_type: Option<String>,
	/// Row cap applied per table.
	pub limit: u32,
}

pub fn build_loan_query(query: &LoanQuery) -> Vec<Statement> {
	query
		.operators
		.operators()
		.into_iter()
		.map(|operator| build_loan_statement(operator, query))
		.collect()
}

pub fn build_summary_query(operators: OperatorFilter, days: u32) -> Vec<Statement> {
	operators
		.operators()
		.into_iter()
		.map(|operator| build_summary_statement(operator, operators.single(), days))
		.collect()
}

pub fn build_npl_query() -> Statement {
	let outstanding = SourceTable::NplOutstanding.name();
	let recovered = SourceTable::NplRecovered.name();
	let unrecovered = SourceTable::NplUnrecovered.name();
	let buckets = NPL_BUCKET_COLUMNS
		.iter()
		.map(|column| format!("\n\to.{column}::text AS {column},"))
		.collect::<String>();
	let sql = format!(
		"\
SELECT
	o.loan_type::text AS loan_type,
	o.report_date::text AS report_date,
	o.total_balance::text AS total_balance,
	o.within_tenure::text AS within_tenure,{buckets}
	r.net_recovered_value::text AS net_recovered_value,
	p.unrecovered_percentage_net::text AS unrecovered_percentage_net
FROM {outstanding} AS o
LEFT JOIN {recovered} AS r
	ON r.loan_type = o.loan_type
	AND r.report_date = o.report_date
LEFT JOIN {unrecovered} AS p
	ON p.loan_type = o.loan_type
	AND p.report_date = (
		SELECT MAX(p2.report_date)
		FROM {unrecovered} AS p2
		WHERE p2.loan_type = o.loan_type
	)
WHERE o.report_date = (SELECT MAX(report_date) FROM {outstanding})
ORDER BY o.loan_type"
	);

	SqlBuilder::new(SourceTable::NplOutstanding, sql).build()
}

/// One `(latest_date, total_records)` statement per operator table.
pub fn build_status_query() -> Vec<(Operator, Statement)> {
	Operator::ALL
		.into_iter()
		.map(|operator| {
			let table = operator.table();
			let sql = format!(
				"\
SELECT
	MAX(load_date)::text AS latest_date,
	COUNT(*)::text AS total_records
FROM {table}"
			);

			(operator, SqlBuilder::new(table, sql).build())
		})
		.collect()
}

/// Escapes `LIKE` metacharacters so `value` matches as a literal substring.
pub fn like_substring(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);

	out.push('%');

	for ch in value.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}

fn build_loan_statement(operator: Operator, query: &LoanQuery) -> Statement {
	let table = operator.table();
	let projection = LOAN_COLUMNS
		.iter()
		.map(|column| format!("\t{}", text_column(column)))
		.collect::<Vec<_>>()
		.join(",\n");
	let mut builder = SqlBuilder::new(table, format!("SELECT\n{projection}\nFROM "));

	push_latest_rows(
		&mut builder,
		table,
		query.window,
		query.loan_type.as_deref(),
		query.operators.single(),
	);

	builder.push("\nORDER BY latest.load_date DESC, latest.loan_type ASC\nLIMIT ");
	builder.push_bind(Param::BigInt(i64::from(query.limit)));

	builder.build()
}

fn build_summary_statement(operator: Operator, pinned: Option<Operator>, days: u32) -> Statement {
	let table = operator.table();
	let mut builder = SqlBuilder::new(
		table,
		"\
SELECT
	latest.loan_type::text AS loan_type,
	latest.telco::text AS telco,
	COUNT(*)::text AS record_count,
	SUM(latest.lending_txns)::text AS total_lending_txns,
	SUM(latest.gross_lent)::text AS total_gross_lent,
	SUM(latest.sfee_lent)::text AS total_sfee_lent,
	SUM(latest.recovery_txns)::text AS total_recovery_txns,
	SUM(latest.principal_recovered)::text AS total_principal_recovered,
	SUM(latest.sfee_recovered)::text AS total_sfee_recovered,
	SUM(latest.late_fees_recovered)::text AS total_late_fees_recovered,
	SUM(latest.setup_fees_recovered)::text AS total_setup_fees_recovered,
	SUM(latest.interest_fees_recovered)::text AS total_interest_fees_recovered,
	SUM(latest.daily_fees_recovered)::text AS total_daily_fees_recovered,
	AVG(latest.qualified_base)::text AS avg_qualified_base,
	MAX(latest.load_date)::text AS latest_date
FROM ",
	);

	push_latest_rows(&mut builder, table, DateWindow::Trailing { days }, None, pinned);

	builder.push(
		"\nGROUP BY latest.loan_type, latest.telco\nORDER BY latest.loan_type ASC, latest.telco ASC",
	);

	builder.build()
}

fn text_column(column: &str) -> String {
	format!("latest.{column}::text AS {column}")
}

// Last write wins per `(load_date, loan_type, denom)` within one table. The correlated `MAX`
// keeps the latest processing run; `DISTINCT ON` then keeps one row per key when several share
// that timestamp, with no guarantee about which.
fn push_latest_rows(
	builder: &mut SqlBuilder,
	table: SourceTable,
	window: DateWindow,
	loan_type: Option<&str>,
	pinned: Option<Operator>,
) {
	builder.push(format!(
		"(\n\tSELECT DISTINCT ON (t.load_date, t.loan_type, t.denom) t.*\n\tFROM {table} AS t\n\tWHERE "
	));

	push_window(builder, window);

	if let Some(loan_type) = loan_type {
		builder.push("\n\t\tAND t.loan_type LIKE ");
		builder.push_bind(Param::Text(like_substring(loan_type)));
	}

	push_operator(builder, pinned);

	builder.push(format!(
		"
		AND t.processed_at = (
			SELECT MAX(s.processed_at)
			FROM {table} AS s
			WHERE s.load_date = t.load_date
				AND s.loan_type IS NOT DISTINCT FROM t.loan_type
				AND s.denom IS NOT DISTINCT FROM t.denom
		)
	ORDER BY t.load_date, t.loan_type, t.denom
) AS latest"
	));
}

fn push_window(builder: &mut SqlBuilder, window: DateWindow) {
	match window {
		DateWindow::Trailing { days } => {
			builder.push("t.load_date >= CURRENT_DATE - ");
			builder.push_bind(Param::Int(i32::try_from(days).unwrap_or(i32::MAX)));
			builder.push("::integer");
		},
		DateWindow::Range { start, end } => {
			builder.push("t.load_date BETWEEN ");
			builder.push_bind(Param::Date(start));
			builder.push(" AND ");
			builder.push_bind(Param::Date(end));
		},
	}
}

// Tables are already operator-specific; this guards against rows the ETL filed in the wrong one.
fn push_operator(builder: &mut SqlBuilder, pinned: Option<Operator>) {
	let Some(operator) = pinned else {
		return;
	};

	builder.push("\n\t\tAND (t.telco = ");
	builder.push_bind(Param::Text(operator.display_name().to_string()));
	builder.push(" OR LOWER(t.telco) = ");
	builder.push_bind(Param::Text(operator.id().to_string()));
	builder.push(")");
}

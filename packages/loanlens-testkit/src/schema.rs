/// Renders the ETL-owned source tables as one script, resolving `\ir` includes.
pub fn render_source_schema() -> String {
	let init = include_str!("../../../sql/init.sql");
	let mut out = String::new();

	for line in init.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_airtel_loan_performance.sql" => out
					.push_str(include_str!("../../../sql/tables/001_airtel_loan_performance.sql")),
				"tables/002_mtn_loan_performance.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_mtn_loan_performance.sql")),
				"tables/003_npl_outstanding_balance.sql" => out
					.push_str(include_str!("../../../sql/tables/003_npl_outstanding_balance.sql")),
				"tables/004_npl_recovered_value.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_npl_recovered_value.sql")),
				"tables/005_npl_unrecovered_percentage.sql" => out.push_str(include_str!(
					"../../../sql/tables/005_npl_unrecovered_percentage.sql"
				)),
				_ => out.push_str(line),
			}

			out.push('\n');

			continue;
		}
		if trimmed.starts_with("--") {
			continue;
		}

		out.push_str(line);
		out.push('\n');
	}

	out
}

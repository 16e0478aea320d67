//! Closed set of physical tables the reporting layer reads from.
//!
//! Table names reach SQL text only through [`SourceTable::name`], never from request input.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
	AirtelLoans,
	MtnLoans,
	NplOutstanding,
	NplRecovered,
	NplUnrecovered,
}
impl SourceTable {
	pub const fn name(self) -> &'static str {
		match self {
			Self::AirtelLoans => "airtel_loan_performance",
			Self::MtnLoans => "mtn_loan_performance",
			Self::NplOutstanding => "npl_outstanding_balance",
			Self::NplRecovered => "npl_recovered_value",
			Self::NplUnrecovered => "npl_unrecovered_percentage",
		}
	}
}
impl Display for SourceTable {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Mobile network operator owning one loan-activity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Airtel,
	Mtn,
}
impl Operator {
	pub const ALL: [Self; 2] = [Self::Airtel, Self::Mtn];

	pub const fn table(self) -> SourceTable {
		match self {
			Self::Airtel => SourceTable::AirtelLoans,
			Self::Mtn => SourceTable::MtnLoans,
		}
	}

	/// Lowercase identifier used in query strings and responses.
	pub const fn id(self) -> &'static str {
		match self {
			Self::Airtel => "airtel",
			Self::Mtn => "mtn",
		}
	}

	/// Spelling the ETL writes into the `telco` column.
	pub const fn display_name(self) -> &'static str {
		match self {
			Self::Airtel => "Airtel",
			Self::Mtn => "MTN",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFilter {
	Airtel,
	Mtn,
	Both,
}
impl OperatorFilter {
	/// Case-insensitive. Returns `None` for anything outside `airtel`, `mtn`, `both`.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"airtel" => Some(Self::Airtel),
			"mtn" => Some(Self::Mtn),
			"both" => Some(Self::Both),
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Airtel => "airtel",
			Self::Mtn => "mtn",
			Self::Both => "both",
		}
	}

	pub fn operators(self) -> Vec<Operator> {
		match self {
			Self::Airtel => vec![Operator::Airtel],
			Self::Mtn => vec![Operator::Mtn],
			Self::Both => Operator::ALL.to_vec(),
		}
	}

	/// The operator to pin the `telco` column to, if the filter names exactly one.
	pub const fn single(self) -> Option<Operator> {
		match self {
			Self::Airtel => Some(Operator::Airtel),
			Self::Mtn => Some(Operator::Mtn),
			Self::Both => None,
		}
	}
}

use time::Date;

use crate::tables::SourceTable;

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
	Int(i32),
	BigInt(i64),
	Date(Date),
	Text(String),
}

/// One parameterized statement against a single source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
	pub table: SourceTable,
	pub sql: String,
	pub params: Vec<Param>,
}

/// Appends SQL text and numbers `$n` placeholders in bind order.
#[derive(Debug)]
pub struct SqlBuilder {
	table: SourceTable,
	sql: String,
	params: Vec<Param>,
}
impl SqlBuilder {
	pub fn new(table: SourceTable, init: impl Into<String>) -> Self {
		Self { table, sql: init.into(), params: Vec::new() }
	}

	pub fn push(&mut self, sql: impl AsRef<str>) -> &mut Self {
		self.sql.push_str(sql.as_ref());

		self
	}

	pub fn push_bind(&mut self, param: Param) -> &mut Self {
		self.params.push(param);

		let placeholder = format!("${}", self.params.len());

		self.sql.push_str(&placeholder);

		self
	}

	pub fn build(self) -> Statement {
		Statement { table: self.table, sql: self.sql, params: self.params }
	}
}

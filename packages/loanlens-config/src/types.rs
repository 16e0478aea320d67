use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub reporting: Reporting,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// How long a request waits for a free pooled connection before failing.
	#[serde(default = "default_acquire_timeout_ms")]
	pub acquire_timeout_ms: u64,
}

/// Defaults applied when a request omits or garbles its window and limit parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Reporting {
	pub default_window_days: u32,
	pub summary_window_days: u32,
	/// Per-table row cap for `/loan-data`.
	pub default_limit: u32,
	/// Per-table row cap for `/loan-data/{loan_type}`.
	pub loan_type_limit: u32,
	pub max_limit: u32,
}
impl Default for Reporting {
	fn default() -> Self {
		Self {
			default_window_days: 7,
			summary_window_days: 30,
			default_limit: 1_000,
			loan_type_limit: 500,
			max_limit: 10_000,
		}
	}
}

fn default_acquire_timeout_ms() -> u64 {
	30_000
}

use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use loanlens_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{section}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("loanlens_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> loanlens_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = loanlens_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Expected sample config to load.");

	assert_eq!(cfg.service.http_bind, "127.0.0.1:8080");
	assert_eq!(cfg.storage.postgres.pool_max_conns, 10);
	assert_eq!(cfg.storage.postgres.acquire_timeout_ms, 5_000);
	assert_eq!(cfg.reporting.default_limit, 1_000);
	assert_eq!(cfg.reporting.loan_type_limit, 500);
}

#[test]
fn reporting_section_is_optional() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove("reporting");

	let payload = toml::to_string(&root).expect("Failed to render template config.");
	let cfg = load_payload(payload).expect("Expected config without [reporting] to load.");

	assert_eq!(cfg.reporting.default_window_days, 7);
	assert_eq!(cfg.reporting.summary_window_days, 30);
	assert_eq!(cfg.reporting.default_limit, 1_000);
	assert_eq!(cfg.reporting.loan_type_limit, 500);
	assert_eq!(cfg.reporting.max_limit, 10_000);
}

#[test]
fn acquire_timeout_defaults_when_omitted() {
	let payload = SAMPLE_CONFIG_TEMPLATE_TOML.replace("acquire_timeout_ms = 5000\n", "");
	let cfg: Config = toml::from_str(&payload).expect("Failed to parse test config.");

	assert_eq!(cfg.storage.postgres.acquire_timeout_ms, 30_000);
}

#[test]
fn pool_max_conns_must_be_positive() {
	let payload = sample_toml_with("storage.postgres", "pool_max_conns", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected pool_max_conns validation error.");
	let message = err.to_string();

	assert!(
		message.contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn dsn_must_be_non_empty() {
	let payload = sample_toml_with("storage.postgres", "dsn", Value::String("  ".to_string()));
	let err = load_payload(payload).expect_err("Expected dsn validation error.");

	assert!(matches!(err, Error::Validation { .. }));
	assert!(err.to_string().contains("storage.postgres.dsn must be non-empty."));
}

#[test]
fn zero_window_is_rejected() {
	let payload = sample_toml_with("reporting", "summary_window_days", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected window validation error.");

	assert!(err.to_string().contains("reporting.summary_window_days must be greater than zero."));
}

#[test]
fn default_limit_cannot_exceed_max_limit() {
	let payload = sample_toml_with("reporting", "default_limit", Value::Integer(20_000));
	let err = load_payload(payload).expect_err("Expected limit validation error.");

	assert!(err.to_string().contains("reporting.default_limit must not exceed reporting.max_limit."));
}

#[test]
fn blank_log_level_falls_back_to_info() {
	let payload = sample_toml_with("service", "log_level", Value::String(" ".to_string()));
	let cfg = load_payload(payload).expect("Expected config to load.");

	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("loanlens_config_missing_file.toml");
	let err = loanlens_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
	assert!(err.to_string().contains("loanlens_config_missing_file.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
	let err = load_payload("[service\nhttp_bind = 1".to_string())
		.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}

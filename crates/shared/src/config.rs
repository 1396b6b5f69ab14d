//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Payroll calculation configuration.
    pub payroll: PayrollConfig,
}

/// Payroll rate configuration.
///
/// These rates are deployment-level settings, never computed by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Amount credited per overtime hour.
    #[serde(default = "default_overtime_hourly_rate")]
    pub overtime_hourly_rate: Decimal,
    /// Amount deducted per absence day (and restored per credited day).
    #[serde(default = "default_absence_daily_rate")]
    pub absence_daily_rate: Decimal,
    /// Amount deducted per tardiness hour.
    #[serde(default = "default_tardiness_hourly_rate")]
    pub tardiness_hourly_rate: Decimal,
    /// Employer burden applied to gross as a fraction (0.20 = 20%).
    #[serde(default = "default_employer_burden_rate")]
    pub employer_burden_rate: Decimal,
}

fn default_overtime_hourly_rate() -> Decimal {
    Decimal::new(50, 0)
}

fn default_absence_daily_rate() -> Decimal {
    // 93.33
    Decimal::new(9333, 2)
}

fn default_tardiness_hourly_rate() -> Decimal {
    Decimal::new(25, 0)
}

fn default_employer_burden_rate() -> Decimal {
    // 0.20
    Decimal::new(20, 2)
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_hourly_rate: default_overtime_hourly_rate(),
            absence_daily_rate: default_absence_daily_rate(),
            tardiness_hourly_rate: default_tardiness_hourly_rate(),
            employer_burden_rate: default_employer_burden_rate(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later entries overriding earlier ones:
    /// 1. `config/default.toml` (optional)
    /// 2. `config/{RUN_MODE}.toml` (optional)
    /// 3. `PAYCYCLE__`-prefixed environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYCYCLE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_financas_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerSection,
    pub statement: StatementSection,
    pub report: ReportSection,
    pub locale: LocaleSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSection {
    /// Relative paths are resolved against the financas home directory
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatementSection {
    /// Card closing day used when `add` gets neither --closing-date nor --closing-day
    pub closing_day: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSection {
    pub monthly_income: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleSection {
    /// IANA name, e.g. "America/Sao_Paulo"
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSection {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            path: "financas_pessoais.csv".to_string(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            monthly_income: Decimal::from(3000),
        }
    }
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            timezone: "America/Sao_Paulo".to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn ledger_path(&self, home: &Path) -> PathBuf {
        resolve_path(&self.ledger.path, home)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.locale
            .timezone
            .parse()
            .map_err(|_| anyhow!("invalid timezone: {}", self.locale.timezone))
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }
}

/// Expand a leading `~/` and anchor relative paths at `home`.
fn resolve_path(raw: &str, home: &Path) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Ok(user_home) = std::env::var("HOME") {
            return PathBuf::from(user_home).join(rest);
        }
    }
    let p = PathBuf::from(raw);
    if p.is_absolute() { p } else { home.join(p) }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_financas_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    if let Some(day) = cfg.statement.closing_day {
        if !(1..=31).contains(&day) {
            return Err(anyhow!("statement.closing_day must be between 1 and 31, got {day}"));
        }
    }
    cfg.timezone()?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg = parse_config(
            r#"
[statement]
closing_day = 20

[report]
monthly_income = 4500
"#,
        )
        .unwrap();
        assert_eq!(cfg.statement.closing_day, Some(20));
        assert_eq!(cfg.report.monthly_income, Decimal::from(4500));
        assert_eq!(cfg.ledger.path, "financas_pessoais.csv");
        assert_eq!(cfg.locale.timezone, "America/Sao_Paulo");
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn test_default_config_survives_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_config("[statement]\nclosing_day = 40\n").is_err());
        assert!(parse_config("[locale]\ntimezone = \"Mars/Olympus\"\n").is_err());
    }

    #[test]
    fn test_ledger_path_resolution() {
        let home = Path::new("/data/financas");
        let mut cfg = Config::default();
        assert_eq!(cfg.ledger_path(home), PathBuf::from("/data/financas/financas_pessoais.csv"));

        cfg.ledger.path = "/srv/ledger.csv".to_string();
        assert_eq!(cfg.ledger_path(home), PathBuf::from("/srv/ledger.csv"));
    }
}

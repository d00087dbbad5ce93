//! Nested records: prefixed flags, flattened short options and a custom
//! `--help` description.
//!
//! ```text
//! cargo run --example nested -- --name api --db-host db.internal -u alice -l debug
//! cargo run --example nested -- --help
//! ```

use std::io::{self, Write};

use anyhow::Result;
use schema_args::{Builder, CliSchema};
use serde::Deserialize;

/// Database connection settings.
#[derive(Debug, Deserialize, CliSchema)]
struct Database {
    /// Database host.
    #[schema_args(short = 'H', default = String::from("localhost"))]
    host: String,
    #[schema_args(default = 5432)]
    port: u16,
}

/// Credentials.
#[derive(Debug, Deserialize, CliSchema)]
struct Credentials {
    /// User name.
    #[schema_args(short = 'u')]
    user: String,
    #[serde(default)]
    #[schema_args(file_loadable)]
    password: Option<String>,
}

/// Logging options.
#[derive(Debug, Deserialize, CliSchema)]
struct Logging {
    #[schema_args(short = 'l', choices("error", "warn", "info", "debug"))]
    #[schema_args(default = String::from("info"))]
    level: String,
    #[serde(default)]
    json: bool,
}

#[derive(Debug, Deserialize, CliSchema)]
struct ServiceConfig {
    #[schema_args(short = 'n')]
    name: String,
    /// Prefixed with `db-`; leaf short options are suppressed.
    #[schema_args(nested(prefix = "db"))]
    database: Database,
    /// Flattened; leaf short options survive.
    #[schema_args(nested(prefix = ""))]
    credentials: Credentials,
    /// Prefixed with the field name.
    #[schema_args(nested)]
    logging: Logging,
}

fn builder() -> Result<Builder<ServiceConfig>> {
    Ok(Builder::<ServiceConfig>::new()?
        .description("Service with nested database, credential and logging settings"))
}

fn report(out: &mut dyn Write, config: &ServiceConfig) -> io::Result<()> {
    writeln!(out, "service:  {}", config.name)?;
    writeln!(out, "database: {}:{}", config.database.host, config.database.port)?;
    writeln!(
        out,
        "user:     {} (password {})",
        config.credentials.user,
        if config.credentials.password.is_some() { "set" } else { "unset" }
    )?;
    writeln!(out, "logging:  {} json={}", config.logging.level, config.logging.json)
}

fn main() -> Result<()> {
    let builder = builder()?;
    let matches = builder.command().get_matches();
    let config = builder.build_config(&matches, ())?;
    let mut stdout = io::stdout().lock();
    report(&mut stdout, &config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, ensure};
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<ServiceConfig> {
        builder()?
            .build_config_from(std::iter::once("service").chain(args.iter().copied()), ())
            .map_err(|e| anyhow!(e))
    }

    #[test]
    fn composes_prefixed_and_flattened_flags() -> Result<()> {
        let config = parse(&[
            "-n",
            "api",
            "--db-host",
            "db.internal",
            "--db-port",
            "6432",
            "-u",
            "alice",
            "--logging-level",
            "debug",
            "--logging-json",
        ])?;
        ensure!(config.database.host == "db.internal");
        ensure!(config.database.port == 6432);
        ensure!(config.credentials.user == "alice");
        ensure!(config.logging.level == "debug");
        ensure!(config.logging.json);
        Ok(())
    }

    #[rstest]
    #[case::prefixed_short(&["-n", "api", "-u", "a", "-H", "x"])]
    #[case::prefixed_short_on_field_name(&["-n", "api", "-u", "a", "-l", "warn"])]
    fn prefixed_records_drop_short_options(#[case] args: &[&str]) {
        assert!(parse(args).is_err(), "{args:?} should be rejected");
    }

    #[test]
    fn help_uses_the_custom_description() -> Result<()> {
        let help = builder()?.command().render_help().to_string();
        ensure!(help.contains("Service with nested database"), "{help}");
        ensure!(help.contains("Database connection settings"), "{help}");
        ensure!(help.contains("--db-host"), "{help}");
        Ok(())
    }
}

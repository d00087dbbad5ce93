//! Layered configuration: company defaults, an environment file, a team
//! mapping, an optional `--config` file and command-line flags.
//!
//! ```text
//! cargo run --example merging
//! cargo run --example merging -- --region us-east-2 -n 8 --params temperature:0.2
//! cargo run --example merging -- --config custom.json
//! ```

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use schema_args::{
    ArgsResult, BaseConfig, BaseConfigs, BuildContext, Builder, CliSchema, PostBuildHook,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Model deployment.
#[derive(Debug, Deserialize, CliSchema)]
#[schema_args(post_build_hook)]
struct Deployment {
    /// Deployment region.
    region: String,
    /// Number of replicas.
    #[schema_args(short = 'n', default = 1)]
    replicas: u32,
    #[serde(default)]
    team: Option<String>,
    /// Model parameters.
    #[serde(default)]
    #[schema_args(override_name = "params")]
    model: BTreeMap<String, Value>,
    #[serde(skip)]
    sources: Vec<Utf8PathBuf>,
}

impl PostBuildHook for Deployment {
    fn post_build(&mut self, ctx: &BuildContext) -> ArgsResult<()> {
        self.sources = ctx.loaded_files().to_vec();
        Ok(())
    }
}

fn write_layers(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let company = dir.join("company.json");
    let company_json = json!({
        "region": "eu-west-1",
        "model": {"name": "base", "temperature": 0.7, "max_tokens": 1024}
    });
    std::fs::write(&company, serde_json::to_vec_pretty(&company_json)?)
        .with_context(|| format!("write {}", company.display()))?;
    let env = dir.join("production.toml");
    std::fs::write(
        &env,
        "replicas = 3\n\n[model]\nname = \"large\"\ntemperature = 0.5\n",
    )
    .with_context(|| format!("write {}", env.display()))?;
    Ok((company, env))
}

fn layers(company: PathBuf, env: PathBuf) -> BaseConfigs {
    BaseConfigs::new()
        .with(BaseConfig::from(company))
        .with(BaseConfig::from(env))
        .with(json!({"team": "ml-platform"}))
}

fn report(out: &mut dyn Write, deployment: &Deployment) -> io::Result<()> {
    writeln!(out, "region:   {}", deployment.region)?;
    writeln!(out, "replicas: {}", deployment.replicas)?;
    writeln!(out, "team:     {}", deployment.team.as_deref().unwrap_or("-"))?;
    for (key, value) in &deployment.model {
        writeln!(out, "model.{key} = {value}")?;
    }
    writeln!(out, "files:")?;
    for source in &deployment.sources {
        writeln!(out, "  {source}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let dir = tempfile::tempdir().context("create scratch directory")?;
    let (company, env) = write_layers(dir.path())?;
    let builder = Builder::<Deployment>::new()?;
    let matches = builder.command().get_matches();
    let deployment = builder.build_config(&matches, layers(company, env))?;
    let mut stdout = io::stdout().lock();
    report(&mut stdout, &deployment)?;
    Ok(())
}

//! Docker-style command line with repeatable multi-value options.
//!
//! ```text
//! cargo run --example docker_like -- --image nginx:latest -n web \
//!     -p 8080 80 -p 8443 443 -v /srv/html /usr/share/nginx/html \
//!     -e LOG_LEVEL info -t edge -t public -d
//! ```

use std::io::{self, Write};

use anyhow::Result;
use schema_args::{CliSchema, build_config};
use serde::Deserialize;

/// Run a container.
#[derive(Debug, Deserialize, CliSchema)]
struct DockerConfig {
    /// Container image.
    image: String,
    #[schema_args(short = 'n', default = String::from("container"))]
    name: String,
    /// Port mapping (HOST CONTAINER).
    #[serde(default)]
    #[schema_args(short = 'p', append(nargs = 2))]
    ports: Vec<Vec<String>>,
    /// Volume mount (SOURCE TARGET).
    #[serde(default)]
    #[schema_args(short = 'v', append(nargs = 2))]
    volumes: Vec<Vec<String>>,
    /// Environment variable (KEY VALUE).
    #[serde(default)]
    #[schema_args(short = 'e', append(nargs = 2))]
    env: Vec<Vec<String>>,
    /// Add a label.
    #[serde(default)]
    #[schema_args(short = 't', append)]
    tags: Vec<String>,
    #[schema_args(short = 'd', default = false)]
    detach: bool,
}

fn pairs(out: &mut dyn Write, title: &str, rows: &[Vec<String>], sep: &str) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    for row in rows {
        writeln!(out, "  {}", row.join(sep))?;
    }
    Ok(())
}

fn report(out: &mut dyn Write, config: &DockerConfig) -> io::Result<()> {
    writeln!(out, "image:    {}", config.image)?;
    writeln!(out, "name:     {}", config.name)?;
    writeln!(out, "detached: {}", config.detach)?;
    writeln!(out, "tags:     {}", config.tags.join(", "))?;
    pairs(out, "ports", &config.ports, " -> ")?;
    pairs(out, "volumes", &config.volumes, " -> ")?;
    pairs(out, "env", &config.env, "=")
}

fn main() -> Result<()> {
    let config: DockerConfig = build_config(())?;
    let mut stdout = io::stdout().lock();
    report(&mut stdout, &config)?;
    Ok(())
}

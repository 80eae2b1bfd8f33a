use anyhow::Result;
use clap::Parser;
use devprofile::charts;
use devprofile::config::Config;
use devprofile::output::{self, OutputFormat};
use devprofile::profile;
use devprofile::projects;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devprofile")]
#[command(about = "Build a developer profile from Claude Code conversation history")]
struct Cli {
    /// Directory holding one subdirectory per project (default: ~/.claude/projects)
    #[arg(long)]
    projects_dir: Option<PathBuf>,

    /// Report real project names instead of hashed labels
    #[arg(long)]
    no_anonymize: bool,

    /// Print the full profile as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write text charts
    #[arg(short, long)]
    visualize: bool,

    /// Directory for chart files
    #[arg(long)]
    viz_output: Option<PathBuf>,

    /// Config file (default: ~/.devprofile/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let projects_dir = match cli.projects_dir.or(config.projects_dir) {
        Some(dir) => dir,
        None => projects::default_projects_dir()?,
    };
    let anonymize = config.anonymize && !cli.no_anonymize;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    let profile = profile::generate_profile(&projects_dir, anonymize)?;

    if cli.visualize {
        let viz_dir = cli.viz_output.unwrap_or(config.output.viz_dir);
        let written = charts::write_charts(&profile, &viz_dir)?;
        log::info!("Wrote {} charts:", written.len());
        for path in &written {
            log::info!("  - {}", path.display());
        }
    }

    let rendered = output::render(&profile, format)?;
    output::write_output(&rendered, cli.output.as_deref())?;

    Ok(())
}

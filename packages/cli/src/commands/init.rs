use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pageforge_document::{export_project, Project};
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name
    #[arg(default_value = "My Site")]
    pub name: String,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config = Config::default();
    let project_path = config.project_path(cwd);
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if !args.force && (project_path.exists() || config_path.exists()) {
        return Err(anyhow!(
            "Project files already exist here (use --force to overwrite)"
        ));
    }

    let project = Project::new(&args.name);
    std::fs::write(&project_path, export_project(&project))?;
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!(
        "{} {} ({})",
        "Created".green().bold(),
        args.name,
        project_path.display()
    );
    println!("Run {} to generate a static bundle", "pageforge publish".cyan());
    Ok(())
}

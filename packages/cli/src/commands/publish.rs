use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pageforge_document::import_project;
use std::path::Path;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Project file (overrides config)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn publish(args: PublishArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = args
        .project
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.project_path(cwd));
    let out_dir = args
        .out_dir
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.out_path(cwd));

    let raw = std::fs::read_to_string(&project_path)
        .with_context(|| format!("Cannot read project file {:?}", project_path))?;
    let project = import_project(&raw)?;

    println!(
        "{} {} ({} pages)",
        "Publishing".bright_blue().bold(),
        project.metadata.name,
        project.pages.len()
    );

    let bundle = pageforge_publisher::publish(&project, &project.global_styles)?;

    std::fs::create_dir_all(&out_dir)?;
    for (file, content) in &bundle.files {
        let path = out_dir.join(file);
        std::fs::write(&path, content)?;
        println!("  {} {}", "wrote".green(), path.display());
    }

    println!(
        "{} {} files in {}",
        "Done:".green().bold(),
        bundle.files.len(),
        out_dir.display()
    );
    Ok(())
}

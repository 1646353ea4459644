use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pageforge_document::import_project;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Project file (overrides config)
    #[arg(short, long)]
    pub project: Option<String>,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = args
        .project
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| config.project_path(cwd));

    let raw = std::fs::read_to_string(&project_path)
        .with_context(|| format!("Cannot read project file {:?}", project_path))?;
    let project = import_project(&raw)?;

    println!(
        "{} {} (schema v{})",
        "Project".bright_blue().bold(),
        project.metadata.name,
        project.schema_version
    );
    println!("Updated: {}", project.metadata.updated_at);
    println!();

    for page in project.pages.values() {
        let marker = if page.id == project.active_page_id {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let interactions: usize = page
            .tree
            .entities
            .values()
            .map(|n| n.interactions.len())
            .sum();
        println!(
            "{} {} {}: {} nodes, {} interactions",
            marker,
            page.slug.cyan(),
            page.name,
            page.tree.len(),
            interactions
        );
    }
    Ok(())
}

//! wfdoc CLI - reusable workflow documentation generator

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use wfdoc::{
    load_workflows, run, Config, FixSuggestion, GitPublisher, GithubContext, PublishOutcome,
    Publisher, RunOutcome, WfdocError,
};

#[derive(Parser)]
#[command(name = "wfdoc")]
#[command(about = "wfdoc - document the reusable workflows of a repository")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the workflows document (and optionally publish it)
    Generate {
        /// Directory scanned for workflow files
        #[arg(long, default_value = ".github/workflows")]
        workflows_dir: PathBuf,

        /// Target path for the rendered document
        #[arg(long, default_value = "WORKFLOWS.md")]
        document_path: PathBuf,

        /// Replace the existing document instead of appending
        #[arg(long)]
        overwrite: bool,

        /// Skip all VCS side effects (write/commit/push/PR)
        #[arg(long)]
        generate_only: bool,

        /// GitHub API endpoint override (for GitHub Enterprise)
        #[arg(long)]
        github_base_url: Option<String>,

        /// Open a pull request instead of pushing the head branch
        #[arg(long)]
        make_pull_request: bool,
    },

    /// List the discovered reusable workflows without rendering
    List {
        /// Directory scanned for workflow files
        #[arg(long, default_value = ".github/workflows")]
        workflows_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            workflows_dir,
            document_path,
            overwrite,
            generate_only,
            github_base_url,
            make_pull_request,
        } => {
            let config = Config {
                overwrite,
                document_path,
                generate_only,
                github_base_url,
                make_pull_request,
                workflows_dir,
            };
            generate(config).await
        }
        Commands::List { workflows_dir } => list_workflows(&workflows_dir),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn generate(config: Config) -> Result<(), WfdocError> {
    let publisher = if config.generate_only {
        None
    } else {
        match GithubContext::from_env()? {
            Some(context) => Some(GitPublisher::new(context)),
            None => {
                println!(
                    "{} GITHUB_TOKEN not set, generating without publishing",
                    "→".cyan()
                );
                None
            }
        }
    };
    let publisher_ref = publisher.as_ref().map(|p| p as &dyn Publisher);

    match run(&config, publisher_ref).await? {
        RunOutcome::NoWorkflows => {
            println!("{} No reusable workflows found", "→".yellow());
        }
        RunOutcome::Generated { published, .. } => match published {
            Some(PublishOutcome::Pushed { branch }) => {
                println!("{} Document pushed to '{}'", "✓".green(), branch);
            }
            Some(PublishOutcome::PullRequestOpened { number }) => {
                println!("{} Opened pull request #{}", "✓".green(), number);
            }
            Some(PublishOutcome::NoChanges) => {
                println!("{} Document already up to date", "✓".green());
            }
            None => {
                println!("{} Document generated", "✓".green());
            }
        },
    }

    Ok(())
}

fn list_workflows(workflows_dir: &std::path::Path) -> Result<(), WfdocError> {
    let set = load_workflows(workflows_dir)?;

    if set.is_empty() {
        println!("{} No reusable workflows found", "→".yellow());
        return Ok(());
    }

    println!(
        "{} {} reusable workflow(s) in {}",
        "✓".green(),
        set.len(),
        workflows_dir.display()
    );
    for workflow in set.iter() {
        println!(
            "  {} {} ({}) - {} inputs, {} outputs, {} secrets",
            "•".cyan(),
            workflow.name.bold(),
            workflow.source_path,
            workflow.inputs.len(),
            workflow.outputs.len(),
            workflow.secrets.len()
        );
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use branch_suggest::cli::{run_match_workflow, MatchWorkflowArgs};
use branch_suggest::config::{self, LogFormat, OutputFormat};
use branch_suggest::domain::{generate_candidates, ParsedVersion};
use branch_suggest::ticket::resolve_ticket_key;
use branch_suggest::{logging, ui};

#[derive(Parser)]
#[command(
    name = "branch-suggest",
    version,
    about = "Suggest release branches for a ticket's fix versions"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, value_enum, help = "Log output format")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match fix versions against a repository's branches
    Match {
        /// Fix versions JSON: an array or a ticket document with `fixVersions`
        fix_versions: String,
        /// Branches JSON: `[{"name": "master"}, ...]`
        branches: String,
        /// Repository ("owner/repo") to filter fix versions for
        repository: Option<String>,
        #[arg(long, value_enum, help = "Output format")]
        format: Option<OutputFormat>,
    },
    /// Parse fix version labels
    Parse {
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List candidate branches for a fix version label
    Candidates { label: String },
    /// Find the ticket key in a PR title or branch name
    Ticket {
        pr_title: String,
        branch_name: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    logging::init(args.log_format.unwrap_or(config.logging.format));

    match args.command {
        Command::Match {
            fix_versions,
            branches,
            repository,
            format,
        } => {
            let workflow_args = MatchWorkflowArgs {
                fix_versions_json: fix_versions,
                branches_json: branches,
                repository,
            };
            let result = match run_match_workflow(workflow_args, &config) {
                Ok(result) => result,
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            };

            for warning in &result.warnings {
                ui::display_boundary_warning(warning);
            }

            match format.unwrap_or(config.output.format) {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&result)
                        .context("Failed to serialize match results")?;
                    println!("{}", json);
                }
                OutputFormat::Markdown => println!("{}", result.markdown),
            }
        }
        Command::Parse { labels } => {
            let parsed: Vec<Option<ParsedVersion>> =
                labels.iter().map(|label| ParsedVersion::parse(label)).collect();
            let json =
                serde_json::to_string_pretty(&parsed).context("Failed to serialize versions")?;
            println!("{}", json);
        }
        Command::Candidates { label } => {
            let parsed = ParsedVersion::parse(&label);
            if parsed.is_none() {
                ui::display_status(&format!(
                    "'{}' is not a recognizable version; only master applies",
                    label
                ));
            }
            ui::display_candidates(&generate_candidates(parsed.as_ref()));
        }
        Command::Ticket {
            pr_title,
            branch_name,
        } => match resolve_ticket_key(&pr_title, branch_name.as_deref()) {
            Some(key) => println!("{}", key),
            None => {
                ui::display_error("No JIRA ticket found in PR title or branch name");
                std::process::exit(2);
            }
        },
    }

    Ok(())
}

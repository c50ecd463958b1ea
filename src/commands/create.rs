use crate::batch::{run_batch, BatchReport};
use crate::config::{load_config, Config, TOKEN_ENV};
use crate::display;
use crate::error::{GitissueError, Result};
use crate::github::GithubClient;
use crate::issue::{split_list, IssueRequest};
use crate::GlobalOpts;
use clap::Args;
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// GitHub organization name (required)
    #[arg(short, long, env = "GITISSUEHELPER_ORG")]
    pub org: Option<String>,

    /// Issue title (required)
    #[arg(short, long, env = "GITISSUEHELPER_TITLE")]
    pub title: Option<String>,

    /// Issue description (required)
    #[arg(short, long, env = "GITISSUEHELPER_DESCRIPTION")]
    pub description: Option<String>,

    /// Comma-separated list of repository names (if omitted, all repos in the org are used)
    #[arg(short, long, env = "GITISSUEHELPER_REPOS")]
    pub repos: Option<String>,

    /// Comma-separated labels to add to the issues
    #[arg(short, long, env = "GITISSUEHELPER_LABELS")]
    pub labels: Option<String>,

    /// GitHub API token (uses GITHUB_TOKEN if not provided)
    #[arg(long, env = "GITISSUEHELPER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Resolve and print the target repositories without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated inputs for one run.
#[derive(Debug)]
pub struct CreateOptions {
    pub issue: IssueRequest,
    /// Explicit targets; `None` means enumerate the whole organization.
    pub repositories: Option<Vec<String>>,
}

impl CreateOptions {
    pub fn resolve(args: &CreateArgs, config: &Config) -> Result<Self> {
        let org = non_blank(args.org.as_deref()).or(non_blank(config.defaults.org.as_deref()));
        let title = non_blank(args.title.as_deref());
        let body = non_blank(args.description.as_deref());

        let (Some(org), Some(title), Some(body)) = (org, title, body) else {
            return Err(missing_required());
        };

        let labels = match args.labels.as_deref() {
            Some(raw) => split_list(raw),
            None => config.defaults.labels.clone().unwrap_or_default(),
        };

        let repositories = non_blank(args.repos.as_deref()).map(split_list);

        Ok(Self {
            issue: IssueRequest {
                organization: org.to_string(),
                title: title.to_string(),
                body: body.to_string(),
                labels,
            },
            repositories,
        })
    }
}

impl CreateArgs {
    /// Checks the fields only flags can supply, before any config file is read.
    pub fn check_required(&self) -> Result<()> {
        if non_blank(self.title.as_deref()).is_none()
            || non_blank(self.description.as_deref()).is_none()
        {
            return Err(missing_required());
        }
        Ok(())
    }
}

fn missing_required() -> GitissueError {
    GitissueError::Validation(
        "missing required arguments: --org, --title, and --description are required".into(),
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize)]
struct Targets<'a> {
    organization: &'a str,
    repositories: &'a [String],
}

pub async fn run(args: &CreateArgs, global: &GlobalOpts) -> Result<()> {
    args.check_required()?;
    let config = load_config()?;
    let options = CreateOptions::resolve(args, &config)?;

    let env_token = std::env::var(TOKEN_ENV).ok();
    let token = config.resolve_token(args.token.as_deref(), env_token.as_deref())?;
    let client = GithubClient::new(&token, global.api_url.as_deref(), global.verbose)?;

    let org = options.issue.organization.as_str();
    let repositories = match options.repositories {
        Some(ref explicit) => explicit.clone(),
        None => {
            if !global.json {
                println!("Fetching repositories from organization: {org}...");
            }
            client.list_org_repo_names(org).await?
        }
    };

    if repositories.is_empty() {
        return Err(GitissueError::EmptyTarget(org.to_string()));
    }
    info!(org, count = repositories.len(), "resolved target repositories");

    if args.dry_run {
        let targets = Targets {
            organization: org,
            repositories: &repositories,
        };
        display::output(global.json, &targets, render_targets);
        return Ok(());
    }

    if !global.json {
        println!("Creating issues in organization: {org}");
        println!("Title: {}", options.issue.title);
        println!("Repositories: {}", repositories.len());
        display::rule();
    }

    let report = run_batch(&client, &options.issue, &repositories, !global.json).await;

    display::output(global.json, &report, render_summary);

    client.check_rate_limit_if_verbose().await;

    report.into_result().map(|_| ())
}

fn render_summary(report: &BatchReport) {
    display::rule();
    println!(
        "Summary: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
}

fn render_targets(targets: &Targets<'_>) {
    let mut table = display::new_table(&["#", "Repository"]);
    for (i, repo) in targets.repositories.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{}/{repo}", targets.organization),
        ]);
    }
    println!("{table}");
    display::success(&format!(
        "Dry run: {} issue(s) would be created.",
        targets.repositories.len()
    ));
}

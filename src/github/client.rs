use crate::batch::IssueSubmitter;
use crate::error::{describe, GitissueError, Result};
use crate::issue::IssueRequest;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Page};
use serde::Deserialize;
use tracing::debug;

const PER_PAGE: &str = "100";

pub struct GithubClient {
    octocrab: Octocrab,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticatedUser {
    pub login: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrgRepo {
    name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateLimit {
    pub resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitResource,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResource {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
}

impl GithubClient {
    /// Builds a client with retries disabled; each call is exactly one request.
    pub fn new(token: &str, api_url: Option<&str>, verbose: bool) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None);
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| GitissueError::Config(format!("Invalid API URL {url}: {e}")))?;
        }
        let octocrab = builder
            .build()
            .map_err(|e| GitissueError::GitHub(e.to_string()))?;
        Ok(Self { octocrab, verbose })
    }

    pub async fn validate_token(&self) -> Result<AuthenticatedUser> {
        let user: AuthenticatedUser = self
            .octocrab
            .get("/user", None::<&()>)
            .await
            .map_err(|e| {
                GitissueError::GitHub(format!("Token validation failed: {}", describe(&e)))
            })?;
        Ok(user)
    }

    pub async fn get_rate_limit(&self) -> Result<RateLimit> {
        let rate_limit: RateLimit = self.octocrab.get("/rate_limit", None::<&()>).await?;
        Ok(rate_limit)
    }

    pub async fn check_rate_limit_if_verbose(&self) {
        if !self.verbose {
            return;
        }
        match self.get_rate_limit().await {
            Ok(rl) => {
                let core = &rl.resources.core;
                eprintln!(
                    "Rate limit: {}/{} remaining (resets at {})",
                    core.remaining,
                    core.limit,
                    chrono::DateTime::from_timestamp(core.reset, 0)
                        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| core.reset.to_string())
                );
            }
            Err(e) => crate::display::warn(&format!("Could not check rate limit: {e}")),
        }
    }

    /// Lists every repository name in `org`, following `Link: rel="next"`.
    ///
    /// A failing page discards everything collected so far.
    pub async fn list_org_repo_names(&self, org: &str) -> Result<Vec<String>> {
        let fetch_error = |e: octocrab::Error| GitissueError::Fetch {
            org: org.to_string(),
            cause: describe(&e),
        };

        let mut page: Page<OrgRepo> = self
            .octocrab
            .get(
                format!("/orgs/{org}/repos"),
                Some(&[("per_page", PER_PAGE), ("page", "1")]),
            )
            .await
            .map_err(fetch_error)?;

        let mut names = Vec::new();
        let mut pages = 1u32;
        loop {
            if page.items.is_empty() {
                break;
            }
            names.extend(page.items.drain(..).map(|r| r.name));
            debug!(org, pages, collected = names.len(), "fetched repository page");

            match self
                .octocrab
                .get_page::<OrgRepo>(&page.next)
                .await
                .map_err(fetch_error)?
            {
                Some(next) => {
                    page = next;
                    pages += 1;
                }
                None => break,
            }
        }
        Ok(names)
    }

    pub async fn create_issue(
        &self,
        org: &str,
        repo: &str,
        issue: &IssueRequest,
    ) -> Result<CreatedIssue> {
        let created: CreatedIssue = self
            .octocrab
            .post(format!("/repos/{org}/{repo}/issues"), Some(issue))
            .await
            .map_err(|e| GitissueError::Submit {
                repository: format!("{org}/{repo}"),
                cause: describe(&e),
            })?;
        debug!(
            org,
            repo,
            number = created.number,
            url = created.html_url.as_deref().unwrap_or("-"),
            "created issue"
        );
        Ok(created)
    }
}

impl IssueSubmitter for GithubClient {
    async fn submit(&self, org: &str, repo: &str, issue: &IssueRequest) -> Result<()> {
        self.create_issue(org, repo, issue).await.map(|_| ())
    }
}

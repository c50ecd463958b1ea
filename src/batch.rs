use crate::display;
use crate::error::{GitissueError, Result};
use crate::issue::IssueRequest;
use serde::Serialize;
use tracing::debug;

/// Creates one issue in one repository.
pub trait IssueSubmitter {
    async fn submit(&self, org: &str, repo: &str, issue: &IssueRequest) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResult {
    pub repository: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub organization: String,
    pub title: String,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<SubmissionResult>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Turns any failed submission into a run-level error.
    pub fn into_result(self) -> Result<Self> {
        if self.failed > 0 {
            return Err(GitissueError::SubmissionsFailed {
                failed: self.failed,
                total: self.total(),
            });
        }
        Ok(self)
    }
}

/// Submits `issue` to each repository in order, one at a time.
///
/// Failures are recorded and the batch moves on; this never returns early.
pub async fn run_batch<S: IssueSubmitter>(
    submitter: &S,
    issue: &IssueRequest,
    repositories: &[String],
    progress: bool,
) -> BatchReport {
    let org = issue.organization.as_str();
    let mut report = BatchReport {
        organization: org.to_string(),
        title: issue.title.clone(),
        succeeded: 0,
        failed: 0,
        results: Vec::with_capacity(repositories.len()),
    };

    for repo in repositories {
        if progress {
            display::progress_start(org, repo);
        }
        match submitter.submit(org, repo, issue).await {
            Ok(()) => {
                if progress {
                    display::progress_ok();
                }
                debug!(org, repo, "issue submitted");
                report.succeeded += 1;
                report.results.push(SubmissionResult {
                    repository: repo.clone(),
                    outcome: Outcome::Success,
                    error: None,
                });
            }
            Err(e) => {
                let cause = e.to_string();
                if progress {
                    display::progress_failed(&cause);
                }
                debug!(org, repo, error = %cause, "issue submission failed");
                report.failed += 1;
                report.results.push(SubmissionResult {
                    repository: repo.clone(),
                    outcome: Outcome::Failure,
                    error: Some(cause),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call and fails for the listed repositories.
    #[derive(Default)]
    struct RecordingSubmitter {
        failing: Vec<&'static str>,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl IssueSubmitter for RecordingSubmitter {
        async fn submit(&self, org: &str, repo: &str, issue: &IssueRequest) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((repo.to_string(), issue.title.clone()));
            if self.failing.iter().any(|f| *f == repo) {
                return Err(GitissueError::Submit {
                    repository: format!("{org}/{repo}"),
                    cause: "Not Found (404 Not Found)".to_string(),
                });
            }
            Ok(())
        }
    }

    fn issue() -> IssueRequest {
        IssueRequest {
            organization: "acme".to_string(),
            title: "T".to_string(),
            body: "D".to_string(),
            labels: vec!["chore".to_string()],
        }
    }

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn called(submitter: &RecordingSubmitter) -> Vec<String> {
        submitter
            .calls
            .borrow()
            .iter()
            .map(|(repo, _)| repo.clone())
            .collect()
    }

    #[tokio::test]
    async fn submits_in_input_order() {
        let submitter = RecordingSubmitter::default();
        let report = run_batch(&submitter, &issue(), &repos(&["b", "a", "c"]), false).await;

        assert_eq!(called(&submitter), vec!["b", "a", "c"]);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn failure_does_not_stop_the_batch() {
        let submitter = RecordingSubmitter {
            failing: vec!["r2"],
            ..Default::default()
        };
        let report = run_batch(&submitter, &issue(), &repos(&["r1", "r2", "r3"]), false).await;

        assert_eq!(called(&submitter), vec!["r1", "r2", "r3"]);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results[1].outcome, Outcome::Failure);
        assert!(report.results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("acme/r2"));
    }

    #[tokio::test]
    async fn counts_cover_every_repository() {
        let submitter = RecordingSubmitter {
            failing: vec!["x", "z"],
            ..Default::default()
        };
        let targets = repos(&["w", "x", "y", "z", "x"]);
        let report = run_batch(&submitter, &issue(), &targets, false).await;

        assert_eq!(report.total(), targets.len());
        assert_eq!(report.results.len(), targets.len());
        assert_eq!(report.failed, 3);
    }

    #[tokio::test]
    async fn same_payload_goes_to_every_repository() {
        let submitter = RecordingSubmitter::default();
        run_batch(&submitter, &issue(), &repos(&["a", "b"]), false).await;

        assert!(submitter.calls.borrow().iter().all(|(_, title)| title == "T"));
    }

    #[tokio::test]
    async fn repeated_run_submits_again() {
        let submitter = RecordingSubmitter::default();
        let targets = repos(&["a", "b"]);
        run_batch(&submitter, &issue(), &targets, false).await;
        run_batch(&submitter, &issue(), &targets, false).await;

        assert_eq!(called(&submitter), vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn into_result_fails_on_partial_success() {
        let report = BatchReport {
            organization: "acme".to_string(),
            title: "T".to_string(),
            succeeded: 1,
            failed: 1,
            results: Vec::new(),
        };
        let err = report.into_result().unwrap_err();
        assert!(matches!(
            err,
            GitissueError::SubmissionsFailed { failed: 1, total: 2 }
        ));
    }

    #[test]
    fn report_serializes_outcomes() {
        let report = BatchReport {
            organization: "acme".to_string(),
            title: "T".to_string(),
            succeeded: 1,
            failed: 0,
            results: vec![SubmissionResult {
                repository: "api".to_string(),
                outcome: Outcome::Success,
                error: None,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["outcome"], "success");
        assert!(json["results"][0].get("error").is_none());
    }
}

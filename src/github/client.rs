use crate::Result;
use crate::github::models::{BranchesData, CollaboratorsData, HistoryData};
use crate::github::queries;
use crate::github::{Collaborator, CommitHistory, RepoSpec};
use crate::tally::DayWindow;
use ohno::{IntoAppError, app_err, bail};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const LOG_TARGET: &str = "    github";

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
const USER_AGENT: &str = "commit-tally";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<QueryError>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: String,
}

/// GraphQL API client.
///
/// Every request is a POST of `{"query": ..., "variables": ...}` with a
/// bearer authorization header. Any non-success HTTP status aborts the whole
/// run; there is no retry or backoff, and partial results are not salvaged.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Create a new GitHub GraphQL client
    pub fn new(token: &str) -> Result<Self> {
        let mut auth_val = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = reqwest::header::HeaderMap::new();
        let _ = headers.insert(reqwest::header::AUTHORIZATION, auth_val);

        let http = reqwest::Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;

        Ok(Self { http })
    }

    /// Fetch the repository's direct collaborators (login, id, email).
    pub async fn collaborators(&self, repo: &RepoSpec) -> Result<Vec<Collaborator>> {
        log::debug!(target: LOG_TARGET, "Fetching collaborators of '{repo}'");

        let variables = json!({ "owner": repo.owner(), "name": repo.repo() });
        let data: CollaboratorsData = self.run_query(queries::COLLABORATORS, variables).await?;

        Ok(data.repository.collaborators.nodes)
    }

    /// Fetch the repository's branch names (`refs/heads/*`).
    pub async fn branches(&self, repo: &RepoSpec) -> Result<Vec<String>> {
        log::debug!(target: LOG_TARGET, "Fetching branches of '{repo}'");

        let variables = json!({ "owner": repo.owner(), "name": repo.repo() });
        let data: BranchesData = self.run_query(queries::BRANCHES, variables).await?;

        Ok(data.repository.refs.nodes.into_iter().map(|branch| branch.name).collect())
    }

    /// Fetch one branch's commit history for a single collaborator, windowed
    /// to a single calendar day.
    pub async fn history(&self, repo: &RepoSpec, branch: &str, author_id: &str, window: &DayWindow, page_size: u32) -> Result<CommitHistory> {
        log::debug!(target: LOG_TARGET, "Fetching history of '{repo}' branch '{branch}' on {}", window.date());

        let variables = json!({
            "owner": repo.owner(),
            "name": repo.repo(),
            "branch": branch,
            "authorId": author_id,
            "since": window.since(),
            "until": window.until(),
            "pageSize": page_size,
        });

        let data: HistoryData = self.run_query(queries::HISTORY, variables).await?;

        let git_ref = data
            .repository
            .git_ref
            .ok_or_else(|| app_err!("branch '{branch}' not found in repository '{repo}'"))?;

        git_ref
            .target
            .and_then(|target| target.history)
            .ok_or_else(|| app_err!("branch '{branch}' of repository '{repo}' does not point at a commit"))
    }

    async fn run_query<T: DeserializeOwned>(&self, document: &str, variables: Value) -> Result<T> {
        let response = self
            .http
            .post(GRAPHQL_ENDPOINT)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .into_app_err("could not read GraphQL response body")?;

        decode(status, &body)
    }
}

/// Decode a GraphQL response, failing fast on a non-success status or on
/// errors reported inside a successful one.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if !status.is_success() {
        bail!("GraphQL query failed with HTTP status {status}");
    }

    let envelope: Envelope<T> = serde_json::from_slice(body).into_app_err("malformed GraphQL response")?;

    if !envelope.errors.is_empty() {
        let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
        bail!("GraphQL query failed: {}", messages.join("; "));
    }

    envelope.data.ok_or_else(|| app_err!("GraphQL response carried no data"))
}

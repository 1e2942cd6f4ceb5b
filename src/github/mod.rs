//! GitHub GraphQL API access.

mod client;
mod models;
mod queries;
mod repo_spec;

pub use client::Client;
pub use models::{Collaborator, CommitHistory, CommitNode};
pub use repo_spec::RepoSpec;

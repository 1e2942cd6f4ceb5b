//! GraphQL documents.
//!
//! Documents are fixed; everything that varies per request travels in the
//! `variables` object rather than being templated into the query text.

pub(crate) const COLLABORATORS: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    collaborators(first: 100, affiliation: DIRECT) {
      nodes {
        id
        login
        email
      }
    }
  }
}";

pub(crate) const BRANCHES: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    refs(first: 100, refPrefix: \"refs/heads/\") {
      nodes {
        name
      }
    }
  }
}";

pub(crate) const HISTORY: &str = "
query($owner: String!, $name: String!, $branch: String!, $authorId: ID!, $since: GitTimestamp!, $until: GitTimestamp!, $pageSize: Int!) {
  repository(owner: $owner, name: $name) {
    ref(qualifiedName: $branch) {
      target {
        ... on Commit {
          history(first: $pageSize, since: $since, until: $until, author: { id: $authorId }) {
            totalCount
            nodes {
              abbreviatedOid
              authoredDate
              messageBody
            }
          }
        }
      }
    }
  }
}";

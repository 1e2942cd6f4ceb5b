//! Deserialized shapes of the GraphQL responses.
//!
//! Each query has a typed payload mirroring the `data.repository...` nesting
//! of the wire format; only the fields the tally actually reads are declared.

use serde::Deserialize;

/// An account with commit access to the tracked repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collaborator {
    /// Opaque platform id, used to scope history queries.
    pub id: String,
    pub login: String,
    /// Profile email; an empty string when the account hides it.
    #[serde(default)]
    pub email: String,
}

/// One page of commit history for a branch/day/collaborator query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistory {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<CommitNode>,
}

/// A single commit record. Transient: fetched, filtered, and discarded per
/// branch/day/collaborator triple.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    /// Short-form content hash, used only for duplicate detection within one
    /// collection pass.
    pub abbreviated_oid: String,
    /// RFC 3339 timestamp of when the commit was authored.
    pub authored_date: String,
    #[serde(default)]
    pub message_body: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollaboratorsData {
    pub repository: CollaboratorsRepository,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollaboratorsRepository {
    pub collaborators: NodeList<Collaborator>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchesData {
    pub repository: BranchesRepository,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchesRepository {
    pub refs: NodeList<BranchNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BranchNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeList<T> {
    #[serde(default)]
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryData {
    pub repository: HistoryRepository,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryRepository {
    #[serde(rename = "ref")]
    pub git_ref: Option<HistoryRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryRef {
    pub target: Option<HistoryTarget>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryTarget {
    /// Absent when the ref points at something other than a commit.
    pub history: Option<CommitHistory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_payload_deserializes() {
        let json = r#"{
            "repository": {
                "ref": {
                    "target": {
                        "history": {
                            "totalCount": 2,
                            "nodes": [
                                {
                                    "abbreviatedOid": "abc1234",
                                    "authoredDate": "2018-03-26T20:40:00-03:00",
                                    "messageBody": ""
                                },
                                {
                                    "abbreviatedOid": "def5678",
                                    "authoredDate": "2018-03-26T21:00:00-03:00",
                                    "messageBody": "Co-authored-by: Ada <ada@example.com>"
                                }
                            ]
                        }
                    }
                }
            }
        }"#;

        let data: HistoryData = serde_json::from_str(json).unwrap();
        let history = data.repository.git_ref.unwrap().target.unwrap().history.unwrap();
        assert_eq!(history.total_count, 2);
        assert_eq!(history.nodes.len(), 2);
        assert_eq!(history.nodes[0].abbreviated_oid, "abc1234");
    }

    #[test]
    fn missing_ref_deserializes_to_none() {
        let data: HistoryData = serde_json::from_str(r#"{"repository": {"ref": null}}"#).unwrap();
        assert!(data.repository.git_ref.is_none());
    }

    #[test]
    fn collaborator_email_defaults_to_empty() {
        let collab: Collaborator = serde_json::from_str(r#"{"id": "MDQ6", "login": "ada"}"#).unwrap();
        assert_eq!(collab.email, "");
    }
}

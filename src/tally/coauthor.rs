use crate::github::CommitNode;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Pattern for a `Co-authored-by: Name <email>` commit message trailer.
/// A trailer missing its closing bracket simply fails to match and credits
/// nothing; the remaining trailers are still scanned.
static TRAILER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^co-authored-by:[^<\r\n]*<([^<>\r\n]+)>").expect("invalid regex"));

/// Count co-author credits in a list of (already cleaned) commit records.
///
/// Each trailer line credits one commit to the email enclosed in its angle
/// brackets, normalized to lowercase.
#[must_use]
pub fn extract_credits(commits: &[CommitNode]) -> BTreeMap<String, u64> {
    let mut credits = BTreeMap::new();

    for commit in commits {
        if commit.message_body.is_empty() {
            continue;
        }

        for captures in TRAILER_REGEX.captures_iter(&commit.message_body) {
            if let Some(email) = captures.get(1) {
                *credits.entry(email.as_str().trim().to_lowercase()).or_insert(0) += 1;
            }
        }
    }

    credits
}

/// Merge `from` into `into`, summing counts for shared identities and
/// carrying unique ones through. Associative and commutative across repeated
/// merges.
pub fn merge_credits(into: &mut BTreeMap<String, u64>, from: BTreeMap<String, u64>) {
    for (identity, count) in from {
        *into.entry(identity).or_insert(0) += count;
    }
}

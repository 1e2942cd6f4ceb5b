use crate::Result;
use crate::github::{CommitHistory, CommitNode};
use crate::tally::DayWindow;
use chrono::DateTime;
use ohno::IntoAppError;
use std::collections::HashSet;

const LOG_TARGET: &str = "     clean";

/// The output of cleaning one branch/day/collaborator history page.
#[derive(Debug, Default)]
pub struct CleanedHistory {
    /// Corrected commit count: the raw total minus the rejections.
    pub count: u64,
    /// The accepted commit records, in delivery order.
    pub commits: Vec<CommitNode>,
}

/// Filter one raw history page down to the commits that genuinely belong to
/// the window's day.
///
/// Two kinds of record get rejected, each decrementing the returned count:
///
/// - commits whose authored date (in the window's offset) differs from the
///   window date. History queries select by committed-date semantics, so
///   rebased or cherry-picked commits bleed across the day boundary.
/// - commits whose abbreviated hash was already seen for this collaborator
///   on this day. The same commit is reachable from several branches when
///   their histories have not diverged, and only its first occurrence
///   counts.
///
/// `seen_hashes` accumulates across the branches of one day/collaborator
/// pass; it must be reset per collaborator.
pub fn clean_commits(history: CommitHistory, seen_hashes: &mut HashSet<String>, window: &DayWindow) -> Result<CleanedHistory> {
    if history.total_count > history.nodes.len() as u64 {
        log::warn!(
            target: LOG_TARGET,
            "History page truncated: {} commits reported but only {} fetched; the tally may undercount",
            history.total_count,
            history.nodes.len()
        );
    }

    let mut count = history.total_count;
    let mut commits = Vec::with_capacity(history.nodes.len());

    for commit in history.nodes {
        let authored = DateTime::parse_from_rfc3339(&commit.authored_date)
            .into_app_err_with(|| format!("unparseable authored date '{}' on commit {}", commit.authored_date, commit.abbreviated_oid))?;

        if authored.with_timezone(&window.offset()).date_naive() != window.date() {
            log::debug!(target: LOG_TARGET, "Dropping commit {}: authored outside {window}", commit.abbreviated_oid);
            count = count.saturating_sub(1);
            continue;
        }

        if !seen_hashes.insert(commit.abbreviated_oid.clone()) {
            log::debug!(target: LOG_TARGET, "Dropping commit {}: already counted on another branch", commit.abbreviated_oid);
            count = count.saturating_sub(1);
            continue;
        }

        commits.push(commit);
    }

    Ok(CleanedHistory { count, commits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Weekday};

    fn window() -> DayWindow {
        let offset: FixedOffset = "-03:00".parse().unwrap();
        // 2018-03-26 was a Monday
        DayWindow::most_recent(Weekday::Mon, NaiveDate::from_ymd_opt(2018, 3, 26).unwrap(), offset)
    }

    fn commit(hash: &str, authored: &str) -> CommitNode {
        CommitNode {
            abbreviated_oid: hash.to_owned(),
            authored_date: authored.to_owned(),
            message_body: String::new(),
        }
    }

    fn history(nodes: Vec<CommitNode>) -> CommitHistory {
        CommitHistory {
            total_count: nodes.len() as u64,
            nodes,
        }
    }

    #[test]
    fn empty_history_yields_zero_without_error() {
        let mut seen = HashSet::new();
        let cleaned = clean_commits(CommitHistory::default(), &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, 0);
        assert!(cleaned.commits.is_empty());
    }

    #[test]
    fn count_always_equals_clean_list_length() {
        let mut seen = HashSet::new();
        let raw = history(vec![
            commit("aaa1111", "2018-03-26T10:00:00-03:00"),
            commit("bbb2222", "2018-03-25T10:00:00-03:00"),
            commit("ccc3333", "2018-03-26T15:30:00-03:00"),
        ]);
        let total = raw.total_count;

        let cleaned = clean_commits(raw, &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, cleaned.commits.len() as u64);
        assert!(cleaned.count <= total);
    }

    #[test]
    fn commits_outside_the_day_are_rejected() {
        let mut seen = HashSet::new();
        let raw = history(vec![
            commit("aaa1111", "2018-03-25T23:59:00-03:00"), // day before
            commit("bbb2222", "2018-03-26T00:00:00-03:00"), // on the day
            commit("ccc3333", "2018-03-27T00:01:00-03:00"), // day after
        ]);

        let cleaned = clean_commits(raw, &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, 1);
        assert_eq!(cleaned.commits[0].abbreviated_oid, "bbb2222");
    }

    #[test]
    fn authored_dates_are_compared_in_the_window_offset() {
        let mut seen = HashSet::new();
        // 2018-03-27T01:30:00Z is still 2018-03-26 at -03:00
        let raw = history(vec![commit("aaa1111", "2018-03-27T01:30:00Z")]);

        let cleaned = clean_commits(raw, &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, 1);
    }

    #[test]
    fn duplicate_hashes_keep_the_first_occurrence() {
        let mut seen = HashSet::new();

        let first = history(vec![commit("aaa1111", "2018-03-26T10:00:00-03:00")]);
        let cleaned = clean_commits(first, &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, 1);

        // Same commit visible from a second branch.
        let second = history(vec![
            commit("aaa1111", "2018-03-26T10:00:00-03:00"),
            commit("bbb2222", "2018-03-26T11:00:00-03:00"),
        ]);
        let cleaned = clean_commits(second, &mut seen, &window()).unwrap();
        assert_eq!(cleaned.count, 1);
        assert_eq!(cleaned.commits[0].abbreviated_oid, "bbb2222");
    }

    #[test]
    fn unparseable_authored_date_is_an_error() {
        let mut seen = HashSet::new();
        let raw = history(vec![commit("aaa1111", "yesterday-ish")]);
        let _ = clean_commits(raw, &mut seen, &window()).unwrap_err();
    }
}

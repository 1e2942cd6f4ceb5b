//! Drives one collection run: branches × collaborators × weekdays.

use crate::Result;
use crate::config::Config;
use crate::github::{Client, Collaborator, RepoSpec};
use crate::progress::ProgressReporter;
use crate::tally::{DayWindow, TallyTable, clean_commits, extract_credits, merge_credits};
use chrono::{FixedOffset, Utc, Weekday};
use std::collections::{BTreeMap, HashMap, HashSet};

const LOG_TARGET: &str = " collector";

/// The raw outcome of a collection run: the two parallel tally tables plus
/// the collaborator identities they were built from.
#[derive(Debug)]
pub struct WeekActivity {
    /// Direct-author commit counts, keyed by login.
    pub direct: TallyTable,
    /// Co-author credits, keyed by lowercased email.
    pub co_authored: TallyTable,
    /// The collaborators that were tallied.
    pub collaborators: Vec<Collaborator>,
}

impl WeekActivity {
    /// The email → login translations for this run: the configured map
    /// extended with the collaborators' own profile emails. Configured
    /// entries win on conflict.
    #[must_use]
    pub fn email_logins(&self, configured: &HashMap<String, String>) -> HashMap<String, String> {
        let mut map = HashMap::new();

        for collaborator in &self.collaborators {
            if !collaborator.email.is_empty() {
                let _ = map.insert(collaborator.email.to_lowercase(), collaborator.login.clone());
            }
        }

        for (email, login) in configured {
            let _ = map.insert(email.clone(), login.clone());
        }

        map
    }

    /// Collapse into the exported table: normalize co-author emails to
    /// logins, then sum the two tables cell-wise.
    #[must_use]
    pub fn into_table(self, configured: &HashMap<String, String>) -> TallyTable {
        let email_logins = self.email_logins(configured);
        let mut co_authored = self.co_authored;
        co_authored.map_identities(&email_logins);
        self.direct.sum(co_authored)
    }
}

/// Collects per-weekday commit tallies for every collaborator on a
/// repository.
///
/// Queries are issued strictly one at a time; the run's determinism depends
/// on there being no concurrent requests.
#[derive(Debug)]
pub struct Collector {
    client: Client,
    repo: RepoSpec,
    weekdays: Vec<Weekday>,
    offset: FixedOffset,
    excluded_branches: Vec<String>,
    excluded_logins: Vec<String>,
    page_size: u32,
    show_progress: bool,
}

impl Collector {
    pub fn new(client: Client, repo: RepoSpec, config: &Config, show_progress: bool) -> Result<Self> {
        Ok(Self {
            client,
            repo,
            weekdays: config.weekdays()?,
            offset: config.utc_offset()?,
            excluded_branches: config.excluded_branches.clone(),
            excluded_logins: config.excluded_logins.clone(),
            page_size: config.page_size,
            show_progress,
        })
    }

    /// Run the full collection pass.
    pub async fn collect(&self) -> Result<WeekActivity> {
        let branches: Vec<_> = self
            .client
            .branches(&self.repo)
            .await?
            .into_iter()
            .filter(|branch| !self.excluded_branches.contains(branch))
            .collect();

        let collaborators: Vec<_> = self
            .client
            .collaborators(&self.repo)
            .await?
            .into_iter()
            .filter(|collaborator| !self.excluded_logins.contains(&collaborator.login))
            .collect();

        log::info!(
            target: LOG_TARGET,
            "Tallying {} collaborator(s) across {} branch(es) of '{}' for {} weekday(s)",
            collaborators.len(),
            branches.len(),
            self.repo,
            self.weekdays.len()
        );

        if branches.is_empty() {
            log::warn!(target: LOG_TARGET, "No branches left to tally after exclusions");
        }

        let progress = ProgressReporter::new((self.weekdays.len() * collaborators.len()) as u64, self.show_progress);
        let today = Utc::now().with_timezone(&self.offset).date_naive();

        let mut direct = TallyTable::new();
        let mut co_authored = TallyTable::new();

        for &weekday in &self.weekdays {
            let window = DayWindow::most_recent(weekday, today, self.offset);

            for collaborator in &collaborators {
                progress.set_message(format!("{} on {window}", collaborator.login));
                log::info!(target: LOG_TARGET, "Collecting commits of '{}' on {window}", collaborator.login);

                let (count, credits) = self.collect_day(collaborator, &branches, &window).await?;

                direct.add(weekday, collaborator.login.clone(), count);
                for (email, credit) in credits {
                    co_authored.add(weekday, email, credit);
                }

                progress.step();
            }
        }

        progress.done();

        Ok(WeekActivity {
            direct,
            co_authored,
            collaborators,
        })
    }

    /// Tally one collaborator's commits over all branches for a single day.
    ///
    /// The seen-hash set spans the branches of this day so a commit reachable
    /// from several branches is counted once.
    async fn collect_day(&self, collaborator: &Collaborator, branches: &[String], window: &DayWindow) -> Result<(u64, BTreeMap<String, u64>)> {
        let mut seen_hashes = HashSet::new();
        let mut count = 0;
        let mut credits = BTreeMap::new();

        for branch in branches {
            let history = self
                .client
                .history(&self.repo, branch, &collaborator.id, window, self.page_size)
                .await?;

            let cleaned = clean_commits(history, &mut seen_hashes, window)?;

            count += cleaned.count;
            merge_credits(&mut credits, extract_credits(&cleaned.commits));
        }

        Ok((count, credits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collaborator(login: &str, email: &str) -> Collaborator {
        Collaborator {
            id: format!("id-{login}"),
            login: login.to_owned(),
            email: email.to_owned(),
        }
    }

    #[test]
    fn email_logins_prefers_configured_entries() {
        let activity = WeekActivity {
            direct: TallyTable::new(),
            co_authored: TallyTable::new(),
            collaborators: vec![collaborator("ada", "Ada@Example.com"), collaborator("ghost", "")],
        };

        let mut configured = HashMap::new();
        let _ = configured.insert("ada@example.com".to_owned(), "countess".to_owned());

        let map = activity.email_logins(&configured);
        assert_eq!(map.get("ada@example.com").map(String::as_str), Some("countess"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn into_table_folds_co_author_credit_into_logins() {
        let mut direct = TallyTable::new();
        direct.add(Weekday::Mon, "ada", 2);

        let mut co_authored = TallyTable::new();
        co_authored.add(Weekday::Mon, "ada@example.com", 3);
        co_authored.add(Weekday::Mon, "stranger@elsewhere.com", 1);

        let activity = WeekActivity {
            direct,
            co_authored,
            collaborators: vec![collaborator("ada", "ada@example.com")],
        };

        let table = activity.into_table(&HashMap::new());
        assert_eq!(table.count(Weekday::Mon, "ada"), 5);
        assert_eq!(table.count(Weekday::Mon, "stranger@elsewhere.com"), 1);
    }
}

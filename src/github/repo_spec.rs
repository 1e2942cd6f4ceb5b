use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;
use url::Url;

/// Identity of the repository being tallied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Box<str>,
    repo: Box<str>,
}

impl RepoSpec {
    /// Parse a repository reference, either `owner/name` or a full GitHub URL.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.contains("://") {
            return Self::parse_url(spec);
        }

        let mut segments = spec.split('/');
        let (Some(owner), Some(repo), None) = (segments.next(), segments.next(), segments.next()) else {
            bail!("invalid repository reference '{spec}': expected OWNER/NAME");
        };

        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository reference '{spec}': empty owner or repo name");
        }

        Ok(Self {
            owner: Box::from(owner),
            repo: Box::from(repo),
        })
    }

    fn parse_url(spec: &str) -> Result<Self> {
        let url = Url::parse(spec)?;

        if url.host_str() != Some("github.com") {
            bail!("not a GitHub URL: {url}");
        }

        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {url}");
        }

        if path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL: empty owner or repo name: {url}");
        }

        Ok(Self {
            owner: Box::from(path_segments[0]),
            repo: Box::from(path_segments[1].trim_end_matches(".git")),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

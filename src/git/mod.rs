//! Git integration module.
//!
//! Reads recent commit history for review reports. With the `git` feature the
//! history comes from libgit2; without it the `git` binary is asked instead.
//! Any failure (not a repository, empty history, missing binary) yields an
//! empty list.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One-line summary of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Abbreviated commit id
    pub hash: String,

    /// Author date, `YYYY-MM-DD`
    pub date: String,

    /// First line of the commit message
    pub message: String,
}

/// Length of the abbreviated commit ids shown in reports.
pub const SHORT_HASH_LEN: usize = 7;

/// The most recent `limit` commits reachable from HEAD, newest first.
pub fn recent_commits(path: &Path, limit: usize) -> Vec<CommitInfo> {
    if limit == 0 {
        return Vec::new();
    }

    match read_history(path, limit) {
        Ok(commits) => commits,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Commit history unavailable");
            Vec::new()
        }
    }
}

#[cfg(feature = "git")]
fn read_history(path: &Path, limit: usize) -> anyhow::Result<Vec<CommitInfo>> {
    let repo = GitRepository::discover(path)
        .ok_or_else(|| anyhow::anyhow!("not a git repository"))?;
    repo.recent_commits(limit)
}

#[cfg(not(feature = "git"))]
fn read_history(path: &Path, limit: usize) -> anyhow::Result<Vec<CommitInfo>> {
    let output = std::process::Command::new("git")
        .arg("log")
        .arg(format!("-{limit}"))
        .arg("--pretty=format:%h|%ad|%s")
        .arg("--date=short")
        .current_dir(path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!("git log exited with {}", output.status);
    }

    Ok(parse_log_lines(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `git log --pretty=format:%h|%ad|%s` output.
pub fn parse_log_lines(stdout: &str) -> Vec<CommitInfo> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.splitn(3, '|');
            let hash = parts.next().unwrap_or_default().to_string();
            let date = parts.next().unwrap_or_default().to_string();
            let message = parts.next().unwrap_or_default().to_string();
            CommitInfo { hash, date, message }
        })
        .collect()
}

#[cfg(feature = "git")]
pub use repository::GitRepository;

#[cfg(feature = "git")]
mod repository {
    use std::path::Path;

    use chrono::{DateTime, FixedOffset};
    use git2::{Repository, Sort};

    use super::{CommitInfo, SHORT_HASH_LEN};

    /// Git repository wrapper with high-level operations.
    pub struct GitRepository {
        repo: Repository,
    }

    impl GitRepository {
        /// Open a Git repository from the given path.
        ///
        /// This will search up the directory tree to find a Git repository.
        #[must_use]
        pub fn discover(path: impl AsRef<Path>) -> Option<Self> {
            Repository::discover(path.as_ref()).ok().map(|repo| Self { repo })
        }

        /// Walk history from HEAD, newest first.
        pub fn recent_commits(&self, limit: usize) -> anyhow::Result<Vec<CommitInfo>> {
            let mut revwalk = self.repo.revwalk()?;
            revwalk.push_head()?;
            revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

            let mut commits = Vec::with_capacity(limit);
            for oid in revwalk.take(limit) {
                let commit = self.repo.find_commit(oid?)?;
                let mut hash = commit.id().to_string();
                hash.truncate(SHORT_HASH_LEN);

                commits.push(CommitInfo {
                    hash,
                    date: short_date(&commit.author().when()),
                    message: commit.summary().unwrap_or_default().to_string(),
                });
            }

            Ok(commits)
        }
    }

    /// `YYYY-MM-DD` in the author's own timezone, like `git log --date=short`.
    fn short_date(time: &git2::Time) -> String {
        let Some(utc) = DateTime::from_timestamp(time.seconds(), 0) else {
            return String::new();
        };
        match FixedOffset::east_opt(time.offset_minutes() * 60) {
            Some(offset) => utc.with_timezone(&offset).format("%Y-%m-%d").to_string(),
            None => utc.format("%Y-%m-%d").to_string(),
        }
    }

}

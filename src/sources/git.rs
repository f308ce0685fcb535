//! Git collaborator: supplies diff text and changed-file lists for a
//! revision pair.

use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git {operation} failed: {message}")]
    Git { message: String, operation: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a git repository")]
    NotARepo,
}

/// A local git repository checkout of the game source.
#[derive(Debug)]
pub struct GitSource {
    repo_path: PathBuf,
    git_program: PathBuf,
}

impl GitSource {
    pub fn new(repo_path: PathBuf) -> Result<Self, GitError> {
        if !repo_path.join(".git").exists() {
            return Err(GitError::NotARepo);
        }
        Ok(Self {
            repo_path,
            git_program: PathBuf::from("git"),
        })
    }

    /// Override the git executable instead of resolving `git` from PATH.
    pub fn with_git_program(mut self, program: PathBuf) -> Self {
        self.git_program = program;
        self
    }

    /// Raw unified diff between two revisions with zero context lines.
    ///
    /// Zero context keeps hunk line numbers directly mappable to changed
    /// post-change lines.
    pub fn diff_zero_context(&self, commit_a: &str, commit_b: &str) -> Result<String, GitError> {
        self.run_git(&["diff", "--unified=0", commit_a, commit_b], "diff")
    }

    /// Distinct, sorted list of file paths changed between two revisions.
    pub fn changed_files(&self, commit_a: &str, commit_b: &str) -> Result<Vec<String>, GitError> {
        let output = self.run_git(
            &["diff", "--name-only", commit_a, commit_b],
            "diff --name-only",
        )?;

        let mut files: Vec<String> = output
            .split(['\n', '\r'])
            .filter(|line| !line.is_empty())
            .map(std::borrow::ToOwned::to_owned)
            .collect();
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        let output = Command::new(&self.git_program)
            .args(args)
            .current_dir(&self.repo_path)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(GitError::Git {
                message: String::from_utf8_lossy(&output.stderr).to_string(),
                operation: operation.to_owned(),
            })
        }
    }
}

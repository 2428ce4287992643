//! Actions a planned step asks the executor to perform

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unit of work produced by planning a build step
///
/// Planning never performs the action; an executor outside this crate does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Download a file from URL
    Download { url: String, dest: PathBuf },

    /// Clone a git repository and check out a commit
    GitCheckout {
        url: String,
        commit: String,
        dest: PathBuf,
    },

    /// Copy a directory tree
    CopyTree { src: PathBuf, dest: PathBuf },

    /// Unpack an archive, dropping leading path components
    Unpack {
        archive: PathBuf,
        dest: PathBuf,
        strip_components: u32,
    },

    /// Run a program with arguments
    Command {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
    },

    /// Run a shell snippet
    Shell { script: String, cwd: PathBuf },
}

impl StepAction {
    /// Build a `Command` action from string-like arguments
    pub fn command<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }
}

use std::{io, path::PathBuf, process::ExitStatus};

/// A boxed error from a lower layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while generating or launching a demo app.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The external executable could not be found in the execution environment.
    #[error("'{tool}' command not found. Make sure it's installed and in your PATH")]
    ToolNotFound {
        /// Name of the executable that was looked up.
        tool: String,
    },
    /// The external executable ran but did not exit successfully.
    #[error("'{tool}' exited unsuccessfully ({status})")]
    ToolFailure {
        /// Command line that was executed.
        tool: String,
        /// The exit status reported by the operating system.
        status: ExitStatus,
    },
    /// A compiled program file is missing.
    #[error("missing artifact {}: {hint}", path.display())]
    MissingArtifact {
        /// The path at which the artifact was expected.
        path: PathBuf,
        /// What to run to regenerate the artifact.
        hint: String,
    },
    /// A fixture document could not be read or parsed.
    #[error("could not read fixture {}", path.display())]
    MalformedFixture {
        /// The fixture file.
        path: PathBuf,
        /// The underlying parse or read error.
        source: BoxError,
    },
    /// A generated wrapper was edited after it was generated.
    #[error(
        "{} was modified outside of this tool, refusing to overwrite it (use --force to overwrite anyway)",
        path.display()
    )]
    WrapperModified {
        /// The wrapper file that would have been overwritten.
        path: PathBuf,
    },
    /// The requested program does not exist in the programs directory.
    #[error("no program named '{program}' in {}", dir.display())]
    UnknownProgram {
        /// The requested program name.
        program: String,
        /// The programs directory that was searched.
        dir: PathBuf,
    },
    /// The requested fixture does not exist or belongs to another program.
    #[error("no fixture '{fixture}' for program '{program}'")]
    UnknownFixture {
        /// The requested fixture file name.
        fixture: String,
        /// The program the fixture was requested for.
        program: String,
    },
    /// The programs directory does not contain any program.
    #[error("no programs found in {}", dir.display())]
    NoPrograms {
        /// The programs directory that was searched.
        dir: PathBuf,
    },
    /// The interactive selection was aborted before an answer was given.
    #[error("selection aborted")]
    SelectionAborted,
    /// The answer to an interactive question could not be read.
    #[error("could not read the answer from the terminal")]
    Prompt(#[source] io::Error),
    /// A command line for an external tool was empty.
    #[error("invalid {what} command: '{command}'")]
    InvalidCommand {
        /// Which tool the command was meant for.
        what: &'static str,
        /// The command line that was rejected.
        command: String,
    },
    /// The layout configuration file is invalid.
    #[error("'{}' has an invalid format", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },
    /// A filesystem operation failed.
    #[error("I/O error on {}", path.display())]
    Io {
        /// The path the operation was performed on.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

//! Running external command line tools.
use std::{
    ffi::OsStr,
    fmt, io,
    path::Path,
    process::{Command, ExitStatus},
};

use tracing::debug;

use crate::Error;

/// An external executable together with the arguments it is always called with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    program: String,
    args: Vec<String>,
}

impl Tool {
    /// Creates a tool from an executable and its leading arguments.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a whitespace separated command line such as `python3 -m streamlit run`.
    pub fn parse(what: &'static str, command: &str) -> Result<Self, Error> {
        let mut words = command.split_whitespace();
        let Some(program) = words.next() else {
            return Err(Error::InvalidCommand {
                what,
                command: command.to_string(),
            });
        };
        Ok(Self::new(program, words))
    }

    /// The executable that is spawned.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the tool with `extra_args` appended and waits for it to exit.
    ///
    /// Standard streams are inherited. A missing executable is reported as
    /// [`Error::ToolNotFound`], an unsuccessful exit as [`Error::ToolFailure`].
    pub fn run<I, S>(&self, extra_args: I, cwd: Option<&Path>) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra_args);
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        debug!(?cmd, "spawning");
        let status = match cmd.status() {
            Ok(status) => status,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ToolNotFound {
                    tool: self.program.clone(),
                });
            }
            Err(err) => return Err(Error::io(&self.program)(err)),
        };
        check_status(self, status)
    }
}

fn check_status(tool: &Tool, status: ExitStatus) -> Result<(), Error> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::ToolFailure {
            tool: tool.to_string(),
            status,
        })
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

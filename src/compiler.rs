//! Invocation of the external `nada` compiler.
use std::path::Path;

use tracing::info;

use crate::{Error, tool::Tool};

/// Flag asking the compiler to also emit the JSON representation of a program.
pub const MIR_JSON_FLAG: &str = "--mir-json";

/// The external Nada compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    tool: Tool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            tool: Tool::new("nada", Vec::<String>::new()),
        }
    }
}

impl Compiler {
    /// Uses `tool` instead of the `nada` executable on the `PATH`.
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    /// The command that builds `program`, as shown to users.
    pub fn build_command(&self, program: &str) -> String {
        format!("{} build {program} {MIR_JSON_FLAG}", self.tool)
    }

    /// Builds `program` from within `project_root`.
    ///
    /// The compiler is invoked exactly once; the outcome is derived from its exit status.
    #[tracing::instrument(skip(self, project_root))]
    pub fn build(&self, program: &str, project_root: &Path) -> Result<(), Error> {
        self.tool.run(["build", program, MIR_JSON_FLAG], Some(project_root))?;
        info!("Successfully built {program}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_command_requests_json() {
        assert_eq!(
            Compiler::default().build_command("addition"),
            "nada build addition --mir-json"
        );
    }

    #[cfg(unix)]
    #[test]
    fn build_passes_program_and_flag() {
        let dir = tempfile::tempdir().unwrap();
        // records its arguments in the working directory
        let compiler = Compiler::new(Tool::new("sh", ["-c", r#"echo "$@" > args.txt"#, "nada"]));
        compiler.build("addition", dir.path()).unwrap();
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), "build addition --mir-json");
    }
}

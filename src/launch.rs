//! Launching a generated app with the external web app runner.
use std::path::Path;

use tracing::info;

use crate::{Error, tool::Tool};

/// The external web app runner that serves a generated wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    tool: Tool,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            tool: Tool::new("python3", ["-m", "streamlit", "run"]),
        }
    }
}

impl Runner {
    /// Uses `tool` instead of `python3 -m streamlit run`.
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    /// Runs the app at `wrapper` until the runner exits.
    #[tracing::instrument(skip(self))]
    pub fn launch(&self, wrapper: &Path) -> Result<(), Error> {
        info!("Attempting to run Streamlit app: {}", wrapper.display());
        self.tool.run([wrapper], None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn launch_appends_wrapper_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("launched.txt");
        let script = format!(r#"echo "$1" > '{}'"#, out.display());
        let runner = Runner::new(Tool::new("sh", ["-c", script.as_str(), "runner"]));

        let wrapper = dir.path().join("app_addition.py");
        runner.launch(&wrapper).unwrap();
        let launched = std::fs::read_to_string(out).unwrap();
        assert_eq!(launched.trim(), wrapper.display().to_string());
    }

    #[test]
    fn missing_runner_is_reported() {
        let runner = Runner::new(Tool::new("nada-demo-gen-no-such-runner", ["run"]));
        let err = runner.launch(Path::new("app_addition.py")).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }), "{err:?}");
    }
}

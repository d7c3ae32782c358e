use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Name of the directory below the apps directory that receives compiled programs.
///
/// The generated wrappers look up their artifacts relative to their own location, so this
/// is fixed rather than configurable.
pub const COMPILED_DIR_NAME: &str = "compiled_nada_programs";

/// Where programs, fixtures, compiler output and generated apps live.
///
/// Relative paths are resolved against [`Layout::project_root`]. A layout can be read from
/// a JSON file with [`Layout::from_file`]; missing keys fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Root of the Nada project; the compiler is run from here.
    pub project_root: PathBuf,
    /// Directory with one script per program.
    pub programs_dir: PathBuf,
    /// File extension of program scripts, without the leading dot.
    pub program_ext: String,
    /// Directory with the YAML test fixtures.
    pub fixtures_dir: PathBuf,
    /// Directory the compiler writes its artifacts to.
    pub compiler_output_dir: PathBuf,
    /// Directory that receives the generated wrapper apps.
    pub apps_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            programs_dir: PathBuf::from("src"),
            program_ext: "py".to_string(),
            fixtures_dir: PathBuf::from("tests"),
            compiler_output_dir: PathBuf::from("target"),
            apps_dir: PathBuf::from("streamlit_demo_apps"),
        }
    }
}

impl Layout {
    /// Default layout rooted at `project_root`.
    pub fn with_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Reads a layout from a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let config = fs::read_to_string(path).map_err(Error::io(path))?;
        serde_json::from_str(&config).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Resolved directory with the program scripts.
    pub fn programs_dir(&self) -> PathBuf {
        self.resolve(&self.programs_dir)
    }

    /// Resolved directory with the test fixtures.
    pub fn fixtures_dir(&self) -> PathBuf {
        self.resolve(&self.fixtures_dir)
    }

    /// Resolved compiler output directory.
    pub fn compiler_output_dir(&self) -> PathBuf {
        self.resolve(&self.compiler_output_dir)
    }

    /// Resolved directory for the generated apps.
    pub fn apps_dir(&self) -> PathBuf {
        self.resolve(&self.apps_dir)
    }

    /// The directory the wrappers load their compiled programs from.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.apps_dir().join(COMPILED_DIR_NAME)
    }
}

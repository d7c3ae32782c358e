//! YAML test fixtures and their association with programs.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_yaml::Value;
use tracing::{debug, warn};

use crate::{BoxError, Error};

/// File extension of fixture documents.
pub const FIXTURE_EXT: &str = "yaml";

/// A parsed test fixture.
///
/// Fixtures seed a demo app with example inputs. The only key this crate interprets is
/// `program`, which associates the fixture with a program by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// Location of the fixture document.
    pub path: PathBuf,
    /// The parsed YAML document.
    pub document: Value,
}

impl Fixture {
    /// Reads and parses the fixture at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let malformed = |source: BoxError| Error::MalformedFixture {
            path: path.to_path_buf(),
            source,
        };
        let contents = fs::read_to_string(path).map_err(|e| malformed(e.into()))?;
        let document = if contents.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&contents).map_err(|e| malformed(e.into()))?
        };
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// The file name of the fixture, e.g. `addition_test.yaml`.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// The fixture name passed to the demo app, i.e. the file name without extension.
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// The program this fixture belongs to.
    ///
    /// Only a string `program` key of a mapping document counts.
    pub fn program(&self) -> Option<&str> {
        self.document.get("program").and_then(Value::as_str)
    }

    /// Renders the document back to YAML for display.
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(&self.document).unwrap_or_else(|err| format!("<{err}>\n"))
    }
}

/// Reads every fixture in `dir`, in directory enumeration order.
///
/// Fixtures that cannot be read or parsed are skipped with a warning. A missing directory
/// has no fixtures.
pub fn scan_fixtures(dir: &Path) -> Result<Vec<Fixture>, Error> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("fixtures directory {} does not exist", dir.display());
            return Ok(vec![]);
        }
        Err(err) => return Err(Error::io(dir)(err)),
    };
    let mut fixtures = vec![];
    for entry in entries {
        let path = entry.map_err(Error::io(dir))?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != FIXTURE_EXT) {
            continue;
        }
        match Fixture::load(&path) {
            Ok(fixture) => fixtures.push(fixture),
            Err(err) => {
                let cause = match &err {
                    Error::MalformedFixture { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                warn!("{err}: {cause}. Skipping.");
            }
        }
    }
    Ok(fixtures)
}

/// Returns the fixtures in `dir` whose `program` key equals `program`.
pub fn fixtures_for(dir: &Path, program: &str) -> Result<Vec<Fixture>, Error> {
    let fixtures = scan_fixtures(dir)?;
    Ok(fixtures
        .into_iter()
        .filter(|fixture| fixture.program() == Some(program))
        .collect())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn names(fixtures: &[Fixture]) -> Vec<&str> {
        let mut names: Vec<_> = fixtures.iter().map(Fixture::file_name).collect();
        names.sort();
        names
    }

    #[test]
    fn filters_by_program_key() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "addition_test.yaml", "program: addition\ninputs:\n  x: 3\n");
        write(dir.path(), "addition_big.yaml", "program: addition\n");
        write(dir.path(), "gte_test.yaml", "program: comparison_gte\n");
        write(dir.path(), "notes.txt", "program: addition\n");

        let addition = fixtures_for(dir.path(), "addition").unwrap();
        assert_eq!(names(&addition), vec!["addition_big.yaml", "addition_test.yaml"]);
        let gte = fixtures_for(dir.path(), "comparison_gte").unwrap();
        assert_eq!(names(&gte), vec!["gte_test.yaml"]);
        assert!(fixtures_for(dir.path(), "multiplication").unwrap().is_empty());
    }

    #[test]
    fn fixtures_without_program_key_never_match() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty.yaml", "");
        write(dir.path(), "inputs_only.yaml", "inputs:\n  x: 1\n");
        write(dir.path(), "list.yaml", "- program\n- addition\n");
        write(dir.path(), "number.yaml", "program: 42\n");

        assert_eq!(scan_fixtures(dir.path()).unwrap().len(), 4);
        for program in ["addition", "program", "42", ""] {
            assert!(fixtures_for(dir.path(), program).unwrap().is_empty());
        }
    }

    #[test]
    fn malformed_fixtures_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.yaml", "program: [addition\n");
        write(dir.path(), "addition_test.yaml", "program: addition\n");

        let fixtures = fixtures_for(dir.path(), "addition").unwrap();
        assert_eq!(names(&fixtures), vec!["addition_test.yaml"]);

        let err = Fixture::load(&dir.path().join("broken.yaml")).unwrap_err();
        assert!(matches!(err, Error::MalformedFixture { .. }), "{err:?}");
    }

    #[test]
    fn missing_dir_has_no_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        assert!(fixtures_for(&dir.path().join("tests"), "addition").unwrap().is_empty());
    }

    #[test]
    fn fixture_names() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "addition_test.yaml", "program: addition\n");
        let fixture = Fixture::load(&dir.path().join("addition_test.yaml")).unwrap();
        assert_eq!(fixture.file_name(), "addition_test.yaml");
        assert_eq!(fixture.name(), "addition_test");
        assert_eq!(fixture.program(), Some("addition"));
        assert!(fixture.to_yaml().contains("program: addition"));
    }

    proptest! {
        #[test]
        fn only_the_declared_program_matches(
            declared in "[a-z][a-z0-9_]{0,12}",
            other in "[a-z][a-z0-9_]{0,12}",
        ) {
            let dir = tempfile::tempdir().unwrap();
            write(dir.path(), "fixture.yaml", &format!("program: \"{declared}\"\n"));

            prop_assert_eq!(fixtures_for(dir.path(), &declared).unwrap().len(), 1);
            if other != declared {
                prop_assert!(fixtures_for(dir.path(), &other).unwrap().is_empty());
            }
        }
    }
}

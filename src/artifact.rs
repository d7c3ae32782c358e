//! Copying and checking the files the compiler produces for a program.
use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::Error;

/// The two files the compiler produces for every program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The compiled program, `<name>.nada.bin`.
    Binary,
    /// The JSON representation of the program, `<name>.nada.json`.
    Json,
}

impl ArtifactKind {
    /// All artifact kinds, in the order they are copied.
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Json, ArtifactKind::Binary];

    /// The file extension including the leading dot.
    pub fn ext(self) -> &'static str {
        match self {
            ArtifactKind::Binary => ".nada.bin",
            ArtifactKind::Json => ".nada.json",
        }
    }

    /// The file name of this artifact for `program`.
    pub fn file_name(self, program: &str) -> String {
        format!("{program}{}", self.ext())
    }
}

/// Result of [`copy_artifacts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths of the files that were copied.
    pub copied: Vec<PathBuf>,
    /// Source paths that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Copies the artifacts of `program` from the compiler output dir into `to_dir`.
///
/// Each artifact is copied on its own: a missing source is logged and recorded in the
/// report, but does not stop the other artifact from being copied.
#[tracing::instrument(skip(from_dir, to_dir))]
pub fn copy_artifacts(program: &str, from_dir: &Path, to_dir: &Path) -> Result<CopyReport, Error> {
    fs::create_dir_all(to_dir).map_err(Error::io(to_dir))?;
    let mut report = CopyReport::default();
    for kind in ArtifactKind::ALL {
        let source = from_dir.join(kind.file_name(program));
        let dest = to_dir.join(kind.file_name(program));
        if !source.is_file() {
            warn!("{} not found", source.display());
            report.missing.push(source);
            continue;
        }
        fs::copy(&source, &dest).map_err(Error::io(&dest))?;
        info!("Copied {} to {}", source.display(), dest.display());
        report.copied.push(dest);
    }
    Ok(report)
}

/// Paths of both artifacts of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The compiled program.
    pub binary: PathBuf,
    /// The JSON representation.
    pub json: PathBuf,
}

/// Checks that both artifacts of `program` are present in `dir`.
///
/// `build_command` is the command that regenerates the artifacts; it is part of the
/// [`Error::MissingArtifact`] returned for the first absent file.
pub fn verify_artifacts(
    program: &str,
    dir: &Path,
    build_command: &str,
) -> Result<ArtifactPaths, Error> {
    let path_of = |kind: ArtifactKind| -> Result<PathBuf, Error> {
        let path = dir.join(kind.file_name(program));
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::MissingArtifact {
                hint: format!(
                    "run `{build_command}` and add `{}` to {}",
                    kind.file_name(program),
                    dir.display()
                ),
                path,
            })
        }
    };
    Ok(ArtifactPaths {
        binary: path_of(ArtifactKind::Binary)?,
        json: path_of(ArtifactKind::Json)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_both_artifacts() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        let to = to.path().join("apps/compiled_nada_programs");
        fs::write(from.path().join("addition.nada.bin"), [0, 1, 2]).unwrap();
        fs::write(from.path().join("addition.nada.json"), "{}").unwrap();

        let report = copy_artifacts("addition", from.path(), &to).unwrap();
        assert!(report.missing.is_empty());
        assert_eq!(report.copied.len(), 2);
        assert_eq!(fs::read(to.join("addition.nada.bin")).unwrap(), vec![0, 1, 2]);
        assert_eq!(fs::read_to_string(to.join("addition.nada.json")).unwrap(), "{}");
    }

    #[test]
    fn missing_sources_only_warn() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();

        let report = copy_artifacts("addition", from.path(), to.path()).unwrap();
        assert!(report.copied.is_empty());
        assert_eq!(report.missing.len(), 2);

        fs::write(from.path().join("addition.nada.bin"), [7]).unwrap();
        let report = copy_artifacts("addition", from.path(), to.path()).unwrap();
        assert_eq!(report.copied, vec![to.path().join("addition.nada.bin")]);
        assert_eq!(report.missing, vec![from.path().join("addition.nada.json")]);
    }

    #[test]
    fn verify_names_the_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("addition.nada.bin"), [7]).unwrap();

        let err = verify_artifacts("addition", dir.path(), "nada build addition --mir-json")
            .unwrap_err();
        match err {
            Error::MissingArtifact { path, hint } => {
                assert_eq!(path, dir.path().join("addition.nada.json"));
                assert!(hint.contains("nada build addition --mir-json"), "{hint}");
            }
            other => panic!("unexpected error {other:?}"),
        }

        fs::write(dir.path().join("addition.nada.json"), "{}").unwrap();
        let paths = verify_artifacts("addition", dir.path(), "").unwrap();
        assert_eq!(paths.binary, dir.path().join("addition.nada.bin"));
        assert_eq!(paths.json, dir.path().join("addition.nada.json"));
    }
}

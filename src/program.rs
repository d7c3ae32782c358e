//! Discovery of the programs of a Nada project.
use std::{fs, io, path::Path};

use tracing::debug;

use crate::Error;

/// Lists the names of all programs in `dir`.
///
/// A program is a regular file with the extension `ext` directly inside `dir`; its name is
/// the file stem. The names are returned sorted. A missing directory has no programs.
pub fn list_programs(dir: &Path, ext: &str) -> Result<Vec<String>, Error> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("programs directory {} does not exist", dir.display());
            return Ok(vec![]);
        }
        Err(err) => return Err(Error::io(dir)(err)),
    };
    let mut programs = vec![];
    for entry in entries {
        let path = entry.map_err(Error::io(dir))?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != ext) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            programs.push(stem.to_string());
        }
    }
    programs.sort();
    programs.dedup();
    Ok(programs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn programs_are_sorted_stems() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["comparison_gte.py", "addition.py", "README.md", "helper.pyc"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.py")).unwrap();

        let programs = list_programs(dir.path(), "py").unwrap();
        assert_eq!(programs, vec!["addition", "comparison_gte"]);
    }

    #[test]
    fn missing_dir_has_no_programs() {
        let dir = tempfile::tempdir().unwrap();
        let programs = list_programs(&dir.path().join("src"), "py").unwrap();
        assert!(programs.is_empty());
    }
}

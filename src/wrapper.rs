//! Rendering of the generated Streamlit wrapper apps.
//!
//! A wrapper is a small Python script that forwards a compiled program and the name of its
//! fixture to the shared `streamlit_app` display routine. Every wrapper starts with a
//! banner and a checksum of the rendered body, which is used to detect wrappers that were
//! edited by hand before they are regenerated.
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{COMPILED_DIR_NAME, Error, compiler::MIR_JSON_FLAG};

const BANNER: &str = "# This file was automatically generated by the generate-demo-app tool.\n";
const CHECKSUM_PREFIX: &str = "# checksum: ";

/// The file name of the wrapper for `program`.
pub fn wrapper_file_name(program: &str) -> String {
    format!("app_{program}.py")
}

/// The path of the wrapper for `program` inside `apps_dir`.
pub fn wrapper_path(apps_dir: &Path, program: &str) -> PathBuf {
    apps_dir.join(wrapper_file_name(program))
}

/// Quotes `value` as a Python string literal that evaluates to exactly `value`.
fn py_str_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

fn render_body(program_name: &str, program_test_name: &str) -> String {
    let program_literal = py_str_literal(program_name);
    let test_literal = py_str_literal(program_test_name);
    format!(
        r#"
import sys
import os

sys.path.insert(0, os.path.abspath(os.path.join(os.path.dirname(__file__), '..')))
import streamlit_app

program_name = {program_literal}
program_test_name = {test_literal}

def main():
    current_dir = os.path.dirname(os.path.abspath(__file__))
    path_nada_bin = os.path.join(current_dir, "{COMPILED_DIR_NAME}", f"{{program_name}}.nada.bin")
    path_nada_json = os.path.join(current_dir, "{COMPILED_DIR_NAME}", f"{{program_name}}.nada.json")

    if not os.path.exists(path_nada_bin):
        raise FileNotFoundError(f"Run `nada build {{program_name}} {MIR_JSON_FLAG}` and add `{{program_name}}.nada.bin` to the {COMPILED_DIR_NAME} folder.")
    if not os.path.exists(path_nada_json):
        raise FileNotFoundError(f"Run `nada build {{program_name}} {MIR_JSON_FLAG}` and add `{{program_name}}.nada.json` to the {COMPILED_DIR_NAME} folder.")

    streamlit_app.main(program_test_name, path_nada_bin, path_nada_json)

if __name__ == "__main__":
    main()
"#
    )
}

fn checksum(body: &str) -> String {
    blake3::hash(body.as_bytes()).to_string()
}

/// Renders the wrapper for `program_name`, seeded with the fixture `program_test_name`.
///
/// `program_test_name` is empty if the program has no fixture.
pub fn render(program_name: &str, program_test_name: &str) -> String {
    let body = render_body(program_name, program_test_name);
    format!("{BANNER}{CHECKSUM_PREFIX}{}\n{body}", checksum(&body))
}

/// Whether `contents` is a generated wrapper that has not been edited since.
pub fn is_untouched(contents: &str) -> bool {
    let Some(rest) = contents.strip_prefix(BANNER) else {
        return false;
    };
    let Some((checksum_line, body)) = rest.split_once('\n') else {
        return false;
    };
    checksum_line
        .strip_prefix(CHECKSUM_PREFIX)
        .is_some_and(|expected| expected == checksum(body))
}

/// Renders and writes the wrapper for `program` into `apps_dir`, returning its path.
///
/// Parent directories are created as needed. The file is written to a temporary file next
/// to the target and then renamed into place, so readers never observe a partially written
/// wrapper. An existing wrapper that was changed after it was generated is only replaced if
/// `overwrite` is set, otherwise [`Error::WrapperModified`] is returned.
#[tracing::instrument(skip(apps_dir))]
pub fn write_wrapper(
    apps_dir: &Path,
    program: &str,
    program_test_name: &str,
    overwrite: bool,
) -> Result<PathBuf, Error> {
    let path = wrapper_path(apps_dir, program);
    info!("Attempting to create file at: {}", path.display());
    fs::create_dir_all(apps_dir).map_err(Error::io(apps_dir))?;
    if !overwrite && path.exists() {
        let existing = fs::read_to_string(&path).map_err(Error::io(&path))?;
        if !is_untouched(&existing) {
            return Err(Error::WrapperModified { path });
        }
    }
    let contents = render(program, program_test_name);
    let mut tmp = NamedTempFile::new_in(apps_dir).map_err(Error::io(apps_dir))?;
    tmp.write_all(contents.as_bytes()).map_err(Error::io(tmp.path()))?;
    // temp files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(Error::io(tmp.path()))?;
    }
    tmp.persist(&path).map_err(|err| Error::io(&path)(err.error))?;
    info!("Created Streamlit app file: {}", path.display());
    Ok(path)
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// The program shipped with every [`TestProject`] created by [`TestProject::with_addition`].
pub const ADDITION_PROGRAM: &str = r#"from nada_dsl import *

def nada_main():
    party1 = Party(name="Party1")
    my_int1 = SecretInteger(Input(name="my_int1", party=party1))
    my_int2 = SecretInteger(Input(name="my_int2", party=party1))
    new_int = my_int1 + my_int2
    return [Output(new_int, "my_output", party1)]
"#;

/// The fixture shipped with every [`TestProject`] created by [`TestProject::with_addition`].
pub const ADDITION_FIXTURE: &str = r#"---
program: addition
inputs:
  my_int1: 32
  my_int2: 81
expected_outputs:
  my_output: 113
"#;

/// How the fake `nada` compiler of a [`TestProject`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeCompiler {
    /// Writes both artifacts to `target/` and exits successfully.
    Succeed,
    /// Writes only the `.nada.bin` artifact and exits successfully.
    OnlyBinary,
    /// Writes nothing and exits successfully.
    NoOutput,
    /// Writes nothing and exits with the given code.
    Fail(i32),
}

/// A shell script standing in for an external tool.
///
/// The script is run through `sh`, so it does not need to be executable.
#[derive(Debug, Clone)]
pub struct FakeTool {
    script: PathBuf,
}

impl FakeTool {
    /// Executable and arguments to invoke the script with.
    pub fn args(&self) -> [String; 2] {
        ["sh".to_string(), self.script.display().to_string()]
    }

    /// The invocation as a single command line.
    pub fn command_line(&self) -> String {
        self.args().join(" ")
    }
}

/// A Nada project in a temporary directory, deleted on drop.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// An empty project with `src/` and `tests/` directories.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create project dir");
        fs::create_dir(dir.path().join("src")).expect("create src dir");
        fs::create_dir(dir.path().join("tests")).expect("create tests dir");
        Self { dir }
    }

    /// A project with the `addition` program and its `addition_test.yaml` fixture.
    pub fn with_addition() -> Self {
        let project = Self::new();
        project.add_program("addition", ADDITION_PROGRAM);
        project.add_fixture("addition_test.yaml", ADDITION_FIXTURE);
        project
    }

    /// Root directory of the project.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path relative to the project root.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root().join(rel)
    }

    /// Adds `src/<name>.py`.
    pub fn add_program(&self, name: &str, source: &str) {
        fs::write(self.path(format!("src/{name}.py")), source).expect("write program");
    }

    /// Adds `tests/<file_name>`.
    pub fn add_fixture(&self, file_name: &str, contents: &str) {
        fs::write(self.path("tests").join(file_name), contents).expect("write fixture");
    }

    /// Installs a fake compiler that logs its arguments to `compiler.log`.
    pub fn fake_compiler(&self, behaviour: FakeCompiler) -> FakeTool {
        let outputs = match behaviour {
            FakeCompiler::Succeed => {
                "printf 'bin' > \"target/$2.nada.bin\"\nprintf '{}' > \"target/$2.nada.json\"\n"
            }
            FakeCompiler::OnlyBinary => "printf 'bin' > \"target/$2.nada.bin\"\n",
            FakeCompiler::NoOutput | FakeCompiler::Fail(_) => "",
        };
        let exit = match behaviour {
            FakeCompiler::Fail(code) => code,
            _ => 0,
        };
        let script = format!(
            "echo \"$@\" >> compiler.log\nmkdir -p target\n{outputs}exit {exit}\n"
        );
        self.write_tool("nada.sh", &script)
    }

    /// Installs a fake app runner that logs the app path to `runner.log` and exits with
    /// `exit`.
    pub fn fake_runner(&self, exit: i32) -> FakeTool {
        let log = self.path("runner.log");
        let script = format!("echo \"$1\" >> '{}'\nexit {exit}\n", log.display());
        self.write_tool("runner.sh", &script)
    }

    /// Contents of `compiler.log`, if the compiler ran.
    pub fn compiler_log(&self) -> Option<String> {
        fs::read_to_string(self.path("compiler.log")).ok()
    }

    /// Contents of `runner.log`, if the runner ran.
    pub fn runner_log(&self) -> Option<String> {
        fs::read_to_string(self.path("runner.log")).ok()
    }

    fn write_tool(&self, name: &str, script: &str) -> FakeTool {
        let bin = self.path("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        let script_path = bin.join(name);
        fs::write(&script_path, script).expect("write fake tool");
        FakeTool {
            script: script_path,
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

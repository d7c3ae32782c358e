// The module is built separately for each integration test, so if some items
// are only used in one test but not the other, this will result in warnings
#![allow(dead_code)]

use nada_demo_gen::{Layout, Pipeline, compiler::Compiler, launch::Runner, tool::Tool};
use nada_demo_gen_test_utils::project::{FakeCompiler, FakeTool, TestProject};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn tool(fake: &FakeTool) -> Tool {
    let [program, script] = fake.args();
    Tool::new(program, [script])
}

/// A pipeline for `project` using its fake compiler and a runner exiting with `runner_exit`.
pub(crate) fn pipeline(
    project: &TestProject,
    compiler: FakeCompiler,
    runner_exit: i32,
) -> Pipeline {
    init_tracing();
    Pipeline::new(
        Layout::with_root(project.root()),
        Compiler::new(tool(&project.fake_compiler(compiler))),
        Runner::new(tool(&project.fake_runner(runner_exit))),
    )
}

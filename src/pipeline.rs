use std::path::PathBuf;

use tracing::info;

use crate::{
    Error, Layout,
    artifact::{ArtifactPaths, CopyReport, copy_artifacts, verify_artifacts},
    compiler::Compiler,
    launch::Runner,
    select::Selection,
    wrapper::write_wrapper,
};

/// Options for a single [`Pipeline::run`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineOpts {
    /// Whether to launch the generated app once it is written.
    pub launch: bool,
    /// Whether to replace a wrapper even if it was edited by hand.
    pub overwrite: bool,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            launch: true,
            overwrite: false,
        }
    }
}

/// What happened when the generated app was launched.
#[derive(Debug)]
pub enum LaunchStatus {
    /// Launching was disabled.
    Skipped,
    /// The runner exited successfully.
    Finished,
    /// The runner could not be started or failed.
    Failed(Error),
}

/// The result of a successful [`Pipeline::run`].
#[derive(Debug)]
pub struct Outcome {
    /// What the artifact copy step did.
    pub copied: CopyReport,
    /// The artifacts the wrapper will load.
    pub artifacts: ArtifactPaths,
    /// The generated wrapper.
    pub wrapper: PathBuf,
    /// The result of launching the wrapper.
    pub launch: LaunchStatus,
}

/// Builds a program, copies its artifacts, renders its wrapper and launches it.
///
/// The steps run strictly one after the other. A failing build, copy, artifact check or
/// render ends the run; the next run starts over. A failing launch is reported in the
/// [`Outcome`] instead.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    layout: Layout,
    compiler: Compiler,
    runner: Runner,
}

impl Pipeline {
    /// Creates a pipeline for the project described by `layout`.
    pub fn new(layout: Layout, compiler: Compiler, runner: Runner) -> Self {
        Self {
            layout,
            compiler,
            runner,
        }
    }

    /// The project layout this pipeline operates on.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Runs all steps for `selection`.
    pub fn run(&self, selection: &Selection, opts: PipelineOpts) -> Result<Outcome, Error> {
        let program = selection.program.as_str();
        info!("Selected program: {program}");
        if let Some(fixture) = &selection.fixture {
            info!("Selected test file: {}", fixture.file_name());
        }

        self.compiler.build(program, &self.layout.project_root)?;

        let artifacts_dir = self.layout.artifacts_dir();
        let copied = copy_artifacts(program, &self.layout.compiler_output_dir(), &artifacts_dir)?;
        let artifacts = verify_artifacts(
            program,
            &artifacts_dir,
            &self.compiler.build_command(program),
        )?;

        let wrapper = write_wrapper(
            &self.layout.apps_dir(),
            program,
            selection.fixture_name(),
            opts.overwrite,
        )?;

        let launch = if opts.launch {
            match self.runner.launch(&wrapper) {
                Ok(()) => LaunchStatus::Finished,
                Err(err) => LaunchStatus::Failed(err),
            }
        } else {
            info!("Skipping launch of {}", wrapper.display());
            LaunchStatus::Skipped
        };

        Ok(Outcome {
            copied,
            artifacts,
            wrapper,
            launch,
        })
    }
}

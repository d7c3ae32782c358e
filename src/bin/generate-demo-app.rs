//! Generates and launches a Streamlit demo app for a Nada program.
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nada_demo_gen::{
    LaunchStatus, Layout, Pipeline, PipelineOpts,
    compiler::Compiler,
    fixture::scan_fixtures,
    launch::Runner,
    program::list_programs,
    select::{MenuPrompt, resolve},
    tool::Tool,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_COMPILER: &str = "nada";
const DEFAULT_RUNNER: &str = "python3 -m streamlit run";

/// Generates a Streamlit demo app for a Nada program and one of its test fixtures.
///
/// Logging can be controlled with an EnvFilter via the `NADA_DEMO_GEN_LOG` environment
/// variable.
#[derive(Debug, Parser)]
#[command(name = "generate-demo-app", version)]
struct Cli {
    /// JSON file describing the project layout. Missing keys use the defaults.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Root of the Nada project, overrides the config file.
    #[arg(long)]
    project_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all programs together with their test fixtures.
    List,
    /// Build a program, generate its demo app and run it (the default).
    Generate(GenerateArgs),
}

#[derive(Debug, Default, Args)]
struct GenerateArgs {
    /// The program to generate the app for. Asked interactively if missing.
    #[arg(long, short)]
    program: Option<String>,
    /// The test fixture with the starting input values, e.g. `addition_test.yaml`.
    /// Asked interactively if missing and the program has fixtures.
    #[arg(long, short)]
    fixture: Option<String>,
    /// Command line of the Nada compiler.
    #[arg(long, default_value = DEFAULT_COMPILER)]
    compiler: String,
    /// Command line of the app runner; the wrapper path is appended.
    #[arg(long, default_value = DEFAULT_RUNNER)]
    runner: String,
    /// Only generate the app, don't run it.
    #[arg(long)]
    no_launch: bool,
    /// Overwrite the app even if it was edited by hand.
    #[arg(long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing().context("tracing initialization")?;

    let cli = Cli::parse();
    let mut layout = match &cli.config {
        Some(config) => Layout::from_file(config)?,
        None => Layout::default(),
    };
    if let Some(project_root) = cli.project_root {
        layout.project_root = project_root;
    }

    match cli.command {
        Some(Command::List) => list(&layout),
        Some(Command::Generate(args)) => generate(layout, args),
        None => generate(
            layout,
            GenerateArgs {
                compiler: DEFAULT_COMPILER.to_string(),
                runner: DEFAULT_RUNNER.to_string(),
                ..GenerateArgs::default()
            },
        ),
    }
}

fn list(layout: &Layout) -> anyhow::Result<()> {
    let programs = list_programs(&layout.programs_dir(), &layout.program_ext)?;
    if programs.is_empty() {
        println!("No programs found in {}", layout.programs_dir().display());
    }
    let fixtures = scan_fixtures(&layout.fixtures_dir())?;
    for program in programs {
        println!("{program}");
        for fixture in fixtures.iter().filter(|f| f.program() == Some(program.as_str())) {
            println!("    {}", fixture.file_name());
        }
    }
    Ok(())
}

fn generate(layout: Layout, args: GenerateArgs) -> anyhow::Result<()> {
    let compiler = Compiler::new(Tool::parse("compiler", &args.compiler)?);
    let runner = Runner::new(Tool::parse("runner", &args.runner)?);

    let selection = resolve(&layout, args.program, args.fixture, &mut MenuPrompt::stdio())
        .context("no program selected")?;
    if let Some(fixture) = &selection.fixture {
        println!("\nTest file contents:\n{}", fixture.to_yaml());
    }

    let pipeline = Pipeline::new(layout, compiler, runner);
    let opts = PipelineOpts {
        launch: !args.no_launch,
        overwrite: args.force,
    };
    let outcome = pipeline
        .run(&selection, opts)
        .with_context(|| format!("generating the demo app for '{}'", selection.program))?;
    match outcome.launch {
        LaunchStatus::Failed(err) => error!(
            "{} was generated but could not be run: {err}",
            outcome.wrapper.display()
        ),
        LaunchStatus::Finished | LaunchStatus::Skipped => {
            info!("Streamlit app file successfully created at {}", outcome.wrapper.display())
        }
    }
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_env_var("NADA_DEMO_GEN_LOG")
        .try_from_env()
        .or_else(|_| EnvFilter::try_new("nada_demo_gen=info,generate_demo_app=info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    Ok(())
}

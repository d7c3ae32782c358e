//! Choosing the program and fixture to generate a demo app for.
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::info;

use crate::{
    Error, Layout,
    fixture::{Fixture, fixtures_for},
    program::list_programs,
};

/// The program and fixture a demo app is generated for.
///
/// A selection is resolved once, before any pipeline step runs, and is not changed
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Name of the selected program.
    pub program: String,
    /// The fixture used as starting input values, if the program has any.
    pub fixture: Option<Fixture>,
}

impl Selection {
    /// The fixture name passed to the demo app, empty if there is no fixture.
    pub fn fixture_name(&self) -> &str {
        self.fixture.as_ref().map(Fixture::name).unwrap_or_default()
    }
}

/// Asks the user to pick one of several choices.
pub trait Prompt {
    /// Returns the index of the chosen entry of `choices`.
    fn choose(&mut self, question: &str, choices: &[String]) -> Result<usize, Error>;
}

/// A [`Prompt`] showing a numbered menu and reading the answer line by line.
///
/// An answer is either the number of a choice or the choice itself. Invalid answers are
/// asked again, the end of the input aborts the selection.
pub struct MenuPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MenuPrompt<R, W> {
    /// Creates a prompt reading from `input` and writing the menu to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl MenuPrompt<StdinLock<'static>, Stdout> {
    /// A prompt on the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for MenuPrompt<R, W> {
    fn choose(&mut self, question: &str, choices: &[String]) -> Result<usize, Error> {
        if choices.is_empty() {
            return Err(Error::SelectionAborted);
        }
        writeln!(self.output, "{question}").map_err(Error::Prompt)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {choice}", i + 1).map_err(Error::Prompt)?;
        }
        loop {
            write!(self.output, "> ").map_err(Error::Prompt)?;
            self.output.flush().map_err(Error::Prompt)?;
            let mut answer = String::new();
            if self.input.read_line(&mut answer).map_err(Error::Prompt)? == 0 {
                return Err(Error::SelectionAborted);
            }
            let answer = answer.trim();
            let by_number = answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=choices.len()).contains(n))
                .map(|n| n - 1);
            if let Some(i) = by_number.or_else(|| choices.iter().position(|c| c == answer)) {
                return Ok(i);
            }
            writeln!(
                self.output,
                "Please enter a number between 1 and {}.",
                choices.len()
            )
            .map_err(Error::Prompt)?;
        }
    }
}

/// Resolves which program and fixture to generate a demo app for.
///
/// Values given up front are validated against the programs and fixtures in `layout`;
/// missing values are asked for with `prompt`. A program without fixtures is selected
/// without one.
pub fn resolve(
    layout: &Layout,
    program: Option<String>,
    fixture: Option<String>,
    prompt: &mut dyn Prompt,
) -> Result<Selection, Error> {
    let programs_dir = layout.programs_dir();
    let programs = list_programs(&programs_dir, &layout.program_ext)?;
    if programs.is_empty() {
        return Err(Error::NoPrograms { dir: programs_dir });
    }
    let program = match program {
        Some(program) if programs.contains(&program) => program,
        Some(program) => {
            return Err(Error::UnknownProgram {
                program,
                dir: programs_dir,
            });
        }
        None => {
            let i = prompt.choose(
                "Select an existing program to create a streamlit app demo:",
                &programs,
            )?;
            programs[i].clone()
        }
    };

    let fixtures_dir = layout.fixtures_dir();
    let mut fixtures = fixtures_for(&fixtures_dir, &program)?;
    let fixture = match fixture {
        Some(requested) => {
            let Some(i) = fixtures
                .iter()
                .position(|f| f.file_name() == requested || f.name() == requested)
            else {
                return Err(Error::UnknownFixture {
                    fixture: requested,
                    program,
                });
            };
            Some(fixtures.swap_remove(i))
        }
        None if fixtures.is_empty() => {
            info!(
                "No test files found for '{program}' in {}",
                fixtures_dir.display()
            );
            None
        }
        None => {
            let names: Vec<String> = fixtures.iter().map(|f| f.file_name().to_string()).collect();
            let i = prompt.choose("Select a test file for starting input values:", &names)?;
            Some(fixtures.swap_remove(i))
        }
    };
    Ok(Selection { program, fixture })
}

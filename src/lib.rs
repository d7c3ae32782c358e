//! Generates Streamlit demo apps for compiled [Nada](https://docs.nillion.com) programs.
//!
//! A Nada project contains a directory of programs (one script per program) and a directory
//! of YAML test fixtures, each naming the program it belongs to in its `program` key. This
//! crate turns a program and one of its fixtures into a runnable demo app:
//!
//! 1. [`select::resolve`] picks the program and fixture, either from given names or by
//!    asking the user, and produces a [`Selection`].
//! 2. [`Pipeline::run`] builds the program with the external `nada` compiler, copies the
//!    compiled `.nada.bin` and `.nada.json` files next to the apps, checks that both are
//!    present, renders the wrapper `app_<program>.py` and finally launches it with
//!    `streamlit run`.
//!
//! Every step is a plain blocking call; there is no retry and no partial recovery, a failed
//! run is simply started over.
//!
//! ## Example
//!
//! ```no_run
//! use nada_demo_gen::{
//!     Layout, Pipeline, PipelineOpts,
//!     compiler::Compiler,
//!     launch::Runner,
//!     select::{MenuPrompt, resolve},
//! };
//!
//! # fn example() -> Result<(), nada_demo_gen::Error> {
//! let layout = Layout::with_root("demos/nada-project");
//! let selection = resolve(&layout, Some("addition".into()), None, &mut MenuPrompt::stdio())?;
//! let pipeline = Pipeline::new(layout, Compiler::default(), Runner::default());
//! let outcome = pipeline.run(&selection, PipelineOpts::default())?;
//! println!("generated {}", outcome.wrapper.display());
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod artifact;
pub mod compiler;
pub mod fixture;
pub mod launch;
pub mod program;
pub mod select;
pub mod tool;
pub mod wrapper;

mod config;
mod error;
mod pipeline;

pub use config::{COMPILED_DIR_NAME, Layout};
pub use error::{BoxError, Error};
pub use pipeline::{LaunchStatus, Outcome, Pipeline, PipelineOpts};
pub use select::Selection;

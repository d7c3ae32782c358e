//! Test helpers for `nada-demo-gen`.
pub mod project;

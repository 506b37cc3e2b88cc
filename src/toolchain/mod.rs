// src/toolchain/mod.rs

//! Mapping a discovered file to the command that runs it.

pub mod resolver;
pub mod workspace;

pub use resolver::{resolve, Resolution};
pub use workspace::{JavaPlan, Workspace};

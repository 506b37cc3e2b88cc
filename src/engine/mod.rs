// src/engine/mod.rs

//! Execution engine for codesubmit.
//!
//! Takes the discovered files, compiles the Java subset once, then runs
//! every file in order through a [`ProcessRunner`](crate::exec::ProcessRunner).
//! The runner and compiler are trait seams so the whole flow can be
//! driven in tests without spawning anything.

pub mod orchestrator;

pub use orchestrator::{Engine, ExecutionEntry};

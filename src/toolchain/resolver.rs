// src/toolchain/resolver.rs

use crate::exec::RunCommand;
use crate::toolchain::workspace::{JavaPlan, Workspace};
use crate::types::{Language, SourceFileRef};

/// What to do with one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Run(RunCommand),
    /// No runner for this language. Not an error.
    NoRunner,
    /// A runner exists but this file must not be launched. `command` is what
    /// would have run, kept for the report.
    Rejected { command: RunCommand, reason: String },
}

/// Decide how to run `file`. Pure: looks only at its arguments.
pub fn resolve(file: &SourceFileRef, workspace: &Workspace) -> Resolution {
    let toolchain = workspace.toolchain();
    match file.language {
        Language::Python => Resolution::Run(
            RunCommand::new(toolchain.python.clone())
                .arg("-u")
                .path_arg(&file.path),
        ),
        Language::Java => match workspace.java_plan(&file.rel_path) {
            Some(JavaPlan::Class(class) | JavaPlan::Isolated(class)) => Resolution::Run(
                RunCommand::new(toolchain.java.clone())
                    .arg("-cp")
                    .path_arg(&class.classpath_root)
                    .arg(class.class_name.clone()),
            ),
            Some(JavaPlan::Ambiguous { class_name, others }) => Resolution::Rejected {
                command: RunCommand::new(toolchain.java.clone()).arg(class_name.clone()),
                reason: format!(
                    "class name `{}` under the same classpath root is also derived from {}; refusing to guess which one to run",
                    class_name,
                    others.join(", ")
                ),
            },
            Some(JavaPlan::SingleFile) | None => {
                Resolution::Run(RunCommand::new(toolchain.java.clone()).path_arg(&file.path))
            }
        },
        _ => Resolution::NoRunner,
    }
}

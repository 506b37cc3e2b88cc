// src/toolchain/workspace.rs

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::ToolchainConfig;
use crate::java::{resolve_class, JavaClass};
use crate::types::{Language, SourceFileRef};

/// How a Java file will be compiled and launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaPlan {
    /// Compiled with the rest of the batch, run as `java -cp <root> <class>`.
    Class(JavaClass),
    /// Another file derives the same class name under a different root.
    /// Compiled on its own against its root, then run like [`JavaPlan::Class`].
    Isolated(JavaClass),
    /// No class name could be derived; `java <file>`.
    SingleFile,
    /// Another file derives the same class name under the same root, so their
    /// class files would overwrite each other. Neither is compiled or run.
    Ambiguous {
        class_name: String,
        others: Vec<String>,
    },
}

/// Batch-wide facts the resolver needs: the toolchain and a launch plan for
/// every Java file, keyed by relative path.
#[derive(Debug, Clone)]
pub struct Workspace {
    toolchain: ToolchainConfig,
    java: HashMap<String, JavaPlan>,
}

impl Workspace {
    pub fn new(toolchain: ToolchainConfig, files: &[SourceFileRef]) -> Self {
        let mut resolved: Vec<(&SourceFileRef, Option<JavaClass>)> = Vec::new();
        // class name -> classpath root -> files
        let mut by_class: BTreeMap<String, BTreeMap<PathBuf, Vec<String>>> = BTreeMap::new();

        for file in files.iter().filter(|f| f.language == Language::Java) {
            match resolve_class(&file.path, &file.content) {
                Ok(class) => {
                    by_class
                        .entry(class.class_name.clone())
                        .or_default()
                        .entry(class.classpath_root.clone())
                        .or_default()
                        .push(file.rel_path.clone());
                    resolved.push((file, Some(class)));
                }
                Err(e) => {
                    debug!(file = %file.rel_path, error = %e, "falling back to single-file launch");
                    resolved.push((file, None));
                }
            }
        }

        let mut java = HashMap::new();
        for (file, class) in resolved {
            let plan = match class {
                None => JavaPlan::SingleFile,
                Some(class) => {
                    let roots = &by_class[&class.class_name];
                    let same_root = &roots[&class.classpath_root];
                    if same_root.len() > 1 {
                        let others: Vec<String> = same_root
                            .iter()
                            .filter(|p| **p != file.rel_path)
                            .cloned()
                            .collect();
                        warn!(
                            file = %file.rel_path,
                            class = %class.class_name,
                            ?others,
                            "java class name is not unique under its classpath root"
                        );
                        JavaPlan::Ambiguous {
                            class_name: class.class_name,
                            others,
                        }
                    } else if roots.len() > 1 {
                        debug!(
                            file = %file.rel_path,
                            class = %class.class_name,
                            "class name shared across roots; compiling separately"
                        );
                        JavaPlan::Isolated(class)
                    } else {
                        JavaPlan::Class(class)
                    }
                }
            };
            java.insert(file.rel_path.clone(), plan);
        }

        Self { toolchain, java }
    }

    pub fn toolchain(&self) -> &ToolchainConfig {
        &self.toolchain
    }

    pub fn java_plan(&self, rel_path: &str) -> Option<&JavaPlan> {
        self.java.get(rel_path)
    }

    /// Java files for the shared compiler run, in input order.
    pub fn compilable<'f>(&self, files: &'f [SourceFileRef]) -> Vec<&'f SourceFileRef> {
        files
            .iter()
            .filter(|f| f.language == Language::Java)
            .filter(|f| {
                !matches!(
                    self.java.get(&f.rel_path),
                    Some(JavaPlan::Ambiguous { .. } | JavaPlan::Isolated(_))
                )
            })
            .collect()
    }

    /// Java files that need a compiler run of their own, with the root to
    /// compile against, in input order.
    pub fn isolated<'f, 's>(
        &'s self,
        files: &'f [SourceFileRef],
    ) -> Vec<(&'f SourceFileRef, &'s JavaClass)> {
        files
            .iter()
            .filter_map(|f| match self.java.get(&f.rel_path) {
                Some(JavaPlan::Isolated(class)) => Some((f, class)),
                _ => None,
            })
            .collect()
    }
}

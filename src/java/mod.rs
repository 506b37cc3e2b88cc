// src/java/mod.rs

//! Java support: deriving the class to launch and compiling a whole batch.
//!
//! - [`classpath`] maps one source file to `(fully qualified name, classpath
//!   root)` using its `package` declaration and directory layout.
//! - [`compiler`] runs `javac` once over every Java file in the batch.

pub mod classpath;
pub mod compiler;

pub use classpath::{detect_package, resolve_class, ClasspathError, JavaClass};
pub use compiler::{CompilationOutcome, JavaCompiler, JavacCompiler};

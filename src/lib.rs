pub use crate::compiler::{compile, compile_encoded, CompileOptions, Compiler};
pub use crate::diagnostics::{CompileError, MachineError};

pub mod bootstrap;
pub mod cli;
pub mod compiler;
pub mod diagnostics;
pub mod grammar;
pub mod machine;

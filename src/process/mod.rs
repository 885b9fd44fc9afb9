//! Subprocess invocation.
//!
//! Every external tool the pipeline talks to goes through the
//! [`CommandExecutor`] trait, so stages can be exercised without spawning
//! real processes.

pub mod invoker;
#[cfg(test)]
pub mod mock;

pub use invoker::{CommandExecutor, ProcessSpec, StageOutput, StageResult, SystemCommandExecutor};

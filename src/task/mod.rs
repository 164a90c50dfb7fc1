// src/task/mod.rs

//! Task registration.
//!
//! - [`descriptor`] defines the immutable [`TaskDescriptor`] record, the
//!   [`Task`] body trait and the [`CommandFactory`] used to re-invoke the
//!   host binary for one task.
//! - [`registry`] holds descriptors by name in registration order.
//! - [`shell`] is the built-in body for tasks declared in the config file.

pub mod descriptor;
pub mod registry;
pub mod shell;

pub use descriptor::{
    CommandFactory, CommandLine, Task, TaskContext, TaskDescriptor, TaskDescriptorBuilder,
    TaskRunCommand,
};
pub use registry::TaskRegistry;
pub use shell::ShellTask;

//! Core library for the task list service
//!
//! This crate contains the storage side of the service:
//! - The task model and its validated inputs
//! - The `TaskRepository` interface
//! - SQLite and PostgreSQL implementations of that interface

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

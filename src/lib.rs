//! Strongly-typed genetic programming for episodic control.
//!
//! Programs are typed trees drawn from a terminal and a function catalog.
//! The engine generates them (`grow` or `full`), mutates one subtree at a
//! time, picks parents by roulette selection and scores programs by
//! rolling them out in an [`engines::evaluation::Environment`].

pub mod config;
pub mod engines;
pub mod environments;
pub mod error;
pub mod functions;
pub mod report;
pub mod types;

pub use error::{GpError, Result};
pub use types::{Program, TypeToken};

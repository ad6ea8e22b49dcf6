//! Sandboxed file access for agent tools.
//!
//! Every path is resolved against a trusted project root and rejected if it
//! escapes that root. Reads can be limited to a line range; writes can
//! overwrite or append.

#![warn(missing_docs)]

mod accessor;
mod config;
mod error;
pub mod path;
mod request;

pub use accessor::SafeFileAccessor;
pub use config::{AccessorConfig, PROJECT_ROOT_ENV};
pub use error::{AccessError, ErrorKind, Result};
pub use request::{AccessOutcome, AccessRequest, Operation, ReadResult, WriteMode, WriteResult};

//! Shared library modules providing error types, path resolution, file utilities, and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod paths;
pub mod telemetry;

//! The data the program works with: what the user asked for, the package
//! manager that drives the project and the manifest it produces
pub mod manifest;
pub mod package_manager;
pub mod project;

pub use project::{ProjectRequest, ScaffoldOptions};

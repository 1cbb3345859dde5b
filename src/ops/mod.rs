//! Item operations: install coordination and launch resolution

pub mod error;
pub mod install;
pub mod launch;

pub use error::{InstallError, LaunchError};
pub use install::{InstallCoordinator, Retriever};

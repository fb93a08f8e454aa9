//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Agreement list, details, upload, edit and delete commands
pub mod agreement;

/// Dashboard, event list and calendar commands
pub mod dashboard;

/// General utility commands
pub mod general;

// Export commands
pub use agreement::*;
pub use dashboard::*;
pub use general::*;

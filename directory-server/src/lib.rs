//! Employee Directory Server
//!
//! REST API for a single-entity employee directory backed by SQLite.
//!
//! # Module structure
//!
//! ```text
//! directory-server/src/
//! ├── core/          # Config, state, server loop
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Connection pool, migrations, repository
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

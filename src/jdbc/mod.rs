//! JDBC table/query reader.
//!
//! - [`options`] - Flat option assembly with late secret resolution
//! - [`reader`] - Validation and delegation to a host [`FormatLoader`]

pub mod options;
pub mod reader;

pub use options::{JdbcOptions, OptionsBuilder};
pub use reader::{FormatLoader, JdbcReader};

pub mod case;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reporters;
pub mod results;
pub mod session;
pub mod utils;

pub use case::{Case, ReporterCallback};
pub use error::{ErrorTag, ReportError, Result};
pub use results::{Results, Stats};
pub use session::Session;

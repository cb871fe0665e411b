mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ConfigError, Error, ParseError};
pub(crate) use base::*;
pub(crate) use interface::*;
pub(crate) use middleware::*;
pub(crate) use printer::*;

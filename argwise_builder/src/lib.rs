//! Builder module for `argwise`.
//! See [documentation root](https://docs.rs/argwise/latest/argwise/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, Error, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

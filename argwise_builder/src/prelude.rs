//! Traits which, typically, may be imported without concern: `use argwise::prelude::*`.

use std::path::PathBuf;

/// Behaviour to convert a Cli token into a typed value `Self`.
///
/// Implement all three functions consistently to use a custom type with
/// [`ArgumentSpec::type_`](../struct.ArgumentSpec.html#method.type_), choices, defaults and consts.
// Needs to be imported in order to implement a custom `Converter`.
pub trait Converter: Clone + Send + Sync + 'static {
    /// Convert the whole `token`, or `None` when it isn't a valid `Self`.
    fn from_token(token: &str) -> Option<Self>;

    /// Display this value in error messages and help choices.
    fn to_display(&self) -> String;

    /// Equality used for choice matching.
    fn are_equal(&self, other: &Self) -> bool;
}

macro_rules! bare_converter {
    ($($t:ty),* $(,)?) => {
        $(
            impl Converter for $t {
                fn from_token(token: &str) -> Option<Self> {
                    token.parse::<$t>().ok()
                }

                fn to_display(&self) -> String {
                    self.to_string()
                }

                fn are_equal(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

bare_converter!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

impl Converter for char {
    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn to_display(&self) -> String {
        self.to_string()
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Converter for String {
    fn from_token(token: &str) -> Option<Self> {
        Some(token.to_string())
    }

    fn to_display(&self) -> String {
        format!("\"{self}\"")
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Converter for PathBuf {
    fn from_token(token: &str) -> Option<Self> {
        Some(PathBuf::from(token))
    }

    fn to_display(&self) -> String {
        format!("\"{}\"", self.display())
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// A type-erased value, as stored in [`ParsedArguments`].
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a typed value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Whether the wrapped value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the wrapped value as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// The name of the wrapped value's type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value<{}>", self.type_name)
    }
}

/// An error querying [`ParsedArguments`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The key isn't the `dest` of any declared argument.
    #[error("no such argument: '{0}'")]
    NoSuchArgument(String),

    /// The argument is declared, but has no value in this parse.
    #[error("argument '{0}' has no value")]
    MissingValue(String),

    /// The stored value is of another type.
    #[error("wrong type: requested '{requested}' for argument of type '{stored}'")]
    #[allow(missing_docs)]
    WrongType {
        requested: &'static str,
        stored: &'static str,
    },
}

/// The result of a parse: every declared destination mapped to its value, if any.
///
/// ### Example
/// ```
/// # use argwise_builder as argwise;
/// use argwise::{Action, ArgumentParser, Handle};
///
/// let mut parser = ArgumentParser::new().handle(Handle::NONE);
/// parser.add_argument(["-v", "--verbose"]).action(Action::StoreTrue);
/// parser.add_argument(["-o"]);
///
/// let parsed = parser.parse_tokens(["-v"]).unwrap();
/// assert!(parsed.get_value::<bool>("verbose").unwrap());
/// // Declared, but not present.
/// assert!(parsed.get("o").unwrap().is_none());
/// // Not declared at all.
/// assert!(parsed.get("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParsedArguments {
    values: BTreeMap<String, Option<Value>>,
}

impl ParsedArguments {
    /// Record the value for `dest`, unless `dest` is already recorded.
    pub(crate) fn insert(&mut self, dest: impl Into<String>, value: Option<Value>) {
        self.values.entry(dest.into()).or_insert(value);
    }

    /// Get the value for `dest`.
    ///
    /// Returns `Ok(None)` when `dest` was declared but received no value in this parse.
    pub fn get(&self, dest: &str) -> Result<Option<&Value>, QueryError> {
        match self.values.get(dest) {
            Some(value) => Ok(value.as_ref()),
            None => Err(QueryError::NoSuchArgument(dest.to_string())),
        }
    }

    /// Whether `dest` received a value in this parse (or via its default).
    pub fn is_present(&self, dest: &str) -> Result<bool, QueryError> {
        self.get(dest).map(|value| value.is_some())
    }

    /// Get a clone of the value for `dest` as `T`.
    ///
    /// Multi-value arguments are stored as `Vec<T>`.
    pub fn get_value<T: Any + Clone>(&self, dest: &str) -> Result<T, QueryError> {
        let value = self
            .get(dest)?
            .ok_or_else(|| QueryError::MissingValue(dest.to_string()))?;

        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or(QueryError::WrongType {
                requested: std::any::type_name::<T>(),
                stored: value.type_name(),
            })
    }

    /// Iterate over the declared destinations, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

use std::any::TypeId;
use std::marker::PhantomData;

use crate::api::field::Value;
use crate::prelude::Converter;

/// Behaviour to convert tokens into an implicit generic type T.
///
/// We use this at the middle/top of the argument parser object graph so that arguments of different types may all live in a single argument parser.
pub(crate) trait AnonymousConverter: Send + Sync {
    fn value_type_id(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    /// Convert the token, or `None` when it doesn't convert.
    fn from_token(&self, token: &str) -> Option<Value>;

    /// Display a value of this type (`None` when the value is of another type).
    fn to_display(&self, value: &Value) -> Option<String>;

    /// Compare two values of this type (values of another type are never equal).
    fn are_equal(&self, lhs: &Value, rhs: &Value) -> bool;

    /// Collect converted values into a single `Vec<T>` value.
    fn collect(&self, values: Vec<Value>) -> Value;
}

/// Binds an explicit generic type T onto the anonymous conversion behaviour.
pub(crate) struct ConverterBinding<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Converter> ConverterBinding<T> {
    pub(crate) fn bind() -> Box<dyn AnonymousConverter> {
        Box::new(Self {
            _phantom: PhantomData,
        })
    }
}

impl<T: Converter> AnonymousConverter for ConverterBinding<T> {
    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn from_token(&self, token: &str) -> Option<Value> {
        T::from_token(token).map(Value::new)
    }

    fn to_display(&self, value: &Value) -> Option<String> {
        value.downcast_ref::<T>().map(T::to_display)
    }

    fn are_equal(&self, lhs: &Value, rhs: &Value) -> bool {
        match (lhs.downcast_ref::<T>(), rhs.downcast_ref::<T>()) {
            (Some(l), Some(r)) => l.are_equal(r),
            _ => false,
        }
    }

    fn collect(&self, values: Vec<Value>) -> Value {
        let typed: Vec<T> = values
            .iter()
            .filter_map(|value| value.downcast_ref::<T>().cloned())
            .collect();
        Value::new(typed)
    }
}

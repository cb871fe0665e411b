mod core;
mod group;
mod model;

pub(crate) use self::core::*;
pub(crate) use group::GroupId;
pub(crate) use model::Bound;

use thiserror::Error;

use crate::model::Nargs;

/// How many values an occurrence may take: an inclusive range, or an open ended minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(usize, usize),
    Lower(usize),
}

impl Bound {
    pub(crate) fn lower(&self) -> usize {
        match self {
            Bound::Range(n, _) | Bound::Lower(n) => *n,
        }
    }

    fn admits_more(&self, count: usize) -> bool {
        match self {
            Bound::Range(_, upper) => count < *upper,
            Bound::Lower(_) => true,
        }
    }
}

impl From<Nargs> for Bound {
    fn from(value: Nargs) -> Self {
        match value {
            Nargs::Precisely(n) => Bound::Range(n, n),
            Nargs::AtMostOne => Bound::Range(0, 1),
            Nargs::Any => Bound::Lower(0),
            Nargs::AtLeastOne => Bound::Lower(1),
        }
    }
}

/// The raw tokens matched by a single occurrence of the argument at `index`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MatchTokens {
    pub index: usize,
    pub values: Vec<String>,
}

/// An occurrence ended before reaching the minimum of its bound.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("argument #{index} ended with {provided} value(s), below {bound:?}.")]
pub(super) struct Shortfall {
    pub index: usize,
    pub provided: usize,
    pub bound: Bound,
}

/// Collects the values of the occurrence currently being matched.
///
/// The matcher closes the buffer as soon as it stops admitting values, so it never holds more than its bound.
#[derive(Debug)]
pub(super) struct MatchBuffer {
    index: usize,
    bound: Bound,
    values: Vec<String>,
}

impl MatchBuffer {
    pub(super) fn new(index: usize, bound: Bound) -> Self {
        Self {
            index,
            bound,
            values: Vec::default(),
        }
    }

    pub(super) fn push(&mut self, value: impl Into<String>) {
        debug_assert!(self.is_open(), "pushed into a full buffer");
        self.values.push(value.into());
    }

    pub(super) fn is_open(&self) -> bool {
        self.bound.admits_more(self.values.len())
    }

    pub(super) fn close(self) -> Result<MatchTokens, Shortfall> {
        let MatchBuffer {
            index,
            bound,
            values,
        } = self;

        if values.len() < bound.lower() {
            Err(Shortfall {
                index,
                provided: values.len(),
                bound,
            })
        } else {
            Ok(MatchTokens { index, values })
        }
    }
}

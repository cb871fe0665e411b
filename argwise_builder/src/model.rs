/// The cardinality of inputs to match for an argument.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// `N`: Precisely `N` values (`N` must be at least `1`).
    Precisely(usize),
    /// `?`: Zero or one value.
    AtMostOne,
    /// `*`: May be any number of values, including `0`.
    Any,
    /// `+`: At least one value must be specified.
    AtLeastOne,
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nargs::Precisely(n) => write!(f, "{n}"),
            Nargs::AtMostOne => write!(f, "?"),
            Nargs::Any => write!(f, "*"),
            Nargs::AtLeastOne => write!(f, "+"),
        }
    }
}

/// What happens when an argument is matched on the Cli.
///
/// The action decides both how many tokens an occurrence consumes, and how repeated occurrences combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Store the value(s); a repeated occurrence overwrites the previous one.
    #[default]
    Store,
    /// Store `true` (absent: `false`).
    StoreTrue,
    /// Store `false` (absent: `true`).
    StoreFalse,
    /// Store the configured const value.
    StoreConst,
    /// Count the occurrences, as a `usize`.
    Count,
    /// Accumulate the values of every occurrence into a single `Vec<T>`.
    Append,
    /// Request the help message.
    Help,
    /// Request the version message.
    Version,
}

impl Action {
    /// Whether an occurrence of this action consumes values from the token stream.
    pub fn expects_argument(&self) -> bool {
        matches!(self, Action::Store | Action::Append)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Store => "store",
            Action::StoreTrue => "store_true",
            Action::StoreFalse => "store_false",
            Action::StoreConst => "store_const",
            Action::Count => "count",
            Action::Append => "append",
            Action::Help => "help",
            Action::Version => "version",
        };
        write!(f, "{name}")
    }
}

/// Which outcomes the parser handles by itself (print and exit), rather than handing back to the caller.
///
/// Combine with `|`, for example `Handle::ERRORS | Handle::VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(u8);

impl Handle {
    /// Hand everything back to the caller.
    pub const NONE: Handle = Handle(0);
    /// Print parse errors along with the help message, then exit with `1`.
    pub const ERRORS: Handle = Handle(1);
    /// Print the help message, then exit with `0`.
    pub const HELP: Handle = Handle(2);
    /// Print the version message, then exit with `0`.
    pub const VERSION: Handle = Handle(4);
    /// `ERRORS | HELP`
    pub const ERRORS_AND_HELP: Handle = Handle(1 | 2);
    /// `ERRORS | HELP | VERSION` (the default).
    pub const ERRORS_HELP_VERSION: Handle = Handle(1 | 2 | 4);

    /// Whether all of `other` is handled.
    pub fn contains(&self, other: Handle) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::ERRORS_HELP_VERSION
    }
}

impl std::ops::BitOr for Handle {
    type Output = Handle;

    fn bitor(self, rhs: Self) -> Self::Output {
        Handle(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Nargs::Precisely(3), "3")]
    #[case(Nargs::AtMostOne, "?")]
    #[case(Nargs::Any, "*")]
    #[case(Nargs::AtLeastOne, "+")]
    fn nargs_display(#[case] nargs: Nargs, #[case] expected: &str) {
        assert_eq!(nargs.to_string(), expected);
    }

    #[rstest]
    #[case(Action::Store, true)]
    #[case(Action::Append, true)]
    #[case(Action::StoreTrue, false)]
    #[case(Action::StoreFalse, false)]
    #[case(Action::StoreConst, false)]
    #[case(Action::Count, false)]
    #[case(Action::Help, false)]
    #[case(Action::Version, false)]
    fn action_expects_argument(#[case] action: Action, #[case] expected: bool) {
        assert_eq!(action.expects_argument(), expected);
    }

    #[test]
    fn handle_combinations() {
        assert_eq!(Handle::ERRORS | Handle::HELP, Handle::ERRORS_AND_HELP);
        assert_eq!(
            Handle::ERRORS_AND_HELP | Handle::VERSION,
            Handle::ERRORS_HELP_VERSION
        );
        assert!(Handle::default().contains(Handle::ERRORS));
        assert!(Handle::default().contains(Handle::HELP));
        assert!(Handle::default().contains(Handle::VERSION));
        assert!(!Handle::NONE.contains(Handle::HELP));
        assert!(!Handle::ERRORS_AND_HELP.contains(Handle::VERSION));
        assert!(Handle::NONE.contains(Handle::NONE));
    }
}

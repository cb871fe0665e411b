use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ArgumentSpec, ParsedArguments, Value};
use crate::matcher::*;
use crate::model::{Action, Nargs};

/// A mistake in the argument declarations.
///
/// Declarations are only checked once parsing is requested, so this is returned by the `parse_*` methods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `add_argument` was called with no names.
    #[error("argument declared without names")]
    NoNames,

    /// A positional was declared with more than one name.
    #[error("positional argument '{0}' cannot have multiple names")]
    MultiplePositionalNames(String),

    /// An optional was declared with a name lacking the `-` prefix.
    #[error("invalid option string '{0}': must start with a character '-'")]
    InvalidOptionName(String),

    /// A positional was marked required.
    #[error("'required' is an invalid argument for positionals")]
    RequiredPositional,

    /// The same option name was declared twice.
    #[error("conflicting option string: {0}")]
    ConflictingOption(String),

    /// `Nargs::Precisely(0)` was declared.
    #[error("argument {0}: nargs must be at least 1")]
    ZeroNargs(String),

    /// Nargs was declared for an action which takes no values.
    #[error("argument {names}: nargs is an invalid argument for action '{action}'")]
    #[allow(missing_docs)]
    NargsForAction { names: String, action: Action },

    /// The choices are of a different type than the argument.
    #[error("argument {names}: choices of type '{choices}' do not match argument type '{argument}'")]
    #[allow(missing_docs)]
    ChoicesType {
        names: String,
        choices: &'static str,
        argument: &'static str,
    },

    /// A positional was declared with an action other than `Action::Store`.
    #[error("argument {names}: positional arguments cannot use action '{action}'")]
    #[allow(missing_docs)]
    PositionalAction { names: String, action: Action },
}

/// A mistake in the Cli tokens.
///
/// The message of each error is stable, and may be relied upon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Required arguments (named in declaration order) received no value.
    #[error("the following arguments are required: {}", .0.join(" "))]
    MissingRequiredArguments(Vec<String>),

    /// Tokens which matched no argument.
    #[error("unrecognised arguments: {}", .0.join(" "))]
    UnrecognisedArguments(Vec<String>),

    /// A single value argument received no value.
    #[error("argument {0}: expected one argument")]
    ExpectedOneArgument(String),

    /// A precise count of values was not met.
    #[error("argument {names}: expected {count} arguments")]
    #[allow(missing_docs)]
    ExpectedArgumentCount { names: String, count: usize },

    /// A one-or-more argument received no value.
    #[error("argument {0}: expected at least one argument")]
    ExpectedAtLeastOneArgument(String),

    /// A token failed to convert to the argument's type.
    #[error("argument {names}: invalid value: '{token}'")]
    #[allow(missing_docs)]
    InvalidValue { names: String, token: String },

    /// A value isn't amongst the argument's choices.
    #[error("argument {names}: invalid choice: {value} (choose from {})", .choices.join(", "))]
    #[allow(missing_docs)]
    InvalidChoice {
        names: String,
        value: String,
        choices: Vec<String>,
    },

    /// Two members of a mutually exclusive group were matched.
    #[error("argument {names}: not allowed with argument {matched}")]
    #[allow(missing_docs)]
    MutuallyExclusiveConflict { names: String, matched: String },

    /// A value was joined (`--flag=value`) onto an argument which takes no values.
    #[error("argument {names}: ignored explicit argument '{value}'")]
    #[allow(missing_docs)]
    IgnoredExplicitArgument { names: String, value: String },
}

/// The error returned by the `parse_*` methods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug)]
pub(crate) enum Outcome {
    Parsed(ParsedArguments),
    HelpRequested(ParsedArguments),
    VersionRequested(ParsedArguments),
}

pub(crate) struct Parser<'a> {
    specs: &'a [ArgumentSpec],
    token_matcher: TokenMatcher<'a>,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn new(specs: &'a [ArgumentSpec]) -> Result<Self, ConfigError> {
        for spec in specs {
            spec.validate()?;
        }

        let token_matcher = TokenMatcher::new(specs)?;
        Ok(Self {
            specs,
            token_matcher,
        })
    }

    pub(crate) fn consume(self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        let Parser {
            specs,
            mut token_matcher,
        } = self;

        for token in tokens {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Feeding '{token}'.");
            }
            match token_matcher.feed(token)? {
                Some(Interrupt::Help) => {
                    return Ok(Outcome::HelpRequested(assemble(
                        specs,
                        &token_matcher.interrupt(),
                    )));
                }
                Some(Interrupt::Version) => {
                    return Ok(Outcome::VersionRequested(assemble(
                        specs,
                        &token_matcher.interrupt(),
                    )));
                }
                None => {}
            };
        }

        let matches = token_matcher.close()?;
        Ok(Outcome::Parsed(assemble(specs, &matches)))
    }
}

fn assemble(specs: &[ArgumentSpec], matches: &Matches) -> ParsedArguments {
    let mut parsed = ParsedArguments::default();

    for (index, spec) in specs.iter().enumerate() {
        let occurrences: Vec<&Occurrence> = matches.of(index).collect();
        let value = if occurrences.is_empty() {
            absent_value(spec)
        } else {
            present_value(spec, &occurrences)
        };
        parsed.insert(spec.dest_name(), value);
    }

    parsed
}

fn absent_value(spec: &ArgumentSpec) -> Option<Value> {
    let default = spec.default_value().cloned();

    match spec.action_kind() {
        Action::StoreTrue | Action::Help | Action::Version => default.or(Some(Value::new(false))),
        Action::StoreFalse => default.or(Some(Value::new(true))),
        Action::Store if spec.is_positional() && spec.nargs_kind() == Some(Nargs::Any) => {
            default.or_else(|| Some(spec.collect(Vec::default())))
        }
        _ => default,
    }
}

fn present_value(spec: &ArgumentSpec, occurrences: &[&Occurrence]) -> Option<Value> {
    match spec.action_kind() {
        Action::StoreTrue | Action::Help | Action::Version => Some(Value::new(true)),
        Action::StoreFalse => Some(Value::new(false)),
        Action::StoreConst => spec.const_value().cloned(),
        Action::Count => Some(Value::new(occurrences.len())),
        Action::Append => Some(
            spec.collect(
                occurrences
                    .iter()
                    .flat_map(|o| o.values.iter().cloned())
                    .collect(),
            ),
        ),
        Action::Store => {
            // The last occurrence wins.
            let last = occurrences.last()?;

            if spec.is_multiple() {
                Some(spec.collect(last.values.clone()))
            } else {
                match last.values.first() {
                    Some(value) => Some(value.clone()),
                    None => spec.const_value().cloned(),
                }
            }
        }
    }
}

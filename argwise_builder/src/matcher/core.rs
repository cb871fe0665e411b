use std::collections::{HashMap, VecDeque};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ArgumentSpec, Value};
use crate::constant::*;
use crate::matcher::group::GroupRegistry;
use crate::matcher::model::*;
use crate::model::Action;
use crate::parser::{ConfigError, ParseError};

/// The converted values of a single occurrence of the argument at `index`.
#[derive(Debug)]
pub(crate) struct Occurrence {
    pub index: usize,
    pub values: Vec<Value>,
}

/// Every occurrence matched during a parse, in the order they were matched.
#[derive(Debug, Default)]
pub(crate) struct Matches {
    pub occurrences: Vec<Occurrence>,
}

impl Matches {
    pub(crate) fn of(&self, index: usize) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(move |o| o.index == index)
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.of(index).next().is_some()
    }
}

/// Stops the scan as soon as a help or version argument is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Help,
    Version,
}

/// Matches a stream of tokens, one at a time, against the declared arguments.
///
/// Options are looked up by name, while other tokens fill the positionals in declaration order.
/// An argument being filled sits in the match buffer until it is full, or until the run of value tokens ends.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'a> {
    specs: &'a [ArgumentSpec],
    options: HashMap<&'a str, usize>,
    positionals: VecDeque<usize>,
    negative_number_options: bool,
    after_separator: bool,
    buffer: Option<MatchBuffer>,
    groups: GroupRegistry,
    matches: Matches,
    unrecognized: Vec<String>,
}

impl<'a> TokenMatcher<'a> {
    pub(crate) fn new(specs: &'a [ArgumentSpec]) -> Result<Self, ConfigError> {
        let mut options = HashMap::default();
        let mut positionals = VecDeque::default();

        for (index, spec) in specs.iter().enumerate() {
            if spec.is_positional() {
                positionals.push_back(index);
            } else {
                for name in spec.names() {
                    if options.insert(name.as_str(), index).is_some() {
                        return Err(ConfigError::ConflictingOption(name.clone()));
                    }
                }
            }
        }

        let negative_number_options = options
            .keys()
            .any(|name| looks_like_negative_number(name));

        Ok(Self {
            specs,
            options,
            positionals,
            negative_number_options,
            after_separator: false,
            buffer: None,
            groups: GroupRegistry::default(),
            matches: Matches::default(),
            unrecognized: Vec::default(),
        })
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<Option<Interrupt>, ParseError> {
        // 1. After the separator, every token is a value.
        // 2. The first separator ends the current run of values.
        // 3. Find an option, such as:
        //  --initial
        //  --initial=..
        //  -i
        //  -i..
        //  -vi..
        // 4. Otherwise, the token is a value.
        if self.after_separator {
            self.match_value(token)?;
            return Ok(None);
        }

        if token == SEPARATOR {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Separator found, all further tokens are values.");
            }
            self.after_separator = true;
            self.flush()?;
            return Ok(None);
        }

        if self.is_option_like(token) {
            // An option always ends the current run of values, even when it goes unrecognized.
            self.flush()?;
            self.match_option(token)
        } else {
            self.match_value(token)?;
            Ok(None)
        }
    }

    fn is_option_like(&self, token: &str) -> bool {
        if !token.starts_with(PREFIX) || token.len() == 1 {
            return false;
        }

        self.negative_number_options || !looks_like_negative_number(token)
    }

    fn match_value(&mut self, token: &str) -> Result<(), ParseError> {
        let mut match_buffer = match self.buffer.take() {
            Some(match_buffer) => match_buffer,
            None => match self.positionals.pop_front() {
                // Flip to the next positional.
                Some(index) => MatchBuffer::new(index, self.specs[index].bound()),
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("No argument to match '{token}' against.");
                    }
                    self.unrecognized.push(token.to_string());
                    return Ok(());
                }
            },
        };

        match_buffer.push(token);
        self.update_buffer(match_buffer)
    }

    fn match_option(&mut self, token: &str) -> Result<Option<Interrupt>, ParseError> {
        if let Some(&index) = self.options.get(token) {
            return self.open_option(index, None);
        }

        if token.starts_with(LONG_PREFIX) {
            if let Some((name, value)) = token.split_once(EXPLICIT_DELIMITER) {
                if let Some(&index) = self.options.get(name) {
                    return self.open_option(index, Some(value));
                }
            }
        } else if let Some(bundle) = self.resolve_bundle(token) {
            for (index, inline) in bundle {
                if let Some(interrupt) = self.open_option(index, inline)? {
                    return Ok(Some(interrupt));
                }
            }

            return Ok(None);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Unrecognized option '{token}'.");
        }
        self.unrecognized.push(token.to_string());
        Ok(None)
    }

    /// Resolve every short option joined into `token`, or nothing at all.
    ///
    /// Options which take no values are peeled off left to right.
    /// The first option which takes values ends the bundle, using the remainder (if any) as its inline value.
    fn resolve_bundle<'t>(&self, token: &'t str) -> Option<Vec<(usize, Option<&'t str>)>> {
        let body = token.strip_prefix(PREFIX)?;
        let mut bundle = Vec::default();

        for (offset, single) in body.char_indices() {
            let index = *self.options.get(format!("{PREFIX}{single}").as_str())?;

            if self.specs[index].action_kind().expects_argument() {
                let remainder = &body[offset + single.len_utf8()..];
                let inline = if remainder.is_empty() {
                    None
                } else {
                    Some(remainder)
                };
                bundle.push((index, inline));
                return Some(bundle);
            }

            bundle.push((index, None));
        }

        Some(bundle)
    }

    fn open_option(
        &mut self,
        index: usize,
        inline: Option<&str>,
    ) -> Result<Option<Interrupt>, ParseError> {
        let specs = self.specs;
        let spec = &specs[index];
        let action = spec.action_kind();
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched option {spec:?} (inline value: {inline:?}).");
        }

        if !action.expects_argument() {
            if let Some(value) = inline {
                return Err(ParseError::IgnoredExplicitArgument {
                    names: spec.joined_names(),
                    value: value.to_string(),
                });
            }

            self.record(MatchTokens {
                index,
                values: Vec::default(),
            })?;

            return Ok(match action {
                Action::Help => Some(Interrupt::Help),
                Action::Version => Some(Interrupt::Version),
                _ => None,
            });
        }

        let mut match_buffer = MatchBuffer::new(index, spec.bound());

        if let Some(value) = inline {
            match_buffer.push(value);
        }

        self.update_buffer(match_buffer)?;
        Ok(None)
    }

    fn update_buffer(&mut self, match_buffer: MatchBuffer) -> Result<(), ParseError> {
        if match_buffer.is_open() {
            if self.buffer.replace(match_buffer).is_some() {
                unreachable!("internal error - the buffer is expected to be None");
            }

            Ok(())
        } else {
            self.close_buffer(match_buffer)
        }
    }

    fn flush(&mut self) -> Result<(), ParseError> {
        match self.buffer.take() {
            Some(match_buffer) => self.close_buffer(match_buffer),
            None => Ok(()),
        }
    }

    fn close_buffer(&mut self, match_buffer: MatchBuffer) -> Result<(), ParseError> {
        let specs = self.specs;

        match match_buffer.close() {
            Ok(match_tokens) => self.record(match_tokens),
            Err(Shortfall { index, .. }) if specs[index].is_positional() => {
                // The positional's tokens are spent, so it is reported as missing.
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Positional {:?} left unsatisfied.", specs[index]);
                }
                Ok(())
            }
            Err(Shortfall { index, bound, .. }) => {
                let names = specs[index].joined_names();

                Err(match bound {
                    Bound::Range(1, _) => ParseError::ExpectedOneArgument(names),
                    Bound::Range(count, _) => ParseError::ExpectedArgumentCount { names, count },
                    Bound::Lower(_) => ParseError::ExpectedAtLeastOneArgument(names),
                })
            }
        }
    }

    fn record(&mut self, match_tokens: MatchTokens) -> Result<(), ParseError> {
        let specs = self.specs;
        let MatchTokens { index, values } = match_tokens;
        let spec = &specs[index];
        let values = values
            .iter()
            .map(|token| spec.capture(token))
            .collect::<Result<Vec<Value>, ParseError>>()?;

        if let Some(group) = spec.group() {
            self.groups
                .record(group, index)
                .map_err(|matched| ParseError::MutuallyExclusiveConflict {
                    names: spec.joined_names(),
                    matched: specs[matched].joined_names(),
                })?;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Recorded {spec:?} with {} value(s).", values.len());
        }
        self.matches.occurrences.push(Occurrence { index, values });
        Ok(())
    }

    /// Finish the scan after a help or version argument, skipping the end of input checks.
    pub(crate) fn interrupt(self) -> Matches {
        self.matches
    }

    /// Finish the scan at the end of input.
    pub(crate) fn close(mut self) -> Result<Matches, ParseError> {
        self.flush()?;

        let missing: Vec<String> = self
            .specs
            .iter()
            .enumerate()
            .filter(|(index, spec)| spec.is_required() && !self.matches.contains(*index))
            .map(|(_, spec)| spec.joined_names())
            .collect();

        if !missing.is_empty() {
            return Err(ParseError::MissingRequiredArguments(missing));
        }

        if !self.unrecognized.is_empty() {
            return Err(ParseError::UnrecognisedArguments(self.unrecognized));
        }

        Ok(self.matches)
    }
}

/// Whether the token reads as a negative number, such as `-5`, `-1.5` or `-.5`.
fn looks_like_negative_number(token: &str) -> bool {
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    match token.strip_prefix(PREFIX) {
        Some(number) => match number.split_once('.') {
            Some((whole, fraction)) => !fraction.is_empty() && is_digits(whole) && is_digits(fraction),
            None => !number.is_empty() && is_digits(number),
        },
        None => false,
    }
}

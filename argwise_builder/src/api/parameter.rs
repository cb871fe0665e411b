use std::any::{Any, TypeId};

use crate::api::capture::{AnonymousConverter, ConverterBinding};
use crate::api::field::Value;
use crate::constant::*;
use crate::matcher::{Bound, GroupId};
use crate::model::{Action, Nargs};
use crate::parser::{ConfigError, ParseError};
use crate::prelude::Converter;

/// The declaration of a single positional or optional argument.
///
/// Obtained from [`ArgumentParser::add_argument`](./struct.ArgumentParser.html#method.add_argument), and configured by chaining its setters.
/// An argument whose first name starts with `-` is optional, otherwise it is positional.
///
/// ### Example
/// ```
/// # use argwise_builder as argwise;
/// use argwise::{Action, ArgumentParser, Handle, Nargs};
///
/// let mut parser = ArgumentParser::new().handle(Handle::NONE);
/// parser
///     .add_argument(["-n", "--number"])
///     .type_::<u32>()
///     .nargs(Nargs::AtLeastOne)
///     .help("the numbers to sum");
///
/// let parsed = parser.parse_tokens(["-n", "1", "2"]).unwrap();
/// assert_eq!(parsed.get_value::<Vec<u32>>("number").unwrap(), vec![1, 2]);
/// ```
pub struct ArgumentSpec {
    names: Vec<String>,
    help: Option<String>,
    metavar: Option<String>,
    dest: Option<String>,
    action: Action,
    nargs: Option<Nargs>,
    converter: Box<dyn AnonymousConverter>,
    choices: Vec<Value>,
    choices_type: Option<(TypeId, &'static str)>,
    default: Option<Value>,
    constant: Option<Value>,
    required: bool,
    version: Option<String>,
    group: Option<GroupId>,
}

impl std::fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = if self.is_positional() { "Arg" } else { "Opt" };
        let nargs = match &self.nargs {
            Some(nargs) => nargs.to_string(),
            None => "-".to_string(),
        };
        let help = if let Some(h) = &self.help {
            format!(", {h}")
        } else {
            "".to_string()
        };

        write!(
            f,
            "{class}[{t}, {action}, {nargs}, {names}{help}]",
            t = self.converter.type_name(),
            action = self.action,
            names = self.joined_names(),
        )
    }
}

impl ArgumentSpec {
    pub(crate) fn new(names: Vec<String>, group: Option<GroupId>) -> Self {
        Self {
            names,
            help: None,
            metavar: None,
            dest: None,
            action: Action::default(),
            nargs: None,
            converter: ConverterBinding::<String>::bind(),
            choices: Vec::default(),
            choices_type: None,
            default: None,
            constant: None,
            required: false,
            version: None,
            group,
        }
    }

    /// Document the argument in the help message.
    /// `{prog}` is substituted with the program name.
    pub fn help(&mut self, description: impl Into<String>) -> &mut Self {
        self.help.replace(description.into());
        self
    }

    /// Set the name displayed for the argument's values in the usage and help messages.
    pub fn metavar(&mut self, metavar: impl Into<String>) -> &mut Self {
        self.metavar.replace(metavar.into());
        self
    }

    /// Set the key the argument's value is stored under in the [`ParsedArguments`](./struct.ParsedArguments.html).
    pub fn dest(&mut self, dest: impl Into<String>) -> &mut Self {
        self.dest.replace(dest.into());
        self
    }

    /// Set the [`Action`] taken when the argument is matched.
    pub fn action(&mut self, action: Action) -> &mut Self {
        self.action = action;
        self
    }

    /// Set the number of values each occurrence consumes.
    pub fn nargs(&mut self, nargs: Nargs) -> &mut Self {
        self.nargs.replace(nargs);
        self
    }

    /// Convert the argument's values to `T` (the default is `String`).
    pub fn type_<T: Converter>(&mut self) -> &mut Self {
        self.converter = ConverterBinding::<T>::bind();
        self
    }

    /// Restrict the argument's values to `choices`.
    /// The choices must be of the same type as the argument.
    pub fn choices<T: Converter>(&mut self, choices: impl IntoIterator<Item = T>) -> &mut Self {
        self.choices = choices.into_iter().map(Value::new).collect();
        self.choices_type
            .replace((TypeId::of::<T>(), std::any::type_name::<T>()));
        self
    }

    /// Set the value used when the argument is absent.
    pub fn default_<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.default.replace(Value::new(value));
        self
    }

    /// Set the value stored by [`Action::StoreConst`], or by a [`Nargs::AtMostOne`] option present without a value.
    pub fn const_<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.constant.replace(Value::new(value));
        self
    }

    /// Require the optional argument to be present.
    ///
    /// Positionals may not be marked required; this is reported as a [`ConfigError`](./enum.ConfigError.html) when parsing.
    pub fn required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Set the version message printed by an [`Action::Version`] argument.
    /// `{prog}` is substituted with the program name.
    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version.replace(version.into());
        self
    }
}

impl ArgumentSpec {
    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn is_positional(&self) -> bool {
        match self.names.first() {
            Some(name) => !name.starts_with(PREFIX),
            None => false,
        }
    }

    pub(crate) fn is_required(&self) -> bool {
        if self.is_positional() {
            self.bound().lower() > 0
        } else {
            self.required
        }
    }

    pub(crate) fn action_kind(&self) -> Action {
        self.action
    }

    pub(crate) fn nargs_kind(&self) -> Option<Nargs> {
        self.nargs
    }

    pub(crate) fn help_text(&self) -> Option<&str> {
        match (&self.help, self.action) {
            (Some(help), _) => Some(help.as_str()),
            (None, Action::Version) => Some(VERSION_MESSAGE),
            (None, _) => None,
        }
    }

    pub(crate) fn version_text(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub(crate) fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub(crate) fn const_value(&self) -> Option<&Value> {
        self.constant.as_ref()
    }

    /// The names, joined with `/`.
    pub(crate) fn joined_names(&self) -> String {
        self.names.join("/")
    }

    /// How the argument is referred to in value errors.
    pub(crate) fn error_name(&self) -> String {
        if self.is_positional() {
            self.dest_name()
        } else {
            self.joined_names()
        }
    }

    pub(crate) fn dest_name(&self) -> String {
        if let Some(dest) = &self.dest {
            return dest.clone();
        }

        let name = if self.is_positional() {
            self.names.first().map(String::as_str)
        } else {
            self.names
                .iter()
                .find_map(|name| name.strip_prefix(LONG_PREFIX))
                .or_else(|| {
                    self.names
                        .first()
                        .map(|name| name.strip_prefix(PREFIX).unwrap_or(name))
                })
        };

        name.unwrap_or_default().replace(PREFIX, "_")
    }

    pub(crate) fn metavar_name(&self) -> String {
        match &self.metavar {
            Some(metavar) => metavar.clone(),
            None => {
                if self.is_positional() {
                    self.names.first().cloned().unwrap_or_default()
                } else {
                    self.dest_name().to_uppercase()
                }
            }
        }
    }

    /// How many values each occurrence consumes.
    pub(crate) fn bound(&self) -> Bound {
        if self.action.expects_argument() {
            Bound::from(self.nargs.unwrap_or(Nargs::Precisely(1)))
        } else {
            Bound::Range(0, 0)
        }
    }

    /// Whether the values of an occurrence are stored as a `Vec<T>`.
    pub(crate) fn is_multiple(&self) -> bool {
        matches!(
            self.nargs,
            Some(Nargs::Precisely(_)) | Some(Nargs::Any) | Some(Nargs::AtLeastOne)
        )
    }

    pub(crate) fn display(&self, value: &Value) -> String {
        self.converter
            .to_display(value)
            .unwrap_or_else(|| format!("{value:?}"))
    }

    pub(crate) fn displayed_choices(&self) -> Vec<String> {
        self.choices.iter().map(|c| self.display(c)).collect()
    }

    pub(crate) fn collect(&self, values: Vec<Value>) -> Value {
        self.converter.collect(values)
    }

    /// Convert a token into this argument's type, enforcing the choices.
    pub(crate) fn capture(&self, token: &str) -> Result<Value, ParseError> {
        let value = self
            .converter
            .from_token(token)
            .ok_or_else(|| ParseError::InvalidValue {
                names: self.error_name(),
                token: token.to_string(),
            })?;

        if !self.choices.is_empty()
            && !self
                .choices
                .iter()
                .any(|choice| self.converter.are_equal(choice, &value))
        {
            return Err(ParseError::InvalidChoice {
                names: self.error_name(),
                value: self.display(&value),
                choices: self.displayed_choices(),
            });
        }

        Ok(value)
    }

    /// Check the declaration is coherent on its own.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.names.is_empty() {
            return Err(ConfigError::NoNames);
        }

        if self.is_positional() {
            if self.names.len() > 1 {
                return Err(ConfigError::MultiplePositionalNames(self.names[0].clone()));
            }

            if self.required {
                return Err(ConfigError::RequiredPositional);
            }

            if self.action != Action::Store {
                return Err(ConfigError::PositionalAction {
                    names: self.joined_names(),
                    action: self.action,
                });
            }
        } else if let Some(name) = self
            .names
            .iter()
            .find(|name| !name.starts_with(PREFIX) || name.len() < 2)
        {
            return Err(ConfigError::InvalidOptionName(name.clone()));
        }

        match self.nargs {
            Some(Nargs::Precisely(0)) => {
                return Err(ConfigError::ZeroNargs(self.joined_names()));
            }
            Some(_) if !self.action.expects_argument() => {
                return Err(ConfigError::NargsForAction {
                    names: self.joined_names(),
                    action: self.action,
                });
            }
            _ => {}
        };

        if let Some((type_id, type_name)) = &self.choices_type {
            if *type_id != self.converter.value_type_id() {
                return Err(ConfigError::ChoicesType {
                    names: self.joined_names(),
                    choices: *type_name,
                    argument: self.converter.type_name(),
                });
            }
        }

        Ok(())
    }
}

use std::env;

use crate::api::{ArgumentSpec, ParsedArguments};
use crate::constant::*;
use crate::matcher::GroupId;
use crate::model::{Action, Handle};
use crate::parser::{
    ConfigError, ConsoleInterface, Error, ParseResult, ParseUnit, Parser, Printer, UserInterface,
};

/// The argument parser.
///
/// Declare arguments with [`ArgumentParser::add_argument`], then parse with one of the `parse_*` methods.
/// A `-h/--help` argument is declared automatically (see [`ArgumentParser::add_help`]).
///
/// ### Example
/// ```
/// # use argwise_builder as argwise;
/// use argwise::{Action, ArgumentParser, Handle, Nargs};
///
/// let mut parser = ArgumentParser::new()
///     .prog("summer")
///     .description("Sum some numbers.")
///     .handle(Handle::NONE);
/// parser
///     .add_argument(["numbers"])
///     .type_::<i64>()
///     .nargs(Nargs::AtLeastOne);
/// parser
///     .add_argument(["-v", "--verbose"])
///     .action(Action::StoreTrue);
///
/// let parsed = parser.parse_tokens(["1", "2", "-v"]).unwrap();
/// assert_eq!(parsed.get_value::<Vec<i64>>("numbers").unwrap(), vec![1, 2]);
/// assert!(parsed.get_value::<bool>("verbose").unwrap());
/// ```
pub struct ArgumentParser {
    prog: Option<String>,
    usage: Option<String>,
    description: Option<String>,
    epilog: Option<String>,
    handle: Handle,
    specs: Vec<ArgumentSpec>,
    groups: usize,
    auto_help: bool,
}

impl Default for ArgumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentParser {
    /// Create an argument parser, with the automatic `-h/--help` argument.
    pub fn new() -> Self {
        let mut parser = Self {
            prog: None,
            usage: None,
            description: None,
            epilog: None,
            handle: Handle::default(),
            specs: Vec::default(),
            groups: 0,
            auto_help: false,
        };
        parser.insert_help();
        parser
    }

    /// Set the program name, as shown in the usage.
    ///
    /// When not set, the name is taken from the executable path passed to [`ArgumentParser::parse_args`], and is empty until then.
    pub fn prog(mut self, prog: impl Into<String>) -> Self {
        self.prog.replace(prog.into());
        self
    }

    /// Replace the generated usage line.
    /// `{prog}` is substituted with the program name.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage.replace(usage.into());
        self
    }

    /// Document the program; shown after the usage in the help message.
    /// `{prog}` is substituted with the program name.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Shown at the end of the help message.
    /// `{prog}` is substituted with the program name.
    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog.replace(epilog.into());
        self
    }

    /// Whether to declare the automatic `-h/--help` argument (the default is `true`).
    ///
    /// ### Example
    /// ```
    /// # use argwise_builder as argwise;
    /// use argwise::{ArgumentParser, Handle};
    ///
    /// let mut parser = ArgumentParser::new()
    ///     .add_help(false)
    ///     .handle(Handle::NONE);
    /// parser.add_argument(["-h", "--height"]).type_::<u32>();
    ///
    /// let parsed = parser.parse_tokens(["-h", "180"]).unwrap();
    /// assert_eq!(parsed.get_value::<u32>("height").unwrap(), 180);
    /// ```
    pub fn add_help(mut self, add: bool) -> Self {
        if add && !self.auto_help {
            self.insert_help();
        } else if !add && self.auto_help {
            self.specs.remove(0);
            self.auto_help = false;
        }

        self
    }

    /// Choose which outcomes the parser handles by itself (see [`Handle`]).
    pub fn handle(mut self, handle: Handle) -> Self {
        self.handle = handle;
        self
    }

    /// Declare an argument.
    ///
    /// Names starting with `-` declare an optional argument, otherwise a single name declares a positional argument.
    /// Positional arguments match in the order they are declared.
    ///
    /// ### Example
    /// ```
    /// # use argwise_builder as argwise;
    /// use argwise::{ArgumentParser, Handle};
    ///
    /// let mut parser = ArgumentParser::new().handle(Handle::NONE);
    /// parser.add_argument(["a"]).type_::<u32>();
    /// parser.add_argument(["b"]).type_::<u32>();
    ///
    /// let parsed = parser.parse_tokens(["1", "2"]).unwrap();
    /// assert_eq!(parsed.get_value::<u32>("a").unwrap(), 1);
    /// assert_eq!(parsed.get_value::<u32>("b").unwrap(), 2);
    /// ```
    pub fn add_argument<I, S>(&mut self, names: I) -> &mut ArgumentSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(names, None)
    }

    /// Declare a group of optional arguments of which at most one may be matched.
    ///
    /// ### Example
    /// ```
    /// # use argwise_builder as argwise;
    /// use argwise::{Action, ArgumentParser, Handle};
    ///
    /// let mut parser = ArgumentParser::new().handle(Handle::NONE);
    /// let mut group = parser.add_mutually_exclusive_group();
    /// group.add_argument(["--quiet"]).action(Action::StoreTrue);
    /// group.add_argument(["--loud"]).action(Action::StoreTrue);
    ///
    /// let error = parser.parse_tokens(["--quiet", "--loud"]).unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "argument --loud: not allowed with argument --quiet"
    /// );
    /// ```
    pub fn add_mutually_exclusive_group(&mut self) -> MutuallyExclusiveGroup<'_> {
        let id = self.groups;
        self.groups += 1;
        MutuallyExclusiveGroup { parser: self, id }
    }

    /// Parse the program arguments, where the first one is the executable path.
    ///
    /// When the program name isn't set, it is taken from the executable path.
    ///
    /// Depending on the [`Handle`], help/version requests and parse errors are reported to the console before exiting the process.
    /// Declaration mistakes are always returned as [`Error::Config`].
    pub fn parse_args<I, S>(&mut self, argv: I) -> Result<ParsedArguments, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut argv = argv.into_iter();

        if let Some(path) = argv.next() {
            if self.prog.is_none() {
                self.prog.replace(extract_filename(path.as_ref()).to_string());
            }
        }

        self.parse_tokens(argv)
    }

    /// Parse the Cli tokens (without an executable path).
    ///
    /// Depending on the [`Handle`], help/version requests and parse errors are reported to the console before exiting the process.
    /// Declaration mistakes are always returned as [`Error::Config`].
    pub fn parse_tokens<I, S>(&self, tokens: I) -> Result<ParsedArguments, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        let printer = Printer::terminal(
            &self.specs,
            self.program(),
            self.usage.as_deref(),
            self.description.as_deref(),
            self.epilog.as_deref(),
        );

        match self.invoke(&tokens, printer, &ConsoleInterface::default())? {
            ParseResult::Complete(parsed) => Ok(parsed),
            ParseResult::Failed(error) => Err(Error::Parse(error)),
            ParseResult::Exit(code) => std::process::exit(code),
        }
    }

    /// Parse the Cli [`env::args`].
    pub fn parse_env(&mut self) -> Result<ParsedArguments, Error> {
        self.parse_args(env::args())
    }

    /// The usage message.
    pub fn format_usage(&self) -> String {
        self.printer().format_usage()
    }

    /// The help message.
    ///
    /// ### Example
    /// ```
    /// # use argwise_builder as argwise;
    /// use argwise::ArgumentParser;
    ///
    /// let mut parser = ArgumentParser::new().prog("program");
    /// parser.add_argument(["-n", "--name"]).help("who to greet");
    ///
    /// assert_eq!(
    ///     parser.format_help(),
    ///     r#"usage: program [-h] [-n NAME]
    ///
    /// optional arguments:
    ///   -h, --help            show this help message and exit
    ///   -n NAME, --name NAME  who to greet"#
    /// );
    /// ```
    pub fn format_help(&self) -> String {
        self.printer().format_help()
    }

    /// The version message, when a [`Action::Version`] argument declares one.
    pub fn format_version(&self) -> Option<String> {
        self.printer().format_version()
    }

    fn insert_help(&mut self) {
        let mut help = ArgumentSpec::new(vec![HELP_SHORT.to_string(), HELP_NAME.to_string()], None);
        help.action(Action::Help).help(HELP_MESSAGE);
        self.specs.insert(0, help);
        self.auto_help = true;
    }

    fn push<I, S>(&mut self, names: I, group: Option<GroupId>) -> &mut ArgumentSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.specs.len();
        self.specs.push(ArgumentSpec::new(
            names.into_iter().map(Into::into).collect(),
            group,
        ));
        &mut self.specs[index]
    }

    fn program(&self) -> String {
        self.prog.clone().unwrap_or_default()
    }

    fn printer(&self) -> Printer<'_> {
        Printer::new(
            &self.specs,
            self.program(),
            self.usage.as_deref(),
            self.description.as_deref(),
            self.epilog.as_deref(),
            None,
        )
    }

    fn invoke(
        &self,
        tokens: &[&str],
        printer: Printer<'_>,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<ParseResult, ConfigError> {
        let parser = Parser::new(&self.specs)?;
        Ok(ParseUnit::new(parser, printer, self.handle).invoke(tokens, user_interface))
    }
}

/// A group of mutually exclusive optional arguments.
///
/// Obtained from [`ArgumentParser::add_mutually_exclusive_group`].
pub struct MutuallyExclusiveGroup<'a> {
    parser: &'a mut ArgumentParser,
    id: GroupId,
}

impl<'a> MutuallyExclusiveGroup<'a> {
    /// Declare an argument as a member of this group.
    /// See [`ArgumentParser::add_argument`].
    pub fn add_argument<I, S>(&mut self, names: I) -> &mut ArgumentSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parser.push(names, Some(self.id))
    }
}

/// The file name of an executable path.
fn extract_filename(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

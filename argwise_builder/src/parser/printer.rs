use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::ArgumentSpec;
use crate::constant::*;
use crate::model::{Action, Nargs};
use crate::parser::interface::{chunk, MINIMUM_MIDDLE_WIDTH};

// The column at which argument help descriptions start.
const HELP_COLUMN: usize = 24;
const INDENT: &str = "  ";

/// Renders the usage, help and version messages of a parser.
pub(crate) struct Printer<'a> {
    specs: &'a [ArgumentSpec],
    prog: String,
    usage: Option<&'a str>,
    description: Option<&'a str>,
    epilog: Option<&'a str>,
    terminal_width: Option<usize>,
}

impl<'a> Printer<'a> {
    /// A printer which wraps the help descriptions to the terminal width, when one is available.
    pub(crate) fn terminal(
        specs: &'a [ArgumentSpec],
        prog: impl Into<String>,
        usage: Option<&'a str>,
        description: Option<&'a str>,
        epilog: Option<&'a str>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(specs, prog, usage, description, epilog, terminal_width)
    }

    pub(crate) fn new(
        specs: &'a [ArgumentSpec],
        prog: impl Into<String>,
        usage: Option<&'a str>,
        description: Option<&'a str>,
        epilog: Option<&'a str>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            specs,
            prog: prog.into(),
            usage,
            description,
            epilog,
            terminal_width,
        }
    }

    pub(crate) fn format_usage(&self) -> String {
        if let Some(usage) = self.usage {
            return format!("usage: {}", self.replace_prog(usage));
        }

        let line = format!(
            "{}{}{}",
            self.prog,
            self.usage_optionals(),
            self.usage_positionals()
        );
        format!("usage: {}", line.trim_start())
    }

    pub(crate) fn format_help(&self) -> String {
        let mut message = self.format_usage();
        let positionals = self.help_positionals();
        let optionals = self.help_optionals();

        if let Some(description) = self.description {
            message.push_str("\n\n");
            message.push_str(&self.replace_prog(description));
        }

        if !positionals.is_empty() {
            message.push_str("\n\npositional arguments:");
            message.push_str(&positionals);
        }

        if !optionals.is_empty() {
            message.push_str("\n\noptional arguments:");
            message.push_str(&optionals);
        }

        if let Some(epilog) = self.epilog {
            message.push_str("\n\n");
            message.push_str(&self.replace_prog(epilog));
        }

        message
    }

    /// The version message, if any version argument declares one.
    /// When several do, the last declared wins.
    pub(crate) fn format_version(&self) -> Option<String> {
        self.specs
            .iter()
            .rev()
            .filter(|spec| spec.action_kind() == Action::Version)
            .find_map(|spec| spec.version_text())
            .map(|version| self.replace_prog(version))
    }

    fn replace_prog(&self, text: &str) -> String {
        text.replace(PROG_PLACEHOLDER, &self.prog)
    }

    fn optionals(&self) -> Vec<&'a ArgumentSpec> {
        self.specs
            .iter()
            .filter(|spec| !spec.is_positional())
            .collect()
    }

    fn usage_positionals(&self) -> String {
        let mut usage = String::default();

        for spec in self.specs.iter().filter(|spec| spec.is_positional()) {
            if spec.nargs_kind().is_some() {
                usage.push_str(&format_nargs(spec));
            } else {
                usage.push(' ');
                usage.push_str(&format_arg(spec));
            }
        }

        usage
    }

    fn usage_optionals(&self) -> String {
        let optionals = self.optionals();
        let mut usage = String::default();

        for (i, spec) in optionals.iter().enumerate() {
            let previous = i.checked_sub(1).and_then(|j| optionals.get(j));
            let next = optionals.get(i + 1);

            if spec.is_required() {
                usage.push(' ');
            } else if previous.is_some_and(|p| share_group(spec, p)) {
                usage.push_str(" | ");
            } else {
                usage.push_str(" [");
            }

            usage.push_str(first_name(spec));

            if spec.nargs_kind().is_some() {
                usage.push_str(&format_nargs(spec));
            } else if spec.action_kind().expects_argument() {
                usage.push(' ');
                usage.push_str(&format_arg(spec));
            }

            if !spec.is_required() && !next.is_some_and(|n| share_group(spec, n)) {
                usage.push(']');
            }
        }

        usage
    }

    fn help_positionals(&self) -> String {
        let mut help = String::default();

        for spec in self.specs.iter().filter(|spec| spec.is_positional()) {
            let line = format!("{INDENT}{}", format_arg(spec));
            help.push('\n');
            help.push_str(&self.help_line(line, spec));
        }

        help
    }

    fn help_optionals(&self) -> String {
        let mut help = String::default();

        for spec in self.optionals() {
            let formatted = format_values(spec);
            let names: Vec<String> = spec
                .names()
                .iter()
                .map(|name| format!("{name}{formatted}"))
                .collect();
            let line = format!("{INDENT}{}", names.join(", "));
            help.push('\n');
            help.push_str(&self.help_line(line, spec));
        }

        help
    }

    fn help_line(&self, mut line: String, spec: &ArgumentSpec) -> String {
        let description = match spec.help_text() {
            Some(help) if !help.is_empty() => self.replace_prog(help),
            _ => return line,
        };

        let length = line.chars().count();
        if length < HELP_COLUMN - 1 {
            line.push_str(&" ".repeat(HELP_COLUMN - length));
        } else {
            line.push('\n');
            line.push_str(&" ".repeat(HELP_COLUMN));
        }

        line.push_str(&self.wrap(&description));
        line
    }

    fn wrap(&self, description: &str) -> String {
        match self.terminal_width {
            Some(terminal_width) => {
                let width = std::cmp::max(
                    terminal_width.saturating_sub(HELP_COLUMN),
                    MINIMUM_MIDDLE_WIDTH,
                );
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Wrapping help at {width} for terminal width {terminal_width}.");
                }
                let separator = format!("\n{}", " ".repeat(HELP_COLUMN));
                chunk(description, width).join(&separator)
            }
            None => description.to_string(),
        }
    }
}

fn first_name(spec: &ArgumentSpec) -> &str {
    spec.names().first().map(String::as_str).unwrap_or_default()
}

fn share_group(a: &ArgumentSpec, b: &ArgumentSpec) -> bool {
    matches!((a.group(), b.group()), (Some(x), Some(y)) if x == y)
}

fn format_arg(spec: &ArgumentSpec) -> String {
    let choices = spec.displayed_choices();

    if choices.is_empty() {
        spec.metavar_name()
    } else {
        format!("{{{}}}", choices.join(","))
    }
}

fn format_nargs(spec: &ArgumentSpec) -> String {
    let arg = format_arg(spec);

    match spec.nargs_kind() {
        Some(Nargs::Precisely(n)) => format!(" {arg}").repeat(n),
        Some(Nargs::AtMostOne) => format!(" [{arg}]"),
        Some(Nargs::Any) => format!(" [{arg} [{arg} ...]]"),
        Some(Nargs::AtLeastOne) => format!(" {arg} [{arg} ...]"),
        None => String::default(),
    }
}

// How the values of an optional are shown next to each of its names.
fn format_values(spec: &ArgumentSpec) -> String {
    if !spec.action_kind().expects_argument() {
        String::default()
    } else if spec.nargs_kind().is_some() {
        format_nargs(spec)
    } else {
        format!(" {}", format_arg(spec))
    }
}

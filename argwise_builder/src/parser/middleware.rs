use crate::api::ParsedArguments;
use crate::model::Handle;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

/// A single parse, bundled with what it needs to report help, version and errors.
pub(crate) struct ParseUnit<'a> {
    parser: Parser<'a>,
    printer: Printer<'a>,
    handle: Handle,
}

#[derive(Debug)]
pub(crate) enum ParseResult {
    Complete(ParsedArguments),
    Failed(ParseError),
    Exit(i32),
}

impl<'a> ParseUnit<'a> {
    pub(crate) fn new(parser: Parser<'a>, printer: Printer<'a>, handle: Handle) -> Self {
        Self {
            parser,
            printer,
            handle,
        }
    }

    /// Parse the tokens, applying the handle policy to the outcome.
    pub(crate) fn invoke(
        self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> ParseResult {
        let ParseUnit {
            parser,
            printer,
            handle,
        } = self;

        match parser.consume(tokens) {
            Ok(Outcome::Parsed(parsed)) => ParseResult::Complete(parsed),
            Ok(Outcome::HelpRequested(parsed)) => {
                if handle.contains(Handle::HELP) {
                    user_interface.print(printer.format_help());
                    ParseResult::Exit(0)
                } else {
                    ParseResult::Complete(parsed)
                }
            }
            Ok(Outcome::VersionRequested(parsed)) => {
                if handle.contains(Handle::VERSION) {
                    user_interface.print(printer.format_version().unwrap_or_default());
                    ParseResult::Exit(0)
                } else {
                    ParseResult::Complete(parsed)
                }
            }
            Err(error) => {
                if handle.contains(Handle::ERRORS) {
                    user_interface.print_error(&error);
                    user_interface.print(printer.format_help());
                    ParseResult::Exit(1)
                } else {
                    ParseResult::Failed(error)
                }
            }
        }
    }
}

pub(crate) const PREFIX: char = '-';
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SEPARATOR: &str = "--";
pub(crate) const EXPLICIT_DELIMITER: char = '=';

pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_NAME: &str = "--help";
pub(crate) const HELP_MESSAGE: &str = "show this help message and exit";
pub(crate) const VERSION_MESSAGE: &str = "show program's version number and exit";

pub(crate) const PROG_PLACEHOLDER: &str = "{prog}";

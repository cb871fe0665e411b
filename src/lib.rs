//! `argwise` is an argparse style command line parser for Rust.
//!
//! Arguments are declared at runtime, parsed into typed values, and queried by name.
//! `argwise` aims for the following:
//! * *Familiar Cli semantics*:
//! Tokens are matched the way Python's `argparse` matches them, including short option bundles (`-abc`), joined values (`--key=value`, `-kvalue`), the `--` separator and negative numbers.
//! * *Typed values*:
//! Each argument declares its type `T` (via [`prelude::Converter`]), and the parse result hands back `T` or `Vec<T>`.
//! * *Exact errors*:
//! The message of every [`ParseError`] is fixed, so a Cli built with `argwise` reports problems predictably.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] [--max] N [N ...]
//!
//! Process some integers.
//!
//! positional arguments:
//!   N                     an integer for the accumulator
//!
//! optional arguments:
//!   -h, --help            show this help message and exit
//!   --max                 find the max of the integers (default: sum them)
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer 1 blah
//! argument integers: invalid value: 'blah'
//! usage: summer [-h] [--max] N [N ...]
//! ..
//! ```
//!
//! # Declaring arguments
//! Call [`ArgumentParser::add_argument`] with the names of the argument, then configure the returned [`ArgumentSpec`].
//! An argument whose first name starts with `-` is *optional*, and is matched by name.
//! Otherwise the argument is *positional* (it must have exactly one name), and positionals are matched in declaration order.
//!
//! Each argument has an [`Action`], deciding what an occurrence on the Cli does:
//! ```console
//! Action      | Consumes values | Present                        | Absent
//! -----------------------------------------------------------------------------------
//! Store       | yes             | T or Vec<T>, last one wins     | default, or none
//! Append      | yes             | Vec<T>, all occurrences joined | default, or none
//! StoreTrue   | no              | true                           | false
//! StoreFalse  | no              | false                          | true
//! StoreConst  | no              | the const                      | default, or none
//! Count       | no              | usize occurrences              | default, or none
//! Help        | no              | true                           | false
//! Version     | no              | true                           | false
//! ```
//!
//! Value consuming actions take [`Nargs`] to declare how many values each occurrence consumes:
//! ```console
//! Nargs          | Values     | Usage                 | Stored as
//! -----------------------------------------------------------------------
//! (none)         | precisely 1| VALUE                 | T
//! Precisely(n)   | precisely n| VALUE .. VALUE        | Vec<T>
//! AtMostOne      | 0 or 1     | [VALUE]               | T, or the const when no value
//! Any            | any amount | [VALUE [VALUE ...]]   | Vec<T>
//! AtLeastOne     | at least 1 | VALUE [VALUE ...]     | Vec<T>
//! ```
//!
//! A positional with `AtMostOne` or `Any` may be absent; every other positional is required.
//! Optionals are only required when declared so with [`ArgumentSpec::required`].
//!
//! ### Mutually exclusive arguments
//! ```no_run
#![doc = include_str!("../demos/conflicting.rs")]
//! ```
//!
//! ### Custom types
//! Any type implementing [`prelude::Converter`] may be used as an argument type.
//! ```no_run
#![doc = include_str!("../demos/custom_type.rs")]
//! ```
//!
//! # Cli Semantics
//! * An optional is matched by its exact name.
//! A long name may carry its first value joined with `=` (`--key=123` is `--key 123`).
//! * Single character short names may be bundled: `-abc` is `-a -b -c`.
//! The first value consuming option in a bundle takes the rest of the token as its value, so `-ak123` is `-a -k 123`.
//! A bundle applies completely or not at all; if any character fails to resolve, the whole token is unrecognised.
//! * Values are consumed greedily, up to the argument's `Nargs`.
//! A run of values ends at the next option-looking token, so `a b --key value c` matches `c` as a new run.
//! * A token starting with `-` looks like an option, unless it is a negative number (`-5`, `-1.5`) and no declared option name looks like a negative number.
//! * After the `--` separator, every token is a value.
//! * A help or version argument stops the parse immediately; missing and unrecognised arguments are then not reported.
//!
//! # Errors & Handling
//! Parse errors are reported as [`ParseError`], and mistakes in the declarations as [`ConfigError`] (both wrapped by [`Error`]).
//! The [`Handle`] of the parser decides which outcomes are handled by `argwise` itself:
//! * [`Handle::HELP`]: a help request prints the help message and exits with `0`.
//! * [`Handle::VERSION`]: a version request prints the version message and exits with `0`.
//! * [`Handle::ERRORS`]: a parse error prints the error followed by the help message and exits with `1`.
//!
//! By default, all three are handled.
//! Anything not handled is returned to the caller instead.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events describing how tokens are matched.
pub use argwise_builder::*;

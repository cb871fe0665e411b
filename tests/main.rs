use argwise::prelude::*;
use argwise::{
    Action, ArgumentParser, ConfigError, Error, Handle, Nargs, ParseError, ParsedArguments,
    QueryError,
};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use rstest::rstest;

fn new_parser() -> ArgumentParser {
    ArgumentParser::new().prog("program").handle(Handle::NONE)
}

fn error_message(parser: &ArgumentParser, tokens: &[&str]) -> String {
    parser.parse_tokens(tokens).unwrap_err().to_string()
}

#[test]
fn positional_value() {
    let mut parser = new_parser();
    parser.add_argument(["p1"]);

    let parsed = parser.parse_tokens(["v1"]).unwrap();

    assert_eq!(parsed.get_value::<String>("p1").unwrap(), "v1");
}

#[test]
fn positional_missing_error() {
    let mut parser = new_parser();
    parser.add_argument(["p1"]);

    assert_eq!(
        error_message(&parser, &[]),
        "the following arguments are required: p1"
    );
}

#[test]
fn option_without_value_error() {
    let mut parser = new_parser();
    parser.add_argument(["-o"]);

    assert_eq!(
        error_message(&parser, &["-o"]),
        "argument -o: expected one argument"
    );
}

#[test]
fn option_invalid_choice() {
    let mut parser = new_parser();
    parser
        .add_argument(["-o"])
        .choices(["a".to_string(), "b".to_string()]);

    assert_eq!(
        error_message(&parser, &["-o", "c"]),
        "argument -o: invalid choice: \"c\" (choose from \"a\", \"b\")"
    );
}

#[rstest]
#[case(vec!["-o", "a"], "a")]
#[case(vec!["-o", "b"], "b")]
#[case(vec!["-ob"], "b")]
#[case(vec!["--opt=a"], "a")]
fn option_valid_choice(#[case] tokens: Vec<&str>, #[case] expected: &str) {
    let mut parser = new_parser();
    parser
        .add_argument(["-o", "--opt"])
        .choices(["a".to_string(), "b".to_string()]);
    parser.add_argument(["-n"]).type_::<u8>().choices([1u8, 2, 3]);

    let parsed = parser.parse_tokens(tokens).unwrap();

    assert_eq!(parsed.get_value::<String>("opt").unwrap(), expected);
    assert!(parsed.get("n").unwrap().is_none());
}

#[test]
fn mutually_exclusive_conflict() {
    let mut parser = new_parser();
    let mut group = parser.add_mutually_exclusive_group();
    group.add_argument(["-a"]);
    group.add_argument(["-b"]);

    assert_eq!(
        error_message(&parser, &["-a", "x", "-b", "y"]),
        "argument -b: not allowed with argument -a"
    );
}

#[test]
fn excess_positional_unrecognised() {
    let mut parser = new_parser();
    parser.add_argument(["p1"]);

    assert_eq!(
        error_message(&parser, &["v1", "v2"]),
        "unrecognised arguments: v2"
    );
}

#[test]
fn bundled_flag_and_joined_value() {
    let mut parser = new_parser();
    parser.add_argument(["-a"]).action(Action::StoreTrue);
    parser.add_argument(["-o"]);

    let parsed = parser.parse_tokens(["-aovalue"]).unwrap();

    assert!(parsed.get_value::<bool>("a").unwrap());
    assert_eq!(parsed.get_value::<String>("o").unwrap(), "value");
}

#[test]
fn missing_before_unrecognised() {
    let mut parser = new_parser();
    parser.add_argument(["-r", "--req"]).required(true);
    parser.add_argument(["p1"]);

    assert_eq!(
        error_message(&parser, &["--unknown"]),
        "the following arguments are required: -r/--req p1"
    );
}

fn summarize(parsed: &ParsedArguments) -> (u32, bool, String, String, String) {
    (
        parsed.get_value("number").unwrap(),
        parsed.get_value("flag").unwrap(),
        parsed.get_value("output").unwrap(),
        parsed.get_value("first").unwrap(),
        parsed.get_value("second").unwrap(),
    )
}

#[test]
fn order_independence() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["-n", "--number"]).type_::<u32>();
    parser.add_argument(["--flag"]).action(Action::StoreTrue);
    parser.add_argument(["-o", "--output"]);
    parser.add_argument(["first"]);
    parser.add_argument(["second"]);
    let expected = (
        5,
        true,
        "x".to_string(),
        "pa".to_string(),
        "pb".to_string(),
    );
    let mut rng = thread_rng();

    for _ in 0..50 {
        let mut units: Vec<Vec<&str>> = vec![vec!["-n", "5"], vec!["--flag"], vec!["-o", "x"]];
        units.shuffle(&mut rng);
        // The positionals keep their relative order.
        let first = rng.gen_range(0..=units.len());
        units.insert(first, vec!["pa"]);
        let second = rng.gen_range(first + 1..=units.len());
        units.insert(second, vec!["pb"]);
        let tokens: Vec<&str> = units.into_iter().flatten().collect();

        // Execute
        let parsed = parser.parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(summarize(&parsed), expected, "{tokens:?}");
    }
}

#[rstest]
#[case(vec!["-ab"])]
#[case(vec!["-ba"])]
#[case(vec!["-a", "-b"])]
#[case(vec!["-b", "-a"])]
fn bundled_flags(#[case] tokens: Vec<&str>) {
    let mut parser = new_parser();
    parser.add_argument(["-a"]).action(Action::StoreTrue);
    parser.add_argument(["-b"]).action(Action::StoreTrue);
    parser.add_argument(["-c"]).action(Action::StoreTrue);

    let parsed = parser.parse_tokens(tokens).unwrap();

    assert!(parsed.get_value::<bool>("a").unwrap());
    assert!(parsed.get_value::<bool>("b").unwrap());
    assert!(!parsed.get_value::<bool>("c").unwrap());
}

#[rstest]
#[case(None, vec!["--name=abc"], vec!["--name", "abc"])]
#[case(Some(Nargs::Precisely(2)), vec!["--name=a", "b"], vec!["--name", "a", "b"])]
#[case(Some(Nargs::AtLeastOne), vec!["--name=a", "b", "c"], vec!["--name", "a", "b", "c"])]
#[case(Some(Nargs::AtMostOne), vec!["--name=a=b"], vec!["--name", "a=b"])]
fn joined_long_option(
    #[case] nargs: Option<Nargs>,
    #[case] joined: Vec<&str>,
    #[case] separate: Vec<&str>,
) {
    // Setup
    let mut parser = new_parser();
    let spec = parser.add_argument(["--name"]);
    if let Some(nargs) = nargs {
        spec.nargs(nargs);
    }

    // Execute
    let joined = parser.parse_tokens(joined).unwrap();
    let separate = parser.parse_tokens(separate).unwrap();

    // Verify
    if matches!(nargs, None | Some(Nargs::AtMostOne)) {
        assert_eq!(
            joined.get_value::<String>("name").unwrap(),
            separate.get_value::<String>("name").unwrap()
        );
    } else {
        assert_eq!(
            joined.get_value::<Vec<String>>("name").unwrap(),
            separate.get_value::<Vec<String>>("name").unwrap()
        );
    }
}

#[rstest]
#[case(vec!["--", "-a", "--b"], false, vec!["-a", "--b"])]
#[case(vec!["-a", "--", "-a"], true, vec!["-a"])]
#[case(vec!["--", "x", "--"], false, vec!["x", "--"])]
#[case(vec!["--"], false, vec![])]
fn separator(#[case] tokens: Vec<&str>, #[case] expected_a: bool, #[case] expected: Vec<&str>) {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["-a"]).action(Action::StoreTrue);
    parser.add_argument(["values"]).nargs(Nargs::Any);

    // Execute
    let parsed = parser.parse_tokens(tokens).unwrap();

    // Verify
    assert_eq!(parsed.get_value::<bool>("a").unwrap(), expected_a);
    assert_eq!(
        parsed.get_value::<Vec<String>>("values").unwrap(),
        expected
            .into_iter()
            .map(String::from)
            .collect::<Vec<String>>()
    );
}

#[test]
fn negative_numbers() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["-x"]).type_::<i32>();
    parser.add_argument(["value"]).type_::<f64>();

    // Execute
    let parsed = parser.parse_tokens(["-x", "-3", "-1.5"]).unwrap();

    // Verify
    assert_eq!(parsed.get_value::<i32>("x").unwrap(), -3);
    assert_eq!(parsed.get_value::<f64>("value").unwrap(), -1.5);
}

#[test]
fn negative_number_options() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["-1"]).action(Action::StoreTrue).dest("one");
    parser.add_argument(["value"]).nargs(Nargs::AtMostOne);

    // Execute
    let parsed = parser.parse_tokens(["-1"]).unwrap();

    // Verify
    assert!(parsed.get_value::<bool>("one").unwrap());
    assert!(parsed.get("value").unwrap().is_none());
    assert_eq!(
        error_message(&parser, &["-2"]),
        "unrecognised arguments: -2"
    );
}

#[test]
fn reparse_does_not_leak() {
    // Setup
    let mut parser = new_parser();
    let mut group = parser.add_mutually_exclusive_group();
    group.add_argument(["-a"]);
    group.add_argument(["-b"]);
    parser.add_argument(["-v"]).action(Action::Count);
    parser.add_argument(["-l"]).action(Action::Append).type_::<u8>();

    // Execute
    let first = parser.parse_tokens(["-a", "x", "-vv", "-l", "1"]).unwrap();
    let second = parser.parse_tokens(["-b", "y", "-v", "-l", "2"]).unwrap();
    let third = parser.parse_tokens(Vec::<&str>::new()).unwrap();

    // Verify
    assert_eq!(first.get_value::<String>("a").unwrap(), "x");
    assert!(first.get("b").unwrap().is_none());
    assert_eq!(first.get_value::<usize>("v").unwrap(), 2);
    assert_eq!(first.get_value::<Vec<u8>>("l").unwrap(), vec![1]);
    assert!(second.get("a").unwrap().is_none());
    assert_eq!(second.get_value::<String>("b").unwrap(), "y");
    assert_eq!(second.get_value::<usize>("v").unwrap(), 1);
    assert_eq!(second.get_value::<Vec<u8>>("l").unwrap(), vec![2]);
    assert!(third.get("v").unwrap().is_none());
    assert!(third.get("l").unwrap().is_none());
}

fn round_trip<T>(value: T) -> T
where
    T: Converter + std::fmt::Display,
{
    let mut parser = new_parser();
    parser.add_argument(["value"]).type_::<T>();
    let token = value.to_string();
    let parsed = parser.parse_tokens([token.as_str()]).unwrap();
    parsed.get_value::<T>("value").unwrap()
}

#[test]
fn round_trip_builtin() {
    let mut rng = thread_rng();

    for _ in 0..20 {
        let a: i64 = rng.gen();
        assert_eq!(round_trip(a), a);
        let b: u16 = rng.gen();
        assert_eq!(round_trip(b), b);
        let c: f64 = rng.gen_range(-1.0e6..1.0e6);
        assert_eq!(round_trip(c), c);
        let d: bool = rng.gen();
        assert_eq!(round_trip(d), d);
        let e: char = rng.gen_range('a'..='z');
        assert_eq!(round_trip(e), e);
    }

    assert_eq!(round_trip("hello world".to_string()), "hello world");
    assert_eq!(round_trip('-'), '-');
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Converter for Point {
    fn from_token(token: &str) -> Option<Self> {
        let (x, y) = token.split_once(',')?;
        Some(Point {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        })
    }

    fn to_display(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

#[test]
fn round_trip_custom() {
    // Setup
    let mut parser = new_parser();
    parser
        .add_argument(["start"])
        .type_::<Point>()
        .choices([Point { x: 0, y: 0 }, Point { x: 1, y: 1 }]);
    parser
        .add_argument(["end"])
        .type_::<Point>()
        .nargs(Nargs::AtMostOne)
        .default_(Point { x: 9, y: 9 });
    let start = Point { x: 1, y: 1 };

    // Execute
    let parsed = parser.parse_tokens([start.to_display()]).unwrap();

    // Verify
    assert_eq!(parsed.get_value::<Point>("start").unwrap(), start);
    assert_eq!(parsed.get_value::<Point>("end").unwrap(), Point { x: 9, y: 9 });
    assert_eq!(
        error_message(&parser, &["2,2"]),
        "argument start: invalid choice: 2,2 (choose from 0,0, 1,1)"
    );
    assert_eq!(
        error_message(&parser, &["0,0", "x"]),
        "argument end: invalid value: 'x'"
    );
}

#[test]
fn result_shapes() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["single"]).type_::<u8>();
    parser
        .add_argument(["pair"])
        .type_::<u8>()
        .nargs(Nargs::Precisely(2));
    parser.add_argument(["rest"]).type_::<u8>().nargs(Nargs::Any);
    parser
        .add_argument(["-m", "--maybe"])
        .nargs(Nargs::AtMostOne)
        .const_("constant".to_string())
        .default_("default".to_string());
    parser
        .add_argument(["--off"])
        .action(Action::StoreFalse);
    parser
        .add_argument(["--mode"])
        .action(Action::StoreConst)
        .const_(42u32);

    // Execute
    let parsed = parser
        .parse_tokens(["1", "2", "3", "-m", "--mode", "--off"])
        .unwrap();
    let absent = parser.parse_tokens(["1", "2", "3", "4", "5"]).unwrap();

    // Verify
    assert_eq!(parsed.get_value::<u8>("single").unwrap(), 1);
    assert_eq!(parsed.get_value::<Vec<u8>>("pair").unwrap(), vec![2, 3]);
    assert_eq!(parsed.get_value::<Vec<u8>>("rest").unwrap(), Vec::<u8>::default());
    assert_eq!(parsed.get_value::<String>("maybe").unwrap(), "constant");
    assert!(!parsed.get_value::<bool>("off").unwrap());
    assert_eq!(parsed.get_value::<u32>("mode").unwrap(), 42);

    assert_eq!(absent.get_value::<Vec<u8>>("rest").unwrap(), vec![4, 5]);
    assert_eq!(absent.get_value::<String>("maybe").unwrap(), "default");
    assert!(absent.get_value::<bool>("off").unwrap());
    assert!(!absent.is_present("mode").unwrap());
}

#[test]
fn query_errors() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["-n"]).type_::<u32>();

    // Execute
    let parsed = parser.parse_tokens(["-n", "3"]).unwrap();

    // Verify
    assert_eq!(
        parsed.get("missing").unwrap_err(),
        QueryError::NoSuchArgument("missing".to_string())
    );
    assert_eq!(
        parsed.get_value::<u32>("missing").unwrap_err().to_string(),
        "no such argument: 'missing'"
    );
    assert!(matches!(
        parsed.get_value::<String>("n").unwrap_err(),
        QueryError::WrongType { .. }
    ));
}

#[test]
fn config_errors() {
    let mut parser = new_parser();
    parser.add_argument(["-v"]).action(Action::StoreTrue).nargs(Nargs::Any);
    assert_eq!(
        parser.parse_tokens(Vec::<&str>::new()).unwrap_err(),
        Error::Config(ConfigError::NargsForAction {
            names: "-v".to_string(),
            action: Action::StoreTrue,
        })
    );

    let mut parser = new_parser();
    parser.add_argument(["--n"]).type_::<u32>().choices(["a".to_string()]);
    assert_eq!(
        error_message(&parser, &[]),
        "argument --n: choices of type 'alloc::string::String' do not match argument type 'u32'"
    );
}

#[test]
fn help_and_version_stop_the_parse() {
    // Setup
    let mut parser = new_parser();
    parser.add_argument(["required"]);
    parser.add_argument(["-n"]).type_::<u32>();
    parser
        .add_argument(["-V", "--version"])
        .action(Action::Version)
        .version("{prog} 2.0");

    // Execute
    let help = parser.parse_tokens(["-h", "--unknown"]).unwrap();
    let version = parser.parse_tokens(["--version"]).unwrap();
    let error = parser.parse_tokens(["-n", "x", "--help"]).unwrap_err();

    // Verify
    assert!(help.get_value::<bool>("help").unwrap());
    assert!(!help.get_value::<bool>("version").unwrap());
    assert!(version.get_value::<bool>("version").unwrap());
    assert!(version.get("required").unwrap().is_none());
    assert_eq!(
        error,
        Error::Parse(ParseError::InvalidValue {
            names: "-n".to_string(),
            token: "x".to_string(),
        })
    );
    assert_eq!(parser.format_version(), Some("program 2.0".to_string()));
}

#[test]
fn format_help() {
    // Setup
    let mut parser = ArgumentParser::new()
        .prog("program")
        .description("A program for {prog} things.")
        .epilog("Bye.");
    parser
        .add_argument(["square"])
        .type_::<i32>()
        .help("display a square of a given number");
    let mut group = parser.add_mutually_exclusive_group();
    group
        .add_argument(["-v", "--verbosity"])
        .type_::<u8>()
        .choices([0u8, 1, 2])
        .help("increase output verbosity");
    group
        .add_argument(["-q", "--quiet"])
        .action(Action::StoreTrue);

    // Execute
    let help = parser.format_help();

    // Verify
    assert_eq!(
        help,
        r#"usage: program [-h] [-v {0,1,2} | -q] square

A program for program things.

positional arguments:
  square                display a square of a given number

optional arguments:
  -h, --help            show this help message and exit
  -v {0,1,2}, --verbosity {0,1,2}
                        increase output verbosity
  -q, --quiet

Bye."#
    );
}

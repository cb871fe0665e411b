use argwise::{Action, ArgumentParser, Handle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut parser = ArgumentParser::new()
        .prog("calculator")
        .description("Apply an operation to two numbers.")
        .epilog("Division by zero is reported as an error by {prog}.")
        .handle(Handle::ERRORS_HELP_VERSION);
    parser
        .add_argument(["operation"])
        .choices(["add", "sub", "mul", "div"].map(String::from))
        .help("the operation to apply");
    parser
        .add_argument(["x"])
        .type_::<f64>()
        .help("the left operand");
    parser
        .add_argument(["y"])
        .type_::<f64>()
        .help("the right operand");
    parser
        .add_argument(["-v", "--verbosity"])
        .action(Action::Count)
        .help("increase output verbosity");
    parser
        .add_argument(["-p", "--precision"])
        .type_::<usize>()
        .default_(2usize)
        .help("decimal places to show (default: 2)");
    parser
        .add_argument(["--version"])
        .action(Action::Version)
        .version("{prog} 1.0.0");

    let parsed = parser.parse_env()?;
    let operation: String = parsed.get_value("operation")?;
    let x: f64 = parsed.get_value("x")?;
    let y: f64 = parsed.get_value("y")?;
    let precision: usize = parsed.get_value("precision")?;
    let verbosity = if parsed.is_present("verbosity")? {
        parsed.get_value::<usize>("verbosity")?
    } else {
        0
    };

    let answer = match operation.as_str() {
        "add" => x + y,
        "sub" => x - y,
        "mul" => x * y,
        _ => {
            if y == 0.0 {
                eprintln!("cannot divide {x} by zero");
                std::process::exit(1);
            }
            x / y
        }
    };

    match verbosity {
        0 => println!("{answer:.precision$}"),
        1 => println!("{operation}({x}, {y}) = {answer:.precision$}"),
        _ => println!("Applying '{operation}' to {x} and {y} gives {answer:.precision$}"),
    }

    Ok(())
}

use argwise::{Action, ArgumentParser, Nargs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut parser = ArgumentParser::new()
        .prog("summer")
        .description("Process some integers.");
    parser
        .add_argument(["integers"])
        .type_::<i64>()
        .nargs(Nargs::AtLeastOne)
        .metavar("N")
        .help("an integer for the accumulator");
    parser
        .add_argument(["--max"])
        .action(Action::StoreTrue)
        .help("find the max of the integers (default: sum them)");

    let parsed = parser.parse_env()?;
    let integers: Vec<i64> = parsed.get_value("integers")?;

    if parsed.get_value::<bool>("max")? {
        println!("Max: {}", integers.iter().max().copied().unwrap_or_default());
    } else {
        println!("Sum: {}", integers.iter().sum::<i64>());
    }

    Ok(())
}

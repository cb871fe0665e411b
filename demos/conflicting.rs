use argwise::{Action, ArgumentParser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut parser = ArgumentParser::new().description("calculate X to the power of Y");
    let mut group = parser.add_mutually_exclusive_group();
    group
        .add_argument(["-v", "--verbose"])
        .action(Action::StoreTrue);
    group.add_argument(["-q", "--quiet"]).action(Action::StoreTrue);
    parser.add_argument(["x"]).type_::<i32>().help("the base");
    parser.add_argument(["y"]).type_::<i32>().help("the exponent");

    let parsed = parser.parse_env()?;
    let base: i32 = parsed.get_value("x")?;
    let exponent: i32 = parsed.get_value("y")?;
    let answer = f64::from(base).powi(exponent);

    if parsed.get_value::<bool>("quiet")? {
        println!("{answer}");
    } else if parsed.get_value::<bool>("verbose")? {
        println!("{base} to the power {exponent} equals {answer}");
    } else {
        println!("{base}^{exponent} == {answer}");
    }

    Ok(())
}

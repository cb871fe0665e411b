use argwise::prelude::*;
use argwise::ArgumentParser;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Converter for Point {
    fn from_token(token: &str) -> Option<Self> {
        let (x, y) = token.split_once(',')?;
        Some(Point {
            x: x.trim().parse().ok()?,
            y: y.trim().parse().ok()?,
        })
    }

    fn to_display(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut parser = ArgumentParser::new().prog("distance");
    parser
        .add_argument(["start"])
        .type_::<Point>()
        .choices([Point { x: 0, y: 0 }, Point { x: 1, y: 1 }, Point { x: 2, y: 2 }])
        .help("where to start, as X,Y");
    parser
        .add_argument(["end"])
        .type_::<Point>()
        .help("where to end, as X,Y");

    let parsed = parser.parse_env()?;
    let start: Point = parsed.get_value("start")?;
    let end: Point = parsed.get_value("end")?;
    let distance = f64::from(end.x - start.x).hypot(f64::from(end.y - start.y));
    println!("The distance is {distance}");

    Ok(())
}

use crate::filter::YearRange;

/// One line of input from the interactive front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `<min> <max>` or a single `<year>`: move the slider.
    SetRange(YearRange),
    /// `all`: reset the slider to the full range.
    Reset,
    /// `json`: print the current view as JSON.
    Json,
    /// `help` or `?`.
    Help,
    /// `quit`, `exit` or `q`.
    Quit,
}

pub const HELP: &str = "\
commands:
  <min> <max>   show papers published between the two years (inclusive)
  <year>        show a single year
  all           show every year
  json          print the current view as JSON
  quit          exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(input: &str) -> Result<Option<Command>, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = match parts.as_slice() {
        [] => return Ok(None),
        ["all"] => Command::Reset,
        ["json"] => Command::Json,
        ["help"] | ["?"] => Command::Help,
        ["quit"] | ["exit"] | ["q"] => Command::Quit,
        [year] => Command::SetRange(YearRange::single(parse_year(year)?)),
        [min, max] => {
            let range = YearRange::new(parse_year(min)?, parse_year(max)?)
                .map_err(|e| e.to_string())?;
            Command::SetRange(range)
        }
        _ => return Err(format!("unrecognised input `{}`", input.trim())),
    };
    Ok(Some(command))
}

fn parse_year(raw: &str) -> Result<i32, String> {
    raw.parse()
        .map_err(|_| format!("`{}` is not a year", raw))
}

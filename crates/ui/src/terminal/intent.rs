use std::fmt;

/// A command typed at the quiz prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Pick the numbered choice (1-based).
    Choose(usize),
    /// Switch group; `None` clears the filter.
    Filter(Option<String>),
    Groups,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseIntentError {
    Empty,
    Unknown(String),
}

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIntentError::Empty => f.write_str("no command given"),
            ParseIntentError::Unknown(input) => {
                write!(f, "unknown command `{input}` (type h for help)")
            }
        }
    }
}

impl std::error::Error for ParseIntentError {}

/// Parse one input line.
///
/// # Errors
///
/// Returns `ParseIntentError` for blank lines and unrecognised commands.
pub fn parse_intent(line: &str) -> Result<Intent, ParseIntentError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseIntentError::Empty);
    }

    if let Ok(number) = line.parse::<usize>() {
        return Ok(Intent::Choose(number));
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command.to_ascii_lowercase().as_str() {
        "f" | "filter" => {
            let group = (!rest.is_empty()).then(|| rest.to_owned());
            Ok(Intent::Filter(group))
        }
        "g" | "groups" if rest.is_empty() => Ok(Intent::Groups),
        "h" | "help" | "?" if rest.is_empty() => Ok(Intent::Help),
        "q" | "quit" | "exit" if rest.is_empty() => Ok(Intent::Quit),
        _ => Err(ParseIntentError::Unknown(line.to_owned())),
    }
}

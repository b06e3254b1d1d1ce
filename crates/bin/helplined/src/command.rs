//! Parsing of the lines typed at the `helpline>` prompt.

use helpline_domain::id::ElementId;

pub const HELP: &str = "\
Commands:
  call N | copy N | fav N   act on card N (or type the id, e.g. call-3)
  clear                     clear the call history
  help                      show this text
  quit                      leave
";

/// What a typed line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press the element with this id.
    Press(ElementId),
    Help,
    Quit,
    /// Blank line: just redraw.
    Redraw,
}

impl Command {
    /// `call 3` and `call-3` both name the element `call-3`; anything not
    /// recognised as a keyword is taken as an element id.
    pub fn parse(line: &str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Self::Redraw,
            ["help" | "?"] => Self::Help,
            ["quit" | "exit" | "q"] => Self::Quit,
            [action, index] => Self::Press(ElementId::new(format!("{action}-{index}"))),
            _ => Self::Press(ElementId::new(words.join("-"))),
        }
    }
}

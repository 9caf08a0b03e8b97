//! Line commands understood by the terminal page.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add {
        title: String,
        description: String,
    },
    Toggle(i64),
    Delete(i64),
    Html,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                          reload and show todos
  add <title> [| <description>] create a todo
  toggle <id>                   flip a todo's completed state
  delete <id>                   delete a todo (asks first)
  html                          print the list markup
  quit                          leave";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match word {
        "list" | "ls" => Ok(Command::List),
        "add" => {
            // Validation of the title happens in the page, like a form submit.
            let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
            Ok(Command::Add {
                title: title.to_string(),
                description: description.to_string(),
            })
        }
        "toggle" => parse_id(rest).map(Command::Toggle),
        "delete" | "rm" => parse_id(rest).map(Command::Delete),
        "html" => Ok(Command::Html),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_id(text: &str) -> Result<i64, String> {
    text.parse().map_err(|_| format!("not a todo id: {text:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_splits_title_and_description() {
        assert_eq!(
            parse("add Buy milk | 2 litres").unwrap(),
            Command::Add {
                title: "Buy milk ".to_string(),
                description: " 2 litres".to_string(),
            }
        );
        assert_eq!(
            parse("add   ").unwrap(),
            Command::Add {
                title: String::new(),
                description: String::new(),
            }
        );
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse("toggle 12").unwrap(), Command::Toggle(12));
        assert_eq!(parse("rm 3").unwrap(), Command::Delete(3));
        assert!(parse("delete abc").is_err());
        assert!(parse("toggle").is_err());
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert!(parse("frobnicate").is_err());
        assert!(parse("   ").is_err());
        assert_eq!(parse(" quit ").unwrap(), Command::Quit);
    }
}

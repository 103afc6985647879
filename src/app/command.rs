//! Command parsing for the command line

use crate::app::input::{ActionKind, ShelfAction};
use crate::shelf::BookId;

/// Raw fields of `:add title | author | year [| done]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub title: String,
    pub author: String,
    pub year: String,
    pub is_complete: bool,
}

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a book: :add Dune | Herbert | 1965 | done
    Add(AddArgs),
    /// Show books whose title matches: :search <query>
    Search(String),
    /// Show every book again: :clear
    Clear,
    /// Toggle, delete or edit a book by id: :move <id>, :delete <id>, :edit <id>
    Book(ShelfAction),
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument could not be understood
    InvalidArgument { command: String, value: String },
}

/// Words accepted as the optional fourth `:add` field
const DONE_WORDS: &[&str] = &["done", "finished", "complete", "read", "yes"];

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "add" | "a" => parse_add(args),
        "search" | "s" | "find" => {
            if args.is_empty() {
                ParseResult::MissingArgument("search".to_string())
            } else {
                ParseResult::Ok(Command::Search(args.to_string()))
            }
        }
        "clear" | "all" => ParseResult::Ok(Command::Clear),
        "move" | "mv" | "toggle" => parse_book_action("move", ActionKind::Toggle, args),
        "delete" | "rm" | "remove" => parse_book_action("delete", ActionKind::Delete, args),
        "edit" | "e" => parse_book_action("edit", ActionKind::Edit, args),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

fn parse_add(args: &str) -> ParseResult {
    if args.is_empty() {
        return ParseResult::MissingArgument("add".to_string());
    }

    let fields: Vec<&str> = args.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [title, author, year] => ParseResult::Ok(Command::Add(AddArgs {
            title: title.to_string(),
            author: author.to_string(),
            year: year.to_string(),
            is_complete: false,
        })),
        [title, author, year, flag] => {
            let flag = flag.to_lowercase();
            if DONE_WORDS.contains(&flag.as_str()) {
                ParseResult::Ok(Command::Add(AddArgs {
                    title: title.to_string(),
                    author: author.to_string(),
                    year: year.to_string(),
                    is_complete: true,
                }))
            } else {
                ParseResult::InvalidArgument { command: "add".to_string(), value: flag }
            }
        }
        _ => ParseResult::InvalidArgument { command: "add".to_string(), value: args.to_string() },
    }
}

fn parse_book_action(name: &str, kind: ActionKind, args: &str) -> ParseResult {
    if args.is_empty() {
        return ParseResult::MissingArgument(name.to_string());
    }

    match args.parse::<BookId>() {
        Ok(id) => ParseResult::Ok(Command::Book(ShelfAction::new(kind, id))),
        Err(_) => {
            ParseResult::InvalidArgument { command: name.to_string(), value: args.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_command("q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("quit"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("Q"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_help_command() {
        assert!(matches!(parse_command("help"), ParseResult::Ok(Command::Help)));
        assert!(matches!(parse_command("?"), ParseResult::Ok(Command::Help)));
    }

    #[test]
    fn parse_add_command() {
        assert_eq!(
            parse_command("add War and Peace | Tolstoy | 1869"),
            ParseResult::Ok(Command::Add(AddArgs {
                title: "War and Peace".into(),
                author: "Tolstoy".into(),
                year: "1869".into(),
                is_complete: false,
            }))
        );
    }

    #[test]
    fn parse_add_completed_book() {
        match parse_command("add Dune|Herbert|1965|Done") {
            ParseResult::Ok(Command::Add(args)) => assert!(args.is_complete),
            other => panic!("Expected Add command, got {other:?}"),
        }
    }

    #[test]
    fn parse_add_keeps_empty_fields_for_validation() {
        match parse_command("add Dune | | 1965") {
            ParseResult::Ok(Command::Add(args)) => assert_eq!(args.author, ""),
            other => panic!("Expected Add command, got {other:?}"),
        }
    }

    #[test]
    fn parse_add_rejects_wrong_field_count() {
        assert!(matches!(parse_command("add Dune | Herbert"), ParseResult::InvalidArgument { .. }));
        assert!(matches!(
            parse_command("add Dune | Herbert | 1965 | maybe"),
            ParseResult::InvalidArgument { .. }
        ));
        assert!(matches!(parse_command("add"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_search_command() {
        assert_eq!(
            parse_command("search war and"),
            ParseResult::Ok(Command::Search("war and".into()))
        );
        assert!(matches!(parse_command("search"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_book_actions() {
        assert_eq!(
            parse_command("move 12"),
            ParseResult::Ok(Command::Book(ShelfAction::new(ActionKind::Toggle, BookId(12))))
        );
        assert_eq!(
            parse_command("rm 7"),
            ParseResult::Ok(Command::Book(ShelfAction::new(ActionKind::Delete, BookId(7))))
        );
        assert_eq!(
            parse_command("edit 3"),
            ParseResult::Ok(Command::Book(ShelfAction::new(ActionKind::Edit, BookId(3))))
        );
    }

    #[test]
    fn parse_book_action_needs_numeric_id() {
        assert!(matches!(parse_command("delete dune"), ParseResult::InvalidArgument { .. }));
        assert!(matches!(parse_command("delete"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("unknown"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_command(""), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_command("   "), ParseResult::Ok(Command::Nop)));
    }
}

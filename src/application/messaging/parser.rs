//! Message parser - Splits prefixed text into a command invocation

/// A command name and its raw arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    /// Everything after the name, surrounding whitespace removed
    pub args: String,
}

/// Parses incoming text against a prefix
pub struct MessageParser;

impl MessageParser {
    /// `None` when `text` does not start with `prefix` or no name follows it.
    pub fn parse(text: &str, prefix: &str) -> Option<Invocation> {
        let rest = text.strip_prefix(prefix)?;

        let (name, args) = match rest.find(char::is_whitespace) {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if name.is_empty() {
            return None;
        }

        Some(Invocation {
            name: name.to_string(),
            args: args.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_args() {
        let inv = MessageParser::parse(".config  admin_ids ", ".").unwrap();

        assert_eq!(inv.name, "config");
        assert_eq!(inv.args, "admin_ids");
    }

    #[test]
    fn test_parse_without_args() {
        let inv = MessageParser::parse("!ping", "!").unwrap();

        assert_eq!(inv.name, "ping");
        assert_eq!(inv.args, "");
    }

    #[test]
    fn test_multi_char_prefix_and_multiline_args() {
        let inv = MessageParser::parse("rb!say hello\nworld", "rb!").unwrap();

        assert_eq!(inv.name, "say");
        assert_eq!(inv.args, "hello\nworld");
    }

    #[test]
    fn test_not_a_command() {
        assert_eq!(MessageParser::parse("hello there", "."), None);
        assert_eq!(MessageParser::parse("!ping", "."), None);
    }

    #[test]
    fn test_prefix_alone_or_followed_by_space() {
        assert_eq!(MessageParser::parse(".", "."), None);
        assert_eq!(MessageParser::parse(". ping", "."), None);
    }
}

//! `%`-style positional formatting for translated strings.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

static CONVERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%([-0]*)(\d*)(?:\.(\d+))?([a-zA-Z%])").expect("conversion pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not enough arguments for format string")]
    NotEnoughArguments,

    #[error("not all arguments converted during string formatting")]
    TooManyArguments,

    #[error("%{conversion} format: a number is required, not {value:?}")]
    NotANumber { conversion: char, value: String },

    #[error("unsupported format character '{0}'")]
    Unsupported(char),

    #[error("incomplete format")]
    Incomplete,

    #[error("width or precision {0} exceeds {max}", max = MAX_FIELD)]
    FieldTooLarge(String),
}

/// Largest width or precision a conversion may ask for
pub const MAX_FIELD: usize = 256;

struct Directive {
    left: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
}

impl Directive {
    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        if len >= self.width {
            return body;
        }
        let fill = self.width - len;
        if self.left {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero && numeric {
            match body.strip_prefix('-') {
                Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
                None => format!("{}{}", "0".repeat(fill), body),
            }
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }
}

/// Apply `args` to `template` positionally.
///
/// Supports `%s`, `%r`, `%d`, `%i`, `%f` and `%%` with `-`/`0` flags, width
/// and precision. Every argument must be consumed.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter().map(AsRef::as_ref);
    let mut last = 0;

    for caps in CONVERSION.captures_iter(template) {
        let whole = caps.get(0).ok_or(FormatError::Incomplete)?;
        push_literal(&mut out, &template[last..whole.start()])?;
        last = whole.end();

        let flags = caps.get(1).map_or("", |m| m.as_str());
        let directive = Directive {
            left: flags.contains('-'),
            zero: flags.contains('0'),
            width: field(caps.get(2).map(|m| m.as_str()))?.unwrap_or(0),
            precision: field(caps.get(3).map(|m| m.as_str()))?,
        };
        let conversion = caps
            .get(4)
            .and_then(|m| m.as_str().chars().next())
            .ok_or(FormatError::Incomplete)?;

        let rendered = match conversion {
            '%' => "%".to_string(),
            's' => {
                let value = args.next().ok_or(FormatError::NotEnoughArguments)?;
                let body = match directive.precision {
                    Some(p) => value.chars().take(p).collect(),
                    None => value.to_string(),
                };
                directive.pad(body, false)
            }
            'r' => {
                let value = args.next().ok_or(FormatError::NotEnoughArguments)?;
                directive.pad(format!("'{}'", value), false)
            }
            'd' | 'i' => {
                let value = args.next().ok_or(FormatError::NotEnoughArguments)?;
                let number = parse_integer(value).ok_or_else(|| FormatError::NotANumber {
                    conversion,
                    value: value.to_string(),
                })?;
                directive.pad(number.to_string(), true)
            }
            'f' | 'F' => {
                let value = args.next().ok_or(FormatError::NotEnoughArguments)?;
                let number: f64 = value.trim().parse().map_err(|_| FormatError::NotANumber {
                    conversion,
                    value: value.to_string(),
                })?;
                directive.pad(format!("{:.*}", directive.precision.unwrap_or(6), number), true)
            }
            other => return Err(FormatError::Unsupported(other)),
        };
        out.push_str(&rendered);
    }

    push_literal(&mut out, &template[last..])?;

    if args.next().is_some() {
        return Err(FormatError::TooManyArguments);
    }
    Ok(out)
}

/// Width or precision digits, bounded by [`MAX_FIELD`]. Empty means unset.
fn field(digits: Option<&str>) -> Result<Option<usize>, FormatError> {
    let Some(digits) = digits.filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    match digits.parse::<usize>() {
        Ok(n) if n <= MAX_FIELD => Ok(Some(n)),
        _ => Err(FormatError::FieldTooLarge(digits.to_string())),
    }
}

fn push_literal(out: &mut String, literal: &str) -> Result<(), FormatError> {
    if literal.contains('%') {
        return Err(FormatError::Incomplete);
    }
    out.push_str(literal);
    Ok(())
}

fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

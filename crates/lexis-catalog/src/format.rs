//! Positional template substitution
//!
//! Templates use composite-format placeholders: `{index[,alignment][:specifier]}`.
//! `{{` and `}}` produce literal braces.
//!
//! | Argument | Specifiers |
//! |----------|------------|
//! | string | any (ignored) |
//! | integer | `D<n>` zero padding, `X`/`x` hex, `F<n>` fixed point |
//! | float | `F<n>` fixed point (default 2 digits) |
//!
//! A positive alignment right-aligns within that many characters, a negative
//! one left-aligns.

use crate::error::FormatError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

const MAX_PRECISION: usize = 99;
const MAX_ALIGNMENT: i64 = 1_000_000;

/// One positional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text
    Str(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
}

impl FormatArg {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        // Widen through the shortest decimal form so 1.1f32 prints as 1.1.
        Self::Float(value.to_string().parse().unwrap_or_else(|_| f64::from(value)))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Build a `[FormatArg; N]` from heterogeneous values.
///
/// ```
/// use lexis_catalog::{catalog_args, format_template};
///
/// let text = format_template("{0} has {1} items", &catalog_args!["Cart", 3]).unwrap();
/// assert_eq!(text, "Cart has 3 items");
/// ```
#[macro_export]
macro_rules! catalog_args {
    () => {{
        let args: [$crate::FormatArg; 0] = [];
        args
    }};
    ($($arg:expr),+ $(,)?) => {
        [$($crate::FormatArg::from($arg)),+]
    };
}

struct Placeholder<'a> {
    index: usize,
    alignment: i64,
    specifier: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    fn parse(body: &'a str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidPlaceholder(body.to_string());

        let (head, specifier) = match body.split_once(':') {
            Some((head, spec)) => (head, Some(spec)),
            None => (body, None),
        };
        let (index, alignment) = match head.split_once(',') {
            Some((index, alignment)) => (index, Some(alignment.trim())),
            None => (head, None),
        };

        let index = index.trim_end();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;
        let alignment: i64 = match alignment {
            Some(text) => text.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if alignment.unsigned_abs() > MAX_ALIGNMENT.unsigned_abs() {
            return Err(invalid());
        }

        Ok(Self {
            index,
            alignment,
            specifier,
        })
    }
}

/// Substitute `args` into `template`.
pub fn format_template(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => out.push('{'),
            '{' => {
                let body = placeholder_body(template, position, &mut chars)?;
                let placeholder = Placeholder::parse(body)?;
                let arg = args.get(placeholder.index).ok_or(FormatError::IndexOutOfRange {
                    index: placeholder.index,
                    count: args.len(),
                })?;
                let rendered = render(arg, placeholder.specifier)?;
                pad_into(&mut out, &rendered, placeholder.alignment);
            }
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => out.push('}'),
            '}' => return Err(FormatError::UnbalancedBrace { brace: '}', position }),
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn placeholder_body<'a>(
    template: &'a str,
    open: usize,
    chars: &mut Peekable<CharIndices<'a>>,
) -> Result<&'a str, FormatError> {
    for (position, c) in chars.by_ref() {
        match c {
            '}' => return Ok(&template[open + 1..position]),
            '{' => break,
            _ => {}
        }
    }
    Err(FormatError::UnbalancedBrace {
        brace: '{',
        position: open,
    })
}

fn render(arg: &FormatArg, specifier: Option<&str>) -> Result<String, FormatError> {
    let Some(spec) = specifier.filter(|s| !s.is_empty()) else {
        return Ok(arg.to_string());
    };
    let unsupported = || FormatError::UnsupportedSpecifier {
        specifier: spec.to_string(),
        kind: arg.kind(),
    };

    let mut spec_chars = spec.chars();
    let code = spec_chars.next().ok_or_else(unsupported)?;
    let digits = spec_chars.as_str();
    let precision = if digits.is_empty() {
        None
    } else {
        match digits.parse::<usize>() {
            Ok(n) if n <= MAX_PRECISION => Some(n),
            _ => return Err(unsupported()),
        }
    };

    match (arg, code) {
        (FormatArg::Str(s), _) => Ok(s.clone()),
        (FormatArg::Int(n), 'D' | 'd') => {
            let width = precision.unwrap_or(0);
            let sign = if *n < 0 { "-" } else { "" };
            Ok(format!("{sign}{:0width$}", n.unsigned_abs()))
        }
        (FormatArg::Int(n), 'X') if precision.is_none() => Ok(format!("{n:X}")),
        (FormatArg::Int(n), 'x') if precision.is_none() => Ok(format!("{n:x}")),
        #[allow(clippy::cast_precision_loss)]
        (FormatArg::Int(n), 'F' | 'f') => Ok(format!("{:.*}", precision.unwrap_or(2), *n as f64)),
        (FormatArg::Float(x), 'F' | 'f') => Ok(format!("{:.*}", precision.unwrap_or(2), x)),
        _ => Err(unsupported()),
    }
}

fn pad_into(out: &mut String, text: &str, alignment: i64) {
    let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
    let fill = width.saturating_sub(text.chars().count());
    if alignment > 0 {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(text);
    } else {
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(fill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        format_template(template, args)
    }

    #[test]
    fn test_positional_substitution() {
        assert_eq!(fmt("Hello, {0}!", &catalog_args!["World"]).unwrap(), "Hello, World!");
        assert_eq!(fmt("{1} before {0}", &catalog_args!["a", "b"]).unwrap(), "b before a");
        assert_eq!(fmt("{0}{0}", &catalog_args![7]).unwrap(), "77");
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(fmt("{0} / {1}", &catalog_args![3, 1.5]).unwrap(), "3 / 1.5");
        assert_eq!(fmt("{0}", &catalog_args![1.1f32]).unwrap(), "1.1");
        assert_eq!(fmt("{0}", &catalog_args![2.0]).unwrap(), "2");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(fmt("{{0}} is {0}", &catalog_args!["x"]).unwrap(), "{0} is x");
        assert_eq!(fmt("no placeholders", &catalog_args![]).unwrap(), "no placeholders");
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            fmt("Hello, {9}!", &catalog_args!["World"]),
            Err(FormatError::IndexOutOfRange { index: 9, count: 1 })
        );
        assert!(fmt("{0}", &catalog_args![]).is_err());
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(
            fmt("Hello, {0", &catalog_args!["x"]),
            Err(FormatError::UnbalancedBrace { brace: '{', position: 7 })
        );
        assert_eq!(
            fmt("a } b", &catalog_args![]),
            Err(FormatError::UnbalancedBrace { brace: '}', position: 2 })
        );
        assert!(fmt("{0{1}}", &catalog_args!["a", "b"]).is_err());
    }

    #[test]
    fn test_invalid_placeholders() {
        assert!(matches!(fmt("{}", &catalog_args!["a"]), Err(FormatError::InvalidPlaceholder(_))));
        assert!(matches!(fmt("{name}", &catalog_args!["a"]), Err(FormatError::InvalidPlaceholder(_))));
        assert!(matches!(fmt("{0,wide}", &catalog_args!["a"]), Err(FormatError::InvalidPlaceholder(_))));
        assert!(matches!(fmt("{0,99999999}", &catalog_args!["a"]), Err(FormatError::InvalidPlaceholder(_))));
    }

    #[test]
    fn test_alignment() {
        assert_eq!(fmt("[{0,5}]", &catalog_args!["ab"]).unwrap(), "[   ab]");
        assert_eq!(fmt("[{0,-5}]", &catalog_args!["ab"]).unwrap(), "[ab   ]");
        assert_eq!(fmt("[{0,1}]", &catalog_args!["abc"]).unwrap(), "[abc]");
    }

    #[test]
    fn test_specifiers() {
        assert_eq!(fmt("{0:D3}", &catalog_args![7]).unwrap(), "007");
        assert_eq!(fmt("{0:D3}", &catalog_args![-7]).unwrap(), "-007");
        assert_eq!(fmt("{0:X}", &catalog_args![255]).unwrap(), "FF");
        assert_eq!(fmt("{0:x}", &catalog_args![255]).unwrap(), "ff");
        assert_eq!(fmt("{0:F}", &catalog_args![1.5]).unwrap(), "1.50");
        assert_eq!(fmt("{0:F1}", &catalog_args![2.26f32]).unwrap(), "2.3");
        assert_eq!(fmt("{0:F0}", &catalog_args![3]).unwrap(), "3");
        assert_eq!(fmt("{0,6:F1}", &catalog_args![9.76]).unwrap(), "   9.8");
        assert_eq!(fmt("{0:anything}", &catalog_args!["text"]).unwrap(), "text");
    }

    #[test]
    fn test_unsupported_specifiers() {
        assert!(matches!(
            fmt("{0:D}", &catalog_args![1.5]),
            Err(FormatError::UnsupportedSpecifier { kind: "float", .. })
        ));
        assert!(fmt("{0:Q}", &catalog_args![1]).is_err());
        assert!(fmt("{0:F500}", &catalog_args![1.0]).is_err());
    }
}

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Long,
    Short,
    Value,
}

/// One unit of the argument stream.
///
/// `text` is the name (for options) or the value itself; `raw` is how the
/// user spelled it, which is what error messages quote. For a short option
/// that came out of a cluster, `raw` is the synthetic `-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub raw: Cow<'a, str>,
    /// Set only on the value split off `--name=value`.
    pub attached: bool,
}

impl<'a> Token<'a> {
    fn long(name: &'a str, raw: &'a str) -> Self {
        Self {
            kind: TokenKind::Long,
            text: name,
            raw: Cow::Borrowed(raw),
            attached: false,
        }
    }

    fn short(name: &'a str, raw: Cow<'a, str>) -> Self {
        Self {
            kind: TokenKind::Short,
            text: name,
            raw,
            attached: false,
        }
    }

    fn value(value: &'a str, attached: bool) -> Self {
        Self {
            kind: TokenKind::Value,
            text: value,
            raw: Cow::Borrowed(value),
            attached,
        }
    }

    /// The single character of a short token.
    pub fn short_char(&self) -> Option<char> {
        match self.kind {
            TokenKind::Short => self.text.chars().next(),
            _ => None,
        }
    }
}

/// Split raw arguments into tokens.
///
/// Each argument is matched, first match wins, as:
/// 1. `--name` or `--name=value` (the value becomes an attached token),
/// 2. a cluster `-xyz` of two or more short options,
/// 3. a single short option `-x`,
/// 4. a bare value.
///
/// A short option never carries its value inside the same argument: `-fbar`
/// is the cluster `-f -b -a -r`.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(args.len());
    for arg in args {
        push_tokens(arg.as_ref(), &mut tokens);
    }
    tracing::trace!(args = args.len(), tokens = tokens.len(), "tokenized arguments");
    tokens
}

fn push_tokens<'a>(arg: &'a str, out: &mut Vec<Token<'a>>) {
    if let Some(body) = arg.strip_prefix("--") {
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        if !name.is_empty() {
            out.push(Token::long(name, arg));
            if let Some(value) = value {
                out.push(Token::value(value, true));
            }
            return;
        }
    }

    if let Some(body) = arg.strip_prefix('-') {
        let is_short_char = |c: char| c != '-' && !c.is_whitespace();
        let mut chars = body.chars();
        match (chars.next(), chars.next()) {
            (Some(first), None) if is_short_char(first) => {
                out.push(Token::short(body, Cow::Borrowed(arg)));
                return;
            }
            (Some(_), Some(_)) if body.chars().all(is_short_char) => {
                for (idx, c) in body.char_indices() {
                    let name = &body[idx..idx + c.len_utf8()];
                    out.push(Token::short(name, Cow::Owned(format!("-{c}"))));
                }
                return;
            }
            _ => {}
        }
    }

    out.push(Token::value(arg, false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::{Long, Short, Value};

    fn kinds<'a>(tokens: &'a [Token<'a>]) -> Vec<(TokenKind, &'a str, &'a str, bool)> {
        tokens
            .iter()
            .map(|t| (t.kind, t.text, t.raw.as_ref(), t.attached))
            .collect()
    }

    #[test]
    fn long_options_split_attached_values() {
        let tokens = tokenize(&["--foo", "--bar=cat", "--url=a=b", "--empty="]);
        assert_eq!(
            kinds(&tokens),
            [
                (Long, "foo", "--foo", false),
                (Long, "bar", "--bar=cat", false),
                (Value, "cat", "cat", true),
                (Long, "url", "--url=a=b", false),
                (Value, "a=b", "a=b", true),
                (Long, "empty", "--empty=", false),
                (Value, "", "", true),
            ]
        );
    }

    #[test]
    fn short_clusters_expand_in_order() {
        let tokens = tokenize(&["-abc"]);
        assert_eq!(
            kinds(&tokens),
            [
                (Short, "a", "-a", false),
                (Short, "b", "-b", false),
                (Short, "c", "-c", false),
            ]
        );
        assert_eq!(tokens[1].short_char(), Some('b'));
    }

    #[test]
    fn cluster_matches_separate_shorts() {
        let clustered = tokenize(&["-abc"]);
        let separate = tokenize(&["-a", "-b", "-c"]);
        assert_eq!(kinds(&clustered), kinds(&separate));
    }

    #[test]
    fn single_short_keeps_raw_spelling() {
        let tokens = tokenize(&["-f", "dog"]);
        assert_eq!(
            kinds(&tokens),
            [(Short, "f", "-f", false), (Value, "dog", "dog", false)]
        );
    }

    #[test]
    fn two_character_cluster_is_never_an_attached_value() {
        let tokens = tokenize(&["-fx"]);
        assert_eq!(
            kinds(&tokens),
            [(Short, "f", "-f", false), (Short, "x", "-x", false)]
        );
    }

    #[test]
    fn leftovers_are_values() {
        let tokens = tokenize(&["-", "--", "--=x", "-a-b", "- x", "plain", ""]);
        assert!(tokens.iter().all(|t| t.kind == Value && !t.attached));
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, ["-", "--", "--=x", "-a-b", "- x", "plain", ""]);
    }

    #[test]
    fn multibyte_shorts_are_split_by_character() {
        let tokens = tokenize(&["-äö"]);
        assert_eq!(
            kinds(&tokens),
            [(Short, "ä", "-ä", false), (Short, "ö", "-ö", false)]
        );
    }
}

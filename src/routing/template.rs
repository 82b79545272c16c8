//! Parsed route templates: `/products/{id}` becomes `[Literal("/products/"), Param("id")]`.
//!
//! A placeholder matches one or more bytes up to the next `/`. Literal text
//! matches byte-for-byte. Matching is anchored at both ends of the path.

use crate::error::TemplateError;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Param(String),
}

/// A compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    tokens: Vec<Token>,
}

/// Named values captured from a path. When a template repeats a placeholder
/// name, the value captured by the later occurrence is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| TemplateError::Unterminated {
                template: source.to_string(),
                position: offset + open,
            })?;
            let name = &after[..close];
            if name.is_empty() {
                return Err(TemplateError::EmptyName {
                    template: source.to_string(),
                    position: offset + open,
                });
            }
            if !name.chars().all(is_name_char) {
                return Err(TemplateError::InvalidName {
                    template: source.to_string(),
                    name: name.to_string(),
                });
            }
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Param(name.to_string()));

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Template {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Placeholder names in left-to-right order, duplicates included.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Param(name) => Some(name.as_str()),
            Token::Literal(_) => None,
        })
    }

    /// Match the whole of `path`. Returns the captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut captures = Vec::new();
        if !match_tokens(&self.tokens, path, &mut captures) {
            return None;
        }
        let mut params = HashMap::with_capacity(captures.len());
        for (name, value) in self.param_names().zip(captures) {
            params.insert(name.to_string(), value.to_string());
        }
        Some(Params(params))
    }
}

/// Placeholders are greedy and backtrack when the tokens after them in the
/// same segment fail, e.g. `{name}.json` against `a.b.json` captures `a.b`.
fn match_tokens<'p>(tokens: &[Token], path: &'p str, captures: &mut Vec<&'p str>) -> bool {
    match tokens.split_first() {
        None => path.is_empty(),
        Some((Token::Literal(lit), rest)) => match path.strip_prefix(lit.as_str()) {
            Some(tail) => match_tokens(rest, tail, captures),
            None => false,
        },
        Some((Token::Param(_), rest)) => {
            let segment_end = path.find('/').unwrap_or(path.len());
            for end in (1..=segment_end).rev() {
                if !path.is_char_boundary(end) {
                    continue;
                }
                captures.push(&path[..end]);
                if match_tokens(rest, &path[end..], captures) {
                    return true;
                }
                captures.pop();
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_params() {
        let t = Template::parse("/products/{id}").unwrap();
        assert_eq!(
            t.tokens(),
            &[
                Token::Literal("/products/".into()),
                Token::Param("id".into())
            ]
        );
        assert_eq!(t.param_names().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(t.as_str(), "/products/{id}");
    }

    #[test]
    fn template_without_params_is_one_literal() {
        let t = Template::parse("/health").unwrap();
        assert_eq!(t.tokens(), &[Token::Literal("/health".into())]);
        assert_eq!(t.param_names().count(), 0);
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let err = Template::parse("/products/{id").unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unterminated {
                template: "/products/{id".into(),
                position: 10
            }
        );
    }

    #[test]
    fn empty_and_invalid_names_are_rejected() {
        assert!(matches!(
            Template::parse("/a/{}"),
            Err(TemplateError::EmptyName { position: 3, .. })
        ));
        assert!(matches!(
            Template::parse("/a/{a-b}"),
            Err(TemplateError::InvalidName { ref name, .. }) if name == "a-b"
        ));
        assert!(matches!(
            Template::parse("/a/{x{y}"),
            Err(TemplateError::InvalidName { .. })
        ));
    }

    #[test]
    fn error_position_accounts_for_earlier_placeholders() {
        let err = Template::parse("/a/{x}/{y").unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated { position: 7, .. }));
    }

    #[test]
    fn matches_exact_path_and_extracts_param() {
        let t = Template::parse("/products/{id}").unwrap();
        let params = t.matches("/products/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn match_is_anchored() {
        let t = Template::parse("/products").unwrap();
        assert!(t.matches("/products").is_some());
        assert!(t.matches("/products/1").is_none());
        assert!(t.matches("/api/products").is_none());
        assert!(t.matches("/product").is_none());
    }

    #[test]
    fn placeholder_never_crosses_a_slash() {
        let t = Template::parse("/products/{id}").unwrap();
        assert!(t.matches("/products/1/2").is_none());
        assert!(t.matches("/products/").is_none());
    }

    #[test]
    fn literals_are_case_sensitive() {
        let t = Template::parse("/categories").unwrap();
        assert!(t.matches("/Categories").is_none());
    }

    #[test]
    fn placeholder_followed_by_literal_in_same_segment() {
        let t = Template::parse("/files/{name}.json").unwrap();
        let params = t.matches("/files/a.b.json").unwrap();
        assert_eq!(params.get("name"), Some("a.b"));
        assert!(t.matches("/files/.json").is_none());
        assert!(t.matches("/files/a.txt").is_none());
    }

    #[test]
    fn multiple_params_in_order() {
        let t = Template::parse("/shops/{shop}/items/{item}").unwrap();
        let params = t.matches("/shops/north/items/7").unwrap();
        assert_eq!(params.get("shop"), Some("north"));
        assert_eq!(params.get("item"), Some("7"));
        assert_eq!(
            t.param_names().collect::<Vec<_>>(),
            vec!["shop", "item"]
        );
    }

    #[test]
    fn duplicate_name_keeps_later_capture() {
        let t = Template::parse("/{id}/copy/{id}").unwrap();
        let params = t.matches("/first/copy/second").unwrap();
        assert_eq!(params.get("id"), Some("second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn non_ascii_values_are_captured_whole() {
        let t = Template::parse("/products/{id}").unwrap();
        let params = t.matches("/products/gitarre-ü").unwrap();
        assert_eq!(params.get("id"), Some("gitarre-ü"));
    }

    #[test]
    fn substituted_values_round_trip_through_match() {
        let t = Template::parse("/a/{x}/b/{y}").unwrap();
        for (x, y) in [("1", "2"), ("foo", "bar-baz"), ("a.b", "%20"), ("{x}", "_")] {
            let path = format!("/a/{}/b/{}", x, y);
            let params = t.matches(&path).unwrap();
            assert_eq!(params.get("x"), Some(x));
            assert_eq!(params.get("y"), Some(y));
        }
    }
}

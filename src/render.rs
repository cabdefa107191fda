use crate::field_type::FieldType;
use crate::finalize::ResolvedDeclaration;
use crate::registry::Declaration;
use std::fmt::Write;

const DERIVING: &str = "deriving (Show, Eq, Generic)";
const DECODER_PREAMBLE: &str = "  parseJSON (Object v) =";

/// The source text generated for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub type_text: String,

    /// Absent for aliases, which are decoded through their element type.
    pub decoder_text: Option<String>,
}

/// Renders the type declaration of `decl`, and its decoder if it is a record.
pub fn render(decl: &ResolvedDeclaration) -> Rendered {
    match decl {
        Declaration::Record { name, fields } => Rendered {
            type_text: render_record_type(name, fields),
            decoder_text: Some(render_decoder(name, fields)),
        },
        Declaration::Alias { name, element } => Rendered {
            type_text: format!("type {} = {}", name, element),
            decoder_text: None,
        },
    }
}

fn render_record_type(name: &str, fields: &[(String, FieldType)]) -> String {
    let mut out = format!("data {} = {}", name, name);
    if fields.is_empty() {
        let _ = write!(out, "\n  {}", DERIVING);
        return out;
    }

    let width = fields.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0) + 1;
    for (i, (key, type_)) in fields.iter().enumerate() {
        let separator = if i == 0 { '{' } else { ',' };
        let _ = write!(out, "\n  {} {:<width$}:: {}", separator, key, type_, width = width);
        if let FieldType::Text { sample } = type_ {
            let _ = write!(out, " -- ^ e.g. {}", string_literal(sample));
        }
    }

    let _ = write!(out, "\n  }} {}", DERIVING);
    out
}

fn render_decoder(name: &str, fields: &[(String, FieldType)]) -> String {
    let width = DECODER_PREAMBLE.len();
    let mut out = format!("instance FromJSON {} where\n", name);

    if fields.is_empty() {
        let _ = writeln!(out, "  parseJSON (Object _) = pure {}", name);
    } else {
        let _ = writeln!(out, "{} {}", DECODER_PREAMBLE, name);
        for (i, (key, type_)) in fields.iter().enumerate() {
            let operator = if i == 0 { "<$>" } else { "<*>" };
            let accessor = if type_.is_optional() { ".:?" } else { ".:" };
            let _ = writeln!(
                out,
                "{:>width$} v {} {}",
                operator,
                accessor,
                string_literal(key),
                width = width
            );
        }
    }

    let _ = write!(out, "{:<width$}= mzero", "  parseJSON _", width = width - 1);
    out
}

/// Quotes `s` as a Haskell string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                // `\&` ends the numeric escape in case a digit follows.
                let _ = write!(out, "\\{}\\&", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Number;

    fn owner() -> ResolvedDeclaration {
        Declaration::Record {
            name: "Owner".to_owned(),
            fields: vec![
                (
                    "id".to_owned(),
                    FieldType::Number {
                        sample: Number::from(2),
                    },
                ),
                (
                    "name".to_owned(),
                    FieldType::Text {
                        sample: "x".to_owned(),
                    },
                ),
            ],
        }
    }

    #[test]
    fn record_type_aligns_fields() {
        let expected = [
            "data Owner = Owner",
            "  { id   :: Int",
            "  , name :: Text -- ^ e.g. \"x\"",
            "  } deriving (Show, Eq, Generic)",
        ]
        .join("\n");

        assert_eq!(expected, render(&owner()).type_text);
    }

    #[test]
    fn record_decoder_extracts_fields_in_order() {
        let expected = [
            "instance FromJSON Owner where",
            "  parseJSON (Object v) = Owner",
            "                     <$> v .: \"id\"",
            "                     <*> v .: \"name\"",
            "  parseJSON _          = mzero",
        ]
        .join("\n");

        assert_eq!(Some(expected), render(&owner()).decoder_text);
    }

    #[test]
    fn optional_fields_use_optional_accessor() {
        let decl = Declaration::Record {
            name: "Page".to_owned(),
            fields: vec![
                ("next_cursor".to_owned(), FieldType::Maybe),
                (
                    "items".to_owned(),
                    FieldType::Seq(Box::new(FieldType::Record("Item".to_owned()))),
                ),
            ],
        };

        let rendered = render(&decl);
        let expected = [
            "data Page = Page",
            "  { next_cursor :: Maybe Value",
            "  , items       :: [Item]",
            "  } deriving (Show, Eq, Generic)",
        ]
        .join("\n");
        assert_eq!(expected, rendered.type_text);

        let decoder = rendered.decoder_text.unwrap();
        assert!(decoder.contains("<$> v .:? \"next_cursor\"\n"));
        assert!(decoder.contains("<*> v .: \"items\"\n"));
    }

    #[test]
    fn empty_record() {
        let decl = Declaration::Record {
            name: "Empty".to_owned(),
            fields: vec![],
        };

        let rendered = render(&decl);
        assert_eq!(
            "data Empty = Empty\n  deriving (Show, Eq, Generic)",
            rendered.type_text
        );
        let expected = [
            "instance FromJSON Empty where",
            "  parseJSON (Object _) = pure Empty",
            "  parseJSON _          = mzero",
        ]
        .join("\n");
        assert_eq!(Some(expected), rendered.decoder_text);
    }

    #[test]
    fn alias_has_no_decoder() {
        let decl = Declaration::Alias {
            name: "Tags".to_owned(),
            element: FieldType::Seq(Box::new(FieldType::Text {
                sample: "a".to_owned(),
            })),
        };

        assert_eq!(
            Rendered {
                type_text: "type Tags = [Text]".to_owned(),
                decoder_text: None,
            },
            render(&decl)
        );
    }

    #[test]
    fn unknown_is_rendered_as_placeholder() {
        let decl = Declaration::Alias {
            name: "Ids".to_owned(),
            element: FieldType::Seq(Box::new(FieldType::Unknown)),
        };

        assert_eq!("type Ids = [Unknown]", render(&decl).type_text);
    }

    #[test]
    fn string_literal_escapes() {
        assert_eq!(r#""plain""#, string_literal("plain"));
        assert_eq!(r#""say \"hi\"""#, string_literal("say \"hi\""));
        assert_eq!(r#""a\\b\nc""#, string_literal("a\\b\nc"));
        assert_eq!(r#""\0\&1""#, string_literal("\u{0}1"));
    }
}

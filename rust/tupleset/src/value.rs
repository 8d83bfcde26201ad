//! Bound values carried by result rows.
//!
//! The query engine that produces rows is external to this crate; a [`Value`]
//! is an opaque, cheaply cloneable snapshot of whatever the engine bound to a
//! variable in one solution.

use std::fmt;
use std::sync::Arc;

/// A value bound to one binding name in a [`Row`](crate::Row).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Value {
    /// The binding has no value in this solution.
    #[default]
    Unbound,
    Iri(Arc<str>),
    BlankNode(Arc<str>),
    Literal(Literal),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn iri(iri: impl Into<Arc<str>>) -> Value {
        Value::Iri(iri.into())
    }

    pub fn blank_node(id: impl Into<Arc<str>>) -> Value {
        Value::BlankNode(id.into())
    }

    /// Creates a plain literal without datatype or language tag.
    pub fn literal(lexical: impl Into<Arc<str>>) -> Value {
        Value::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        })
    }

    pub fn typed_literal(lexical: impl Into<Arc<str>>, datatype: impl Into<Arc<str>>) -> Value {
        Value::Literal(Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        })
    }

    pub fn lang_literal(lexical: impl Into<Arc<str>>, language: impl Into<Arc<str>>) -> Value {
        Value::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        })
    }

    /// Returns `false` for [`Value::Unbound`].
    pub fn is_bound(&self) -> bool {
        !matches!(self, Value::Unbound)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::literal(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unbound => f.write_str("UNBOUND"),
            Value::Iri(iri) => write!(f, "<{iri}>"),
            Value::BlankNode(id) => write!(f, "_:{id}"),
            Value::Literal(lit) => write!(f, "{lit}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// A literal value with an optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub lexical: Arc<str>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub datatype: Option<Arc<str>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub language: Option<Arc<str>>,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^<{datatype}>")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::iri("http://ex.org/a").to_string(), "<http://ex.org/a>");
        assert_eq!(Value::blank_node("b0").to_string(), "_:b0");
        assert_eq!(Value::literal("plain").to_string(), "\"plain\"");
        assert_eq!(Value::lang_literal("chat", "fr").to_string(), "\"chat\"@fr");
        assert_eq!(
            Value::typed_literal("5", "http://www.w3.org/2001/XMLSchema#int").to_string(),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#int>"
        );
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Unbound.to_string(), "UNBOUND");
    }

    #[test]
    fn test_is_bound() {
        assert!(!Value::default().is_bound());
        assert!(Value::from("x").is_bound());
    }
}

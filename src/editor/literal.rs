use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar JavaScript literal emitted as an object value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// JavaScript source for the literal. Strings are double-quoted.
    pub fn to_js(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::Bool(value) => value.to_string(),
            Literal::Number(value) => number_to_js(*value),
            // JSON string escapes are valid JavaScript string escapes
            Literal::String(value) => serde_json::Value::String(value.clone()).to_string(),
        }
    }
}

fn number_to_js(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(Literal::from(123).to_js(), "123");
        assert_eq!(Literal::from(-4.5).to_js(), "-4.5");
        assert_eq!(Literal::from(f64::NAN).to_js(), "NaN");
        assert_eq!(Literal::from(f64::NEG_INFINITY).to_js(), "-Infinity");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(Literal::from("plain").to_js(), "\"plain\"");
        assert_eq!(Literal::from("say \"hi\"\n").to_js(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn scalars() {
        assert_eq!(Literal::Null.to_js(), "null");
        assert_eq!(Literal::from(None::<bool>).to_js(), "null");
        assert_eq!(Literal::from(true).to_js(), "true");
    }

    #[test]
    fn deserializes_untagged() {
        let values: Vec<Literal> = serde_json::from_str(r#"[null, false, 12, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Literal::Null,
                Literal::Bool(false),
                Literal::Number(12.0),
                Literal::String("x".to_string()),
            ]
        );
    }
}

use std::collections::BTreeMap;
use std::fmt;

/// Output fields of one measurement, keyed by output field name.
pub type FieldSet = BTreeMap<String, FieldValue>;

/// Tags of one measurement.
pub type TagSet = BTreeMap<String, String>;

/// A scalar metric value.
///
/// UPnP action results only ever carry a handful of primitive shapes, so
/// values are kept in a closed set rather than as opaque strings.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl FieldValue {
    /// Coerce the text of a SOAP response argument.
    ///
    /// Decimal integers become `Integer`, or `Unsigned` when they do not fit
    /// in an `i64`. Finite decimals become `Float`, `true`/`false` become
    /// `Boolean`. Everything else is kept verbatim as `String`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return FieldValue::Integer(v);
        }
        if let Ok(v) = trimmed.parse::<u64>() {
            return FieldValue::Unsigned(v);
        }
        if trimmed.contains('.') {
            if let Ok(v) = trimmed.parse::<f64>() {
                if v.is_finite() {
                    return FieldValue::Float(v);
                }
            }
        }
        match trimmed {
            "true" => FieldValue::Boolean(true),
            "false" => FieldValue::Boolean(false),
            _ => FieldValue::String(raw.to_string()),
        }
    }

    /// Coerce a response argument whose UPnP `dataType` is known.
    ///
    /// `ui*` become `Unsigned`, `i*`/`int` become `Integer`, the real types
    /// become `Float` and `boolean` accepts `0`/`1`, `true`/`false` and
    /// `yes`/`no`. `string` and `char` keep the raw text. Values that do not
    /// fit their declared type, and unknown types, fall back to [`parse`].
    ///
    /// [`parse`]: FieldValue::parse
    pub fn parse_typed(raw: &str, data_type: &str) -> Self {
        let trimmed = raw.trim();
        let typed = match data_type {
            "ui1" | "ui2" | "ui4" | "ui8" => trimmed.parse().ok().map(FieldValue::Unsigned),
            "i1" | "i2" | "i4" | "i8" | "int" => trimmed.parse().ok().map(FieldValue::Integer),
            "r4" | "r8" | "number" | "float" | "fixed14_4" => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float),
            "boolean" => match trimmed {
                "1" | "true" | "yes" => Some(FieldValue::Boolean(true)),
                "0" | "false" | "no" => Some(FieldValue::Boolean(false)),
                _ => None,
            },
            "string" | "char" => Some(FieldValue::String(raw.to_string())),
            _ => None,
        };
        typed.unwrap_or_else(|| Self::parse(raw))
    }

}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Unsigned(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Boolean(v) => write!(f, "{v}"),
            FieldValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v.into())
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Unsigned(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

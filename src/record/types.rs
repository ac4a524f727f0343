// src/record/types.rs

use std::fmt;

/// A single scalar cell.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Parse a raw CSV cell: integer first, then float, otherwise text.
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            Value::Int(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            Value::Float(f)
        } else {
            Value::Text(raw.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // whole floats keep one decimal so they read back as floats
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => {
                write!(f, "{:.1}", x)
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Ordered field name → value mapping. Field order is column order.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_render_naturally() {
        assert_eq!(Value::from(5).to_string(), "5");
        assert_eq!(Value::from(-12i64).to_string(), "-12");
        assert_eq!(Value::from(11.56).to_string(), "11.56");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(1e16).to_string(), "10000000000000000.0");
        assert_eq!(Value::from(-2.5e17).to_string(), "-250000000000000000.0");
        assert_eq!(Value::from("Kuala Lumpur").to_string(), "Kuala Lumpur");
    }

    #[test]
    fn infer_prefers_int_then_float() {
        assert_eq!(Value::infer("42"), Value::Int(42));
        assert_eq!(Value::infer("10.99"), Value::Float(10.99));
        assert_eq!(Value::infer("1.0"), Value::Float(1.0));
        assert_eq!(Value::infer(&Value::from(1e16).to_string()), Value::Float(1e16));
        assert_eq!(Value::infer("Bob"), Value::Text("Bob".into()));
        assert_eq!(Value::infer(""), Value::Text(String::new()));
    }

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut r = Record::new().with("name", "Alice").with("city", "London");
        r.insert("name", "Bob");
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["name", "city"]);
        assert_eq!(r.get("name"), Some(&Value::from("Bob")));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn collects_from_pairs() {
        let r: Record = [("complete", 1), ("in progress", 0)].into_iter().collect();
        assert_eq!(r.get("in progress"), Some(&Value::Int(0)));
        assert!(r.get("missing").is_none());
    }
}

use serde::Serialize;
use std::fmt;

/// What a successful match produced.
///
/// Terminals and text captures produce `Text`, sequences and repetitions
/// produce `List`, lookaheads and missed options produce `Empty`.
///
/// ```rust
/// use hera::machine::Value;
/// let v = Value::List(vec![Value::text("a"), Value::Empty]);
/// assert_eq!(v.to_string(), "[\"a\", nil]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Concatenation of every piece of text inside the value, depth first.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Value::Empty => {}
            Value::Text(text) => out.push_str(text),
            Value::List(items) => items.iter().for_each(|item| item.push_text(out)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "nil"),
            Value::Text(text) => write!(f, "{:?}", text),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A structural handler: a template that rebuilds a value out of pieces of
/// the matched one.
///
/// `Variable(0)` is the whole value. `Variable(n)` is the n-th element of a
/// list value; a non-list value is its own first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    Empty,
    Variable(usize),
    Text(String),
    List(Vec<Mapping>),
}

impl Mapping {
    pub fn var(index: usize) -> Self {
        Mapping::Variable(index)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Mapping::Text(text.into())
    }

    pub fn list(items: impl IntoIterator<Item = Mapping>) -> Self {
        Mapping::List(items.into_iter().collect())
    }

    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Mapping::Empty => Value::Empty,
            Mapping::Text(text) => Value::Text(text.clone()),
            Mapping::List(items) => Value::List(items.iter().map(|m| m.apply(value)).collect()),
            Mapping::Variable(0) => value.clone(),
            Mapping::Variable(n) => match value {
                Value::List(items) => items.get(n - 1).cloned().unwrap_or_default(),
                other if *n == 1 => other.clone(),
                _ => Value::Empty,
            },
        }
    }
}

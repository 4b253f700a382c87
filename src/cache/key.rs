// Query keys.
// A key is an ordered token sequence identifying one cache slot.

use std::fmt;

/// One element of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Str(String),
    Int(u64),
    Null,
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Str(s) => write!(f, "{:?}", s),
            KeyToken::Int(n) => write!(f, "{}", n),
            KeyToken::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for KeyToken {
    fn from(value: &str) -> Self {
        KeyToken::Str(value.to_string())
    }
}

impl From<u64> for KeyToken {
    fn from(value: u64) -> Self {
        KeyToken::Int(value)
    }
}

impl<T: Into<KeyToken>> From<Option<T>> for KeyToken {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyToken::Null, Into::into)
    }
}

/// Cache key. Two keys are equal iff their token sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeyToken>);

impl QueryKey {
    /// Single-token key, e.g. `["posts"]`.
    pub fn root(token: impl Into<KeyToken>) -> Self {
        Self(vec![token.into()])
    }

    /// Append a token, e.g. `QueryKey::root("post").with(7)`.
    pub fn with(mut self, token: impl Into<KeyToken>) -> Self {
        self.0.push(token.into());
        self
    }
}

impl FromIterator<KeyToken> for QueryKey {
    fn from_iter<I: IntoIterator<Item = KeyToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", token)?;
        }
        write!(f, "]")
    }
}

use bytes::Bytes;

/// One node of a decoded bencode tree.
///
/// Dictionaries keep their entries in the order they were decoded (or built);
/// nothing is re-sorted, so re-encoding reproduces the original byte layout.
///
/// # Examples
///
/// ```
/// use rscrape::bencode::{encode, Value};
///
/// let info = Value::dict([
///     ("name", Value::string("a.txt")),
///     ("length", 5i64.into()),
/// ]);
///
/// assert_eq!(info.get(b"name").and_then(Value::as_str), Some("a.txt"));
/// assert_eq!(info.get(b"length").and_then(Value::as_integer), Some(5));
/// assert_eq!(encode(&info), b"d4:name5:a.txt6:lengthi5ee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// Raw bytes; not necessarily UTF-8.
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// Key/value pairs in stored order. Keys are normally byte strings but the
    /// grammar does not require it.
    Dict(Vec<(Value, Value)>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Builds a dictionary from byte-string keys, preserving the given order.
    ///
    /// ```
    /// use rscrape::bencode::{encode, Value};
    ///
    /// let dict = Value::dict([("spam", Value::string("eggs")), ("cow", Value::string("moo"))]);
    /// assert_eq!(encode(&dict), b"d4:spam4:eggs3:cow3:mooe");
    /// ```
    pub fn dict<K, I>(entries: I) -> Self
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Bytes(Bytes::copy_from_slice(k.as_ref())), v))
                .collect(),
        )
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Scans entries in stored order and returns the value of the first entry
    /// whose key is a byte string equal to `key`. Comparison is exact and
    /// case-sensitive. Returns `None` for non-dictionaries and missing keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rscrape::bencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"FOO"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?
            .iter()
            .find(|(k, _)| k.as_bytes().is_some_and(|k| k.as_ref() == key))
            .map(|(_, v)| v)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }
}

/// Free-function form of [`Value::get`].
pub fn lookup<'a>(dictionary: &'a Value, key: &[u8]) -> Option<&'a Value> {
    dictionary.get(key)
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(d: Vec<(Value, Value)>) -> Self {
        Value::Dict(d)
    }
}

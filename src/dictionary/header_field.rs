use std::borrow::Cow;

/// An owned (name, value) pair.
///
/// Inside a `Dictionary` an empty value marks a name-only entry, which lets
/// a name be referenced while its value travels as a literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A field that registers just a name.
    pub fn name_only(name: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: Vec::new(),
        }
    }

    pub fn is_name_only(&self) -> bool {
        self.value.is_empty()
    }
}

impl<N, V> From<(N, V)> for HeaderField
where
    N: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from((name, value): (N, V)) -> Self {
        HeaderField::new(name, value)
    }
}

/// Lower-cases ASCII letters of a field name, borrowing when the name is
/// already normalized.
#[inline]
pub fn normalize_name(name: &[u8]) -> Cow<'_, [u8]> {
    if name.iter().any(u8::is_ascii_uppercase) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

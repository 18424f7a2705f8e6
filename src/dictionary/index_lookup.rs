/// Result of looking a (name, value) pair up in a `Dictionary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLookup {
    /// The name is not registered.
    Miss,

    /// The name is registered, this exact value is not.
    Name { name_index: usize },

    /// The exact pair is registered.
    Pair { name_index: usize, pair_index: usize },
}

impl IndexLookup {
    pub fn name_index(&self) -> Option<usize> {
        match *self {
            IndexLookup::Miss => None,
            IndexLookup::Name { name_index } | IndexLookup::Pair { name_index, .. } => {
                Some(name_index)
            }
        }
    }

    pub fn pair_index(&self) -> Option<usize> {
        match *self {
            IndexLookup::Pair { pair_index, .. } => Some(pair_index),
            _ => None,
        }
    }
}

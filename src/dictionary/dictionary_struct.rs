use crate::dictionary::{HeaderField, IndexLookup, normalize_name};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct NameEntry {
    /// Position of the name-only entry.
    index: usize,

    /// Positions of the registered (name, value) entries, keyed by value.
    values: HashMap<Vec<u8>, usize>,
}

/// An immutable, bidirectional index over known names and (name, value)
/// pairs.
///
/// Names and pairs share one index space: every entry of the field list
/// gets the index of its position. Each registered name owns exactly one
/// name-only entry, placed before its first pair, so a name referenced by
/// a pair can always be referenced on its own as well.
///
/// Once built the dictionary is only read, so a single instance behind an
/// `Arc` can serve any number of packers concurrently.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    fields: Vec<HeaderField>,
    names: HashMap<Vec<u8>, NameEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = HeaderField>,
    {
        let mut dictionary = Self::new();
        dictionary.load(fields);
        dictionary
    }

    /// Rebuilds every index from `fields`, discarding the previous content.
    ///
    /// Names are lower-cased and fields with an empty name are skipped. A
    /// name-only entry is inserted ahead of the first pair of a name that
    /// was not registered on its own. Repeated names and repeated pairs keep
    /// the index of their first registration.
    pub fn load<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = HeaderField>,
    {
        self.reset();

        for field in fields {
            if field.name.is_empty() {
                continue;
            }
            let name = normalize_name(&field.name).into_owned();

            if !self.names.contains_key(&name) {
                self.names.insert(
                    name.clone(),
                    NameEntry {
                        index: self.fields.len(),
                        values: HashMap::new(),
                    },
                );
                self.fields.push(HeaderField::name_only(name.clone()));
            }

            if field.value.is_empty() {
                continue;
            }

            let next_index = self.fields.len();
            if let Some(entry) = self.names.get_mut(&name) {
                if entry.values.contains_key(&field.value) {
                    continue;
                }
                entry.values.insert(field.value.clone(), next_index);
                self.fields.push(HeaderField::new(name, field.value));
            }
        }
    }

    /// Looks up a (name, value) pair. The name is matched case-insensitively.
    ///
    /// An empty value only ever matches the name.
    pub fn index(&self, name: &[u8], value: &[u8]) -> IndexLookup {
        if name.is_empty() {
            return IndexLookup::Miss;
        }
        let name = normalize_name(name);

        let Some(entry) = self.names.get(&*name) else {
            return IndexLookup::Miss;
        };

        if value.is_empty() {
            return IndexLookup::Name {
                name_index: entry.index,
            };
        }

        match entry.values.get(value) {
            Some(&pair_index) => IndexLookup::Pair {
                name_index: entry.index,
                pair_index,
            },
            None => IndexLookup::Name {
                name_index: entry.index,
            },
        }
    }

    /// Returns the entry at `index`. The value is empty for name-only
    /// entries.
    pub fn get(&self, index: usize) -> Option<(&[u8], &[u8])> {
        self.fields
            .get(index)
            .map(|field| (field.name.as_slice(), field.value.as_slice()))
    }

    /// Visits every entry in index order until `f` returns `false`.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(usize, &[u8], &[u8]) -> bool,
    {
        for (i, field) in self.fields.iter().enumerate() {
            if !f(i, &field.name, &field.value) {
                return;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderField> {
        self.fields.iter()
    }

    /// Number of entries, name-only entries included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Summed byte length of all names and values.
    pub fn content_size(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.name.len() + field.value.len())
            .sum()
    }

    /// Clears every entry. Allocated capacity is kept.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.names.clear();
    }
}

impl FromIterator<HeaderField> for Dictionary {
    fn from_iter<I: IntoIterator<Item = HeaderField>>(iter: I) -> Self {
        Dictionary::from_fields(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_fields([
            HeaderField::name_only("f1"),
            HeaderField::new("f1", "f1-a"),
            HeaderField::new("f1", "f1-b"),
            HeaderField::new("f1", "f1-c"),
            HeaderField::new("f1", "f1-b"),
            HeaderField::new("f2", "f2-a"),
            HeaderField::new("f2", "f2-b"),
            HeaderField::name_only("f3"),
            HeaderField::name_only("f3"),
        ])
    }

    #[test]
    fn assigns_indices_in_registration_order() {
        let dict = sample();
        // f1, f1-a, f1-b, f1-c, f2, f2-a, f2-b, f3
        assert_eq!(dict.len(), 8);
        assert_eq!(dict.get(0), Some((&b"f1"[..], &b""[..])));
        assert_eq!(dict.get(2), Some((&b"f1"[..], &b"f1-b"[..])));
        assert_eq!(dict.get(4), Some((&b"f2"[..], &b""[..])));
        assert_eq!(dict.get(7), Some((&b"f3"[..], &b""[..])));
        assert_eq!(dict.get(8), None);
        assert_eq!(dict.iter().filter(|f| f.is_name_only()).count(), 3);
    }

    #[test]
    fn index_distinguishes_miss_name_and_pair() {
        let dict = sample();
        assert_eq!(dict.index(b"f4", b"x"), IndexLookup::Miss);
        assert_eq!(
            dict.index(b"f1", b"unknown"),
            IndexLookup::Name { name_index: 0 }
        );
        assert_eq!(
            dict.index(b"f2", b"f2-b"),
            IndexLookup::Pair {
                name_index: 4,
                pair_index: 6
            }
        );
        assert_eq!(dict.index(b"f3", b""), IndexLookup::Name { name_index: 7 });
        assert_eq!(dict.index(b"", b"f1-a"), IndexLookup::Miss);
    }

    #[test]
    fn duplicate_pairs_are_idempotent() {
        let dict = sample();
        assert_eq!(dict.index(b"f1", b"f1-b").pair_index(), Some(2));
        let repeated = dict.iter().filter(|f| f.value == b"f1-b").count();
        assert_eq!(repeated, 1);
    }

    #[test]
    fn names_are_case_insensitive() {
        let dict = Dictionary::from_fields([HeaderField::new("Content-Encoding", "snappy")]);
        assert_eq!(dict.get(0), Some((&b"content-encoding"[..], &b""[..])));
        assert_eq!(
            dict.index(b"CONTENT-ENCODING", b"snappy"),
            IndexLookup::Pair {
                name_index: 0,
                pair_index: 1
            }
        );
    }

    #[test]
    fn pair_without_name_entry_gets_one() {
        let dict = Dictionary::from_fields([HeaderField::new("f2", "f2-a")]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.index(b"f2", b"zzz").name_index(), Some(0));
    }

    #[test]
    fn range_stops_when_asked() {
        let dict = sample();
        let mut seen = Vec::new();
        dict.range(|i, _, _| {
            seen.push(i);
            i < 2
        });
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn load_replaces_and_reset_clears() {
        let mut dict = sample();
        dict.load([HeaderField::name_only("only")]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.index(b"f1", b"f1-a"), IndexLookup::Miss);

        dict.reset();
        assert!(dict.is_empty());
        assert_eq!(dict.index(b"only", b"x"), IndexLookup::Miss);
    }

    #[test]
    fn reloading_own_entries_is_stable() {
        let dict = sample();
        let reloaded = Dictionary::from_fields(dict.iter().cloned());
        assert_eq!(
            dict.iter().collect::<Vec<_>>(),
            reloaded.iter().collect::<Vec<_>>()
        );
    }
}

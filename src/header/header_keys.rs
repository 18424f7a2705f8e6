use crate::dictionary::{Dictionary, HeaderField};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub const AGENT: &str = "agent";
pub const FORWARDED: &str = "forwarded";
pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_LENGTH: &str = "content-length";
pub const CONTENT_TYPE: &str = "content-type";
pub const CONTENT_ENCODING: &str = "content-encoding";

pub const CONTENT_ENCODING_SNAPPY: &str = "snappy";

/// Separates the agent id from the device, and the parts of a forwarded hop.
pub const FIELD_SEPARATOR: u8 = b';';

/// Separates forwarded hops.
pub const HOP_SEPARATOR: u8 = b',';

/// Names (and known values) every header dictionary starts with, in
/// registration order.
pub const BUILTIN_VOCABULARY: &[(&str, &[&str])] = &[
    (AGENT, &[]),
    (FORWARDED, &[]),
    (AUTHORIZATION, &[]),
    (CONTENT_LENGTH, &[]),
    (CONTENT_TYPE, &[]),
    (CONTENT_ENCODING, &[CONTENT_ENCODING_SNAPPY]),
];

pub(crate) static BUILTIN_DICTIONARY: Lazy<Arc<Dictionary>> = Lazy::new(|| {
    let fields = BUILTIN_VOCABULARY.iter().flat_map(|(name, values)| {
        std::iter::once(HeaderField::name_only(*name))
            .chain(values.iter().map(move |value| HeaderField::new(*name, *value)))
    });
    Arc::new(Dictionary::from_fields(fields))
});

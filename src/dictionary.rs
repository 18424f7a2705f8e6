mod dictionary_struct;
mod header_field;
mod index_lookup;

pub use dictionary_struct::Dictionary;
pub use header_field::{HeaderField, normalize_name};
pub use index_lookup::IndexLookup;

mod agent;
mod forwarded;
mod header_error;
mod header_fields;
mod header_keys;
mod header_pool;
mod header_struct;

pub use agent::Agent;
pub use forwarded::{Forwarded, ForwardedHop};
pub use header_error::HeaderError;
pub use header_fields::HeaderFields;
pub use header_keys::*;
pub use header_pool::HeaderPool;
pub use header_struct::Header;

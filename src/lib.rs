//! Compact, dictionary-backed encoding of RPC call metadata.
//!
//! A [`packer::Packer`] turns an ordered list of (name, value) fields into
//! a length-prefixed frame, replacing fields known to a shared
//! [`dictionary::Dictionary`] with small indices and entropy coding the
//! remaining literals. [`header::Header`] layers the well-known call
//! attributes on top of it.

pub mod constants;
pub mod dictionary;
pub mod entropy;
pub mod header;
pub mod packer;
pub mod utils;
pub mod varint;

// Frame related constants

/// Size in bytes of the little-endian `u16` length prefix of a frame.
pub const FRAME_LENGTH_FIELD_SIZE: usize = 2;

/// Maximum frame body size used when none is configured.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 8 * 1024;

/// Smallest accepted maximum frame size.
pub const MIN_MAX_FRAME_SIZE: usize = 64;

/// Largest accepted maximum frame size. Bounded by the `u16` length prefix.
pub const MAX_MAX_FRAME_SIZE: usize = u16::MAX as usize;

// Field encoding tags

/// Literal name followed by a literal value.
pub const FIELD_TAG_LITERAL: u8 = 0x01;

/// Dictionary name reference followed by a literal value.
pub const FIELD_TAG_NAME_REFERENCE: u8 = 0x02;

/// Dictionary reference to a complete (name, value) pair.
pub const FIELD_TAG_INDEXED: u8 = 0x03;

/// Bit of a literal length prefix marking an entropy-coded payload.
/// The payload length occupies the remaining bits (`prefix >> 1`).
pub const LITERAL_ENTROPY_FLAG: u64 = 0x01;

// Dictionary related constants

/// Upper bound for the summed size of all registered names and values.
pub const MAX_DICTIONARY_CONTENT_SIZE: usize = 32 * 1024 * 1024;

/// Size in bytes of the `u16` max frame size field leading a dictionary dump.
pub const DUMP_MAX_FRAME_SIZE_FIELD_SIZE: usize = 2;

/// Size in bytes of the `u32` entries length field of a dictionary dump.
pub const DUMP_LENGTH_FIELD_SIZE: usize = 4;

/// Fixed-size prefix of a dictionary dump, before the entries.
pub const DUMP_HEADER_SIZE: usize = DUMP_MAX_FRAME_SIZE_FIELD_SIZE + DUMP_LENGTH_FIELD_SIZE;

/// Largest entries section accepted when loading a dictionary dump.
pub const MAX_DUMP_ENTRIES_SIZE: usize = 2 * MAX_DICTIONARY_CONTENT_SIZE;

// Varint related constants

/// Largest bit shift a varint may reach before its value overflows `u64`.
pub const VARINT_MAX_SHIFT: u32 = 63;

/// Longest possible encoding of a `u64` varint.
pub const VARINT_MAX_LEN: usize = 10;

// Pool related constants

/// Default number of idle instances retained by a pool.
pub const DEFAULT_POOL_IDLE_CAPACITY: usize = 64;

/// Buffers grown beyond this capacity are dropped instead of pooled.
pub const MAX_POOLED_BUFFER_CAPACITY: usize = 64 * 1024;

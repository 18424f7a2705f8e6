mod field_kind;
mod field_view;
mod frame_cursor;
mod literal;
mod packer_builder;
mod packer_decode;
mod packer_dump;
mod packer_encode;
mod packer_error;
mod packer_pool;
mod packer_struct;

pub use field_kind::FieldKind;
pub use field_view::{FieldSink, FieldView};
pub use packer_builder::PackerBuilder;
pub use packer_error::{PackerConfigError, PackerDecodeError, PackerEncodeError, PackerError};
pub use packer_pool::PackerPool;
pub use packer_struct::Packer;

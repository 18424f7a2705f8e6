use crate::constants::DEFAULT_MAX_FRAME_SIZE;
use crate::dictionary::{Dictionary, HeaderField};
use crate::entropy::{EntropyCoder, HuffmanCoder};
use crate::packer::packer_struct::{validate_dictionary, validate_max_frame_size};
use crate::packer::{Packer, PackerConfigError};
use std::sync::Arc;

/// Collects packer settings and dictionary registrations.
///
/// Names are trimmed and lower-cased, values trimmed; blank values are
/// ignored. Registering a name again merges its values, and registering a
/// pair again is a no-op, so the resulting indices only depend on the order
/// of first registration. Problems are reported by [`PackerBuilder::build`].
#[derive(Debug)]
pub struct PackerBuilder {
    max_frame_size: usize,
    fields: Vec<HeaderField>,
    coder: Arc<dyn EntropyCoder>,
    error: Option<PackerConfigError>,
}

impl Default for PackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackerBuilder {
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            fields: Vec::new(),
            coder: Arc::new(HuffmanCoder),
            error: None,
        }
    }

    /// Maximum body size of an encoded frame, `64..=65535` bytes.
    pub fn max_frame_size(mut self, n: usize) -> Self {
        self.max_frame_size = n;
        self
    }

    /// Registers a name without values.
    pub fn name(self, name: &str) -> Self {
        self.field(name, std::iter::empty::<&str>())
    }

    /// Registers a name together with known values.
    pub fn field<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            self.error.get_or_insert(PackerConfigError::EmptyFieldName);
            return self;
        }

        self.fields.push(HeaderField::name_only(name.clone()));
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            self.fields.push(HeaderField::new(name.clone(), value));
        }
        self
    }

    pub fn entropy_coder(mut self, coder: Arc<dyn EntropyCoder>) -> Self {
        self.coder = coder;
        self
    }

    /// Builds just the dictionary, for sharing between packers.
    pub fn build_dictionary(&self) -> Result<Dictionary, PackerConfigError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let dictionary = Dictionary::from_fields(self.fields.iter().cloned());
        validate_dictionary(&dictionary)?;
        Ok(dictionary)
    }

    pub fn build(self) -> Result<Packer, PackerConfigError> {
        validate_max_frame_size(self.max_frame_size)?;
        let dictionary = self.build_dictionary()?;

        tracing::debug!(
            "Packer built with {} dictionary entries, max frame size {}",
            dictionary.len(),
            self.max_frame_size
        );

        Ok(Packer {
            max_frame_size: self.max_frame_size,
            dictionary: Arc::new(dictionary),
            coder: self.coder,
            scratch: Vec::new(),
        })
    }
}

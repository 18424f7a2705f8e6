use crate::dictionary::HeaderField;
use crate::packer::PackerDecodeError;
use std::borrow::Cow;

/// A decoded field.
///
/// Raw literals borrow from the frame buffer and dictionary references
/// borrow from the dictionary, so a view cannot outlive either of them; in
/// particular it cannot survive the packer being reused or reset. Entropy
/// coded literals are the only owned parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub name: Cow<'a, [u8]>,
    pub value: Cow<'a, [u8]>,
}

impl<'a> FieldView<'a> {
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn to_field(&self) -> HeaderField {
        HeaderField::new(&*self.name, &*self.value)
    }

    pub fn into_field(self) -> HeaderField {
        HeaderField {
            name: self.name.into_owned(),
            value: self.value.into_owned(),
        }
    }
}

/// Receives decoded fields in frame order.
///
/// `Packer::decode_into` only starts feeding a sink once the whole frame
/// decoded successfully.
pub trait FieldSink {
    type Error;

    fn set_field(&mut self, name: &[u8], value: &[u8]) -> Result<(), Self::Error>;
}

impl FieldSink for Vec<HeaderField> {
    type Error = PackerDecodeError;

    fn set_field(&mut self, name: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.push(HeaderField::new(name, value));
        Ok(())
    }
}

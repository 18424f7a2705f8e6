use crate::dictionary::{Dictionary, HeaderField, normalize_name};
use crate::header::header_keys::BUILTIN_DICTIONARY;
use crate::header::{
    AGENT, AUTHORIZATION, Agent, BUILTIN_VOCABULARY, CONTENT_ENCODING, CONTENT_LENGTH,
    CONTENT_TYPE, FORWARDED, Forwarded, ForwardedHop, HeaderError, HeaderFields,
};
use crate::packer::{FieldSink, Packer, PackerBuilder};
use crate::varint::{decode_varint, encoded_varint};
use std::borrow::Cow;
use std::io::{Read, Write};
use std::sync::Arc;

/// The metadata of one RPC call.
///
/// Well-known attributes have typed storage; any other field lands in the
/// extension list. Frames cannot carry empty values, so a generic
/// [`Header::set`] with an empty value removes the field.
///
/// A header is meant to live for one call: take it from a
/// [`crate::header::HeaderPool`], fill it or [`Header::parse`] into it,
/// and release it when the call completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    agent: Agent,
    forwarded: Forwarded,
    authorization: Vec<u8>,
    content_length: u64,
    content_type: Vec<u8>,
    content_encoding: Vec<u8>,
    extensions: Vec<HeaderField>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-loaded with the well-known header names, ready for
    /// application specific registrations.
    pub fn packer_builder() -> PackerBuilder {
        BUILTIN_VOCABULARY
            .iter()
            .fold(Packer::builder(), |builder, (name, values)| {
                builder.field(name, values.iter())
            })
    }

    /// The dictionary of well-known header names, shared process-wide.
    pub fn builtin_dictionary() -> Arc<Dictionary> {
        Arc::clone(&BUILTIN_DICTIONARY)
    }

    pub fn agent(&self) -> Option<&Agent> {
        (!self.agent.is_empty()).then_some(&self.agent)
    }

    pub fn set_agent(
        &mut self,
        id: impl AsRef<[u8]>,
        device: impl AsRef<[u8]>,
    ) -> Result<(), HeaderError> {
        self.agent.assign(id.as_ref(), device.as_ref())
    }

    pub fn clear_agent(&mut self) {
        self.agent.clear();
    }

    pub fn forwarded(&self) -> &Forwarded {
        &self.forwarded
    }

    /// Appends a hop to the forwarding chain.
    pub fn add_forwarded(
        &mut self,
        name: impl AsRef<[u8]>,
        host: impl AsRef<[u8]>,
        proto: impl AsRef<[u8]>,
    ) -> Result<(), HeaderError> {
        self.forwarded.push(ForwardedHop::new(name, host, proto)?);
        Ok(())
    }

    pub fn clear_forwarded(&mut self) {
        self.forwarded.clear();
    }

    pub fn authorization(&self) -> Option<&[u8]> {
        non_empty(&self.authorization)
    }

    pub fn set_authorization(&mut self, value: impl AsRef<[u8]>) {
        assign(&mut self.authorization, value.as_ref());
    }

    pub fn clear_authorization(&mut self) {
        self.authorization.clear();
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    pub fn set_content_length(&mut self, n: u64) {
        self.content_length = n;
    }

    pub fn clear_content_length(&mut self) {
        self.content_length = 0;
    }

    pub fn content_type(&self) -> Option<&[u8]> {
        non_empty(&self.content_type)
    }

    pub fn set_content_type(&mut self, value: impl AsRef<[u8]>) {
        assign(&mut self.content_type, value.as_ref());
    }

    pub fn clear_content_type(&mut self) {
        self.content_type.clear();
    }

    pub fn content_encoding(&self) -> Option<&[u8]> {
        non_empty(&self.content_encoding)
    }

    pub fn set_content_encoding(&mut self, value: impl AsRef<[u8]>) {
        assign(&mut self.content_encoding, value.as_ref());
    }

    pub fn clear_content_encoding(&mut self) {
        self.content_encoding.clear();
    }

    /// Fields without a well-known name, in insertion order.
    pub fn extensions(&self) -> &[HeaderField] {
        &self.extensions
    }

    /// Looks a field up by name, case-insensitively. Structured attributes
    /// are returned in their wire form.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<Cow<'_, [u8]>> {
        let name = normalize_name(name.as_ref());
        match &*name {
            n if n == AGENT.as_bytes() => self.agent().map(|agent| Cow::Owned(agent.to_value())),
            n if n == FORWARDED.as_bytes() => {
                (!self.forwarded.is_empty()).then(|| Cow::Owned(self.forwarded.to_value()))
            }
            n if n == AUTHORIZATION.as_bytes() => self.authorization().map(Cow::Borrowed),
            n if n == CONTENT_LENGTH.as_bytes() => {
                Some(Cow::Owned(encoded_varint(self.content_length)))
            }
            n if n == CONTENT_TYPE.as_bytes() => self.content_type().map(Cow::Borrowed),
            n if n == CONTENT_ENCODING.as_bytes() => self.content_encoding().map(Cow::Borrowed),
            n => self
                .extensions
                .iter()
                .find(|field| field.name == n)
                .map(|field| Cow::Borrowed(field.value.as_slice())),
        }
    }

    /// Sets a field by name, case-insensitively.
    ///
    /// Well-known names are parsed into their typed storage; `agent`,
    /// `forwarded` and `content-length` must be in wire form. Other names
    /// replace an extension of the same name or append a new one. An empty
    /// value removes the field and an empty name is ignored.
    pub fn set(
        &mut self,
        name: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> Result<(), HeaderError> {
        let (name, value) = (name.as_ref(), value.as_ref());
        if name.is_empty() {
            return Ok(());
        }
        if value.is_empty() {
            self.remove(name);
            return Ok(());
        }

        let name = normalize_name(name);
        match &*name {
            n if n == AGENT.as_bytes() => self.agent = Agent::parse(value)?,
            n if n == FORWARDED.as_bytes() => self.forwarded = Forwarded::parse(value)?,
            n if n == AUTHORIZATION.as_bytes() => self.set_authorization(value),
            n if n == CONTENT_LENGTH.as_bytes() => {
                self.content_length = match decode_varint(value) {
                    Ok((n, consumed)) if consumed == value.len() => n,
                    _ => return Err(HeaderError::InvalidContentLength),
                };
            }
            n if n == CONTENT_TYPE.as_bytes() => self.set_content_type(value),
            n if n == CONTENT_ENCODING.as_bytes() => self.set_content_encoding(value),
            n => match self.extensions.iter_mut().find(|field| field.name == n) {
                Some(field) => assign(&mut field.value, value),
                None => self.extensions.push(HeaderField::new(n, value)),
            },
        }
        Ok(())
    }

    /// Clears a field by name. Returns whether it was set.
    pub fn remove(&mut self, name: impl AsRef<[u8]>) -> bool {
        let name = normalize_name(name.as_ref());
        match &*name {
            n if n == AGENT.as_bytes() => {
                let was_set = !self.agent.is_empty();
                self.clear_agent();
                was_set
            }
            n if n == FORWARDED.as_bytes() => {
                let was_set = !self.forwarded.is_empty();
                self.clear_forwarded();
                was_set
            }
            n if n == AUTHORIZATION.as_bytes() => take_flag(&mut self.authorization),
            n if n == CONTENT_LENGTH.as_bytes() => {
                let was_set = self.content_length != 0;
                self.clear_content_length();
                was_set
            }
            n if n == CONTENT_TYPE.as_bytes() => take_flag(&mut self.content_type),
            n if n == CONTENT_ENCODING.as_bytes() => take_flag(&mut self.content_encoding),
            n => {
                let before = self.extensions.len();
                self.extensions.retain(|field| field.name != n);
                self.extensions.len() != before
            }
        }
    }

    /// The fields of this header in wire order.
    pub fn iter(&self) -> HeaderFields<'_> {
        HeaderFields::new(self)
    }

    /// Encodes this header into a frame.
    pub fn flush(&self, packer: &mut Packer) -> Result<Vec<u8>, HeaderError> {
        Ok(packer.encode(self.iter())?)
    }

    /// Encodes this header and writes the frame to `writer`.
    pub fn flush_to<W: Write>(
        &self,
        packer: &mut Packer,
        writer: &mut W,
    ) -> Result<usize, HeaderError> {
        packer
            .pack_to(writer, self.iter())
            .map_err(HeaderError::Flush)
    }

    /// Replaces the content of this header with the fields of `frame`.
    ///
    /// On error the header is left empty.
    pub fn parse(&mut self, frame: &[u8], packer: &Packer) -> Result<(), HeaderError> {
        self.reset();
        if let Err(err) = packer.decode_into(frame, &mut *self) {
            self.reset();
            return Err(err);
        }
        Ok(())
    }

    /// Reads one frame from `reader` and parses it into this header.
    pub fn parse_from<R: Read>(
        &mut self,
        reader: &mut R,
        packer: &mut Packer,
    ) -> Result<(), HeaderError> {
        self.reset();
        let fields = packer.unpack_from(reader).map_err(HeaderError::Parse)?;
        for field in &fields {
            if let Err(err) = self.set(&field.name, &field.value) {
                self.reset();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Clears every attribute. Allocated storage is kept for reuse.
    pub fn reset(&mut self) {
        self.agent.clear();
        self.forwarded.clear();
        self.authorization.clear();
        self.content_length = 0;
        self.content_type.clear();
        self.content_encoding.clear();
        self.extensions.clear();
    }
}

impl FieldSink for Header {
    type Error = HeaderError;

    fn set_field(&mut self, name: &[u8], value: &[u8]) -> Result<(), HeaderError> {
        self.set(name, value)
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = (&'a [u8], Cow<'a, [u8]>);
    type IntoIter = HeaderFields<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn non_empty(value: &[u8]) -> Option<&[u8]> {
    (!value.is_empty()).then_some(value)
}

fn assign(dst: &mut Vec<u8>, value: &[u8]) {
    dst.clear();
    dst.extend_from_slice(value);
}

fn take_flag(value: &mut Vec<u8>) -> bool {
    let was_set = !value.is_empty();
    value.clear();
    was_set
}

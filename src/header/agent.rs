use crate::header::{FIELD_SEPARATOR, HeaderError};

/// The calling agent, sent as `id;device`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agent {
    id: Vec<u8>,
    device: Vec<u8>,
}

impl Agent {
    /// Fails if `id` contains `;`. The device is free-form.
    pub fn new(id: impl AsRef<[u8]>, device: impl AsRef<[u8]>) -> Result<Self, HeaderError> {
        let mut agent = Self::default();
        agent.assign(id.as_ref(), device.as_ref())?;
        Ok(agent)
    }

    /// Parses an `id;device` value, splitting at the first separator.
    pub fn parse(value: &[u8]) -> Result<Self, HeaderError> {
        let split = value
            .iter()
            .position(|&b| b == FIELD_SEPARATOR)
            .ok_or(HeaderError::InvalidAgent)?;
        Ok(Self {
            id: value[..split].to_vec(),
            device: value[split + 1..].to_vec(),
        })
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn device(&self) -> &[u8] {
        &self.device
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.device.is_empty()
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id);
        out.push(FIELD_SEPARATOR);
        out.extend_from_slice(&self.device);
    }

    pub fn to_value(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.id.len() + 1 + self.device.len());
        self.encode_into(&mut out);
        out
    }

    pub(crate) fn assign(&mut self, id: &[u8], device: &[u8]) -> Result<(), HeaderError> {
        if id.contains(&FIELD_SEPARATOR) {
            return Err(HeaderError::ReservedSeparator {
                attribute: "agent id",
                separator: FIELD_SEPARATOR,
            });
        }
        self.id.clear();
        self.id.extend_from_slice(id);
        self.device.clear();
        self.device.extend_from_slice(device);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.id.clear();
        self.device.clear();
    }
}

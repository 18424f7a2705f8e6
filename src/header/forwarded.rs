use crate::header::{FIELD_SEPARATOR, HOP_SEPARATOR, HeaderError};

/// One proxy hop of a forwarding chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHop {
    name: Vec<u8>,
    host: Vec<u8>,
    proto: Vec<u8>,
}

impl ForwardedHop {
    /// Fails if any part contains `;` or `,`.
    pub fn new(
        name: impl AsRef<[u8]>,
        host: impl AsRef<[u8]>,
        proto: impl AsRef<[u8]>,
    ) -> Result<Self, HeaderError> {
        let hop = Self {
            name: name.as_ref().to_vec(),
            host: host.as_ref().to_vec(),
            proto: proto.as_ref().to_vec(),
        };
        for part in [&hop.name, &hop.host, &hop.proto] {
            for separator in [FIELD_SEPARATOR, HOP_SEPARATOR] {
                if part.contains(&separator) {
                    return Err(HeaderError::ReservedSeparator {
                        attribute: "forwarded hop",
                        separator,
                    });
                }
            }
        }
        Ok(hop)
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn host(&self) -> &[u8] {
        &self.host
    }

    pub fn proto(&self) -> &[u8] {
        &self.proto
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.name);
        out.push(FIELD_SEPARATOR);
        out.extend_from_slice(&self.host);
        out.push(FIELD_SEPARATOR);
        out.extend_from_slice(&self.proto);
    }
}

/// The chain of hops a call passed through, oldest first. Sent as
/// `name;host;proto` hops joined by `,`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forwarded {
    hops: Vec<ForwardedHop>,
}

impl Forwarded {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(value: &[u8]) -> Result<Self, HeaderError> {
        let mut hops = Vec::new();
        for hop in value.split(|&b| b == HOP_SEPARATOR) {
            let mut parts = hop.split(|&b| b == FIELD_SEPARATOR);
            let (Some(name), Some(host), Some(proto), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(HeaderError::InvalidForwarded);
            };
            hops.push(ForwardedHop {
                name: name.to_vec(),
                host: host.to_vec(),
                proto: proto.to_vec(),
            });
        }
        Ok(Self { hops })
    }

    pub fn push(&mut self, hop: ForwardedHop) {
        self.hops.push(hop);
    }

    /// The hop closest to the original caller.
    pub fn head(&self) -> Option<&ForwardedHop> {
        self.hops.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForwardedHop> {
        self.hops.iter()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                out.push(HOP_SEPARATOR);
            }
            hop.encode_into(out);
        }
    }

    pub fn to_value(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    pub(crate) fn clear(&mut self) {
        self.hops.clear();
    }
}

impl<'a> IntoIterator for &'a Forwarded {
    type Item = &'a ForwardedHop;
    type IntoIter = std::slice::Iter<'a, ForwardedHop>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.iter()
    }
}

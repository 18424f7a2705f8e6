use crate::header::{
    AGENT, AUTHORIZATION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, FORWARDED, Header,
};
use crate::varint::encoded_varint;
use std::borrow::Cow;

const WELL_KNOWN_COUNT: usize = 6;

/// Iterator over the fields of a [`Header`], in wire order.
///
/// Well-known attributes come first in a fixed order, unset ones skipped,
/// except `content-length` which is always present. Extensions follow in
/// insertion order.
#[derive(Debug, Clone)]
pub struct HeaderFields<'a> {
    header: &'a Header,
    position: usize,
}

impl<'a> HeaderFields<'a> {
    pub(crate) fn new(header: &'a Header) -> Self {
        Self {
            header,
            position: 0,
        }
    }
}

impl<'a> Iterator for HeaderFields<'a> {
    type Item = (&'a [u8], Cow<'a, [u8]>);

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.header;
        loop {
            let position = self.position;
            self.position += 1;

            let field = match position {
                0 => header
                    .agent()
                    .map(|agent| (AGENT.as_bytes(), Cow::Owned(agent.to_value()))),
                1 => (!header.forwarded().is_empty()).then(|| {
                    (
                        FORWARDED.as_bytes(),
                        Cow::Owned(header.forwarded().to_value()),
                    )
                }),
                2 => borrowed(AUTHORIZATION, header.authorization()),
                3 => Some((
                    CONTENT_LENGTH.as_bytes(),
                    Cow::Owned(encoded_varint(header.content_length())),
                )),
                4 => borrowed(CONTENT_TYPE, header.content_type()),
                5 => borrowed(CONTENT_ENCODING, header.content_encoding()),
                n => {
                    let extension = header.extensions().get(n - WELL_KNOWN_COUNT)?;
                    Some((
                        extension.name.as_slice(),
                        Cow::Borrowed(extension.value.as_slice()),
                    ))
                }
            };

            if field.is_some() {
                return field;
            }
        }
    }
}

fn borrowed<'a>(name: &'static str, value: Option<&'a [u8]>) -> Option<(&'a [u8], Cow<'a, [u8]>)> {
    value.map(|value| (name.as_bytes(), Cow::Borrowed(value)))
}

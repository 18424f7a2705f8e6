use headpack::header::{CONTENT_ENCODING_SNAPPY, Header, HeaderError};
use headpack::packer::{Packer, PackerConfigError};

pub const TENANT_KEY: &str = "x-tenant";
pub const TRACE_KEY: &str = "x-trace-id";

/// The packer a service provisions its clients with: the builtin header
/// vocabulary plus the service's own fields.
pub fn service_packer() -> Result<Packer, PackerConfigError> {
    Header::packer_builder()
        .max_frame_size(2048)
        .field(TENANT_KEY, ["acme", "globex", "initech"])
        .field("content-type", ["application/json", "application/octet-stream"])
        .name(TRACE_KEY)
        .build()
}

/// Metadata of a typical call, varying with `call`.
pub fn sample_header(call: u64) -> Result<Header, HeaderError> {
    let mut header = Header::new();
    header.set_agent("checkout", "pod-3")?;
    header.add_forwarded("edge", "10.0.0.1", "https")?;
    header.set_authorization(format!("Bearer token-{:08x}", call));
    header.set_content_length(call * 64);
    header.set_content_type("application/json");
    header.set_content_encoding(CONTENT_ENCODING_SNAPPY);
    header.set(TENANT_KEY, ["acme", "globex"][(call % 2) as usize])?;
    header.set(TRACE_KEY, format!("{:016x}", call.wrapping_mul(0x9e37_79b9_7f4a_7c15)))?;
    Ok(header)
}

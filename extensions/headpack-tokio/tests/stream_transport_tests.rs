use headpack::header::{Header, HeaderError};
use headpack::packer::{Packer, PackerDecodeError, PackerError};
use headpack_tokio::{
    read_frame, recv_dictionary, recv_header, send_dictionary, send_header, write_frame,
};
use tokio::io::{AsyncWriteExt, duplex};

fn server_packer() -> Packer {
    Header::packer_builder()
        .max_frame_size(1024)
        .field("x-tenant", ["acme", "globex"])
        .field("content-type", ["application/json", "text/plain"])
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_dictionary_handshake_then_headers() {
    let (mut client_io, mut server_io) = duplex(4096);

    // 1. --- SERVER PROVISIONS ITS DICTIONARY ---
    let server = server_packer();
    let sent = send_dictionary(&mut server_io, &server).await.unwrap();
    assert_eq!(sent, server.dump().len());

    let mut client = Packer::new();
    recv_dictionary(&mut client_io, &mut client).await.unwrap();
    assert_eq!(client.max_frame_size(), 1024);
    assert_eq!(client.dump(), server.dump());

    // 2. --- CLIENT SENDS A HEADER THE SERVER CAN DECODE ---
    let mut header = Header::new();
    header.set_agent("billing", "node-7").unwrap();
    header.add_forwarded("edge", "10.1.0.1", "https").unwrap();
    header.set_content_type("application/json");
    header.set_content_length(512);
    header.set("x-tenant", "acme").unwrap();

    send_header(&mut client_io, &mut client, &header).await.unwrap();

    let mut received = Header::new();
    let mut buf = Vec::new();
    recv_header(&mut server_io, &server, &mut received, &mut buf)
        .await
        .unwrap();
    assert_eq!(received, header);

    // Server reuses the same header for the next call.
    header.reset();
    header.set_content_length(1);
    send_header(&mut client_io, &mut client, &header).await.unwrap();
    recv_header(&mut server_io, &server, &mut received, &mut buf)
        .await
        .unwrap();
    assert_eq!(received, header);
}

#[tokio::test]
async fn test_oversized_frame_is_rejected_before_reading_body() {
    let (mut a, mut b) = duplex(256);

    // Declares 200 bytes against a max of 64; body never sent.
    a.write_all(&200u16.to_le_bytes()).await.unwrap();

    let mut buf = Vec::new();
    let err = read_frame(&mut b, &mut buf, 64).await.unwrap_err();
    assert!(matches!(
        err,
        PackerError::Decode(PackerDecodeError::FrameTooLarge {
            max: 64,
            actual: 200
        })
    ));
}

#[tokio::test]
async fn test_truncated_stream_is_an_io_error() {
    let (mut a, mut b) = duplex(256);
    a.write_all(&[10, 0, 1, 2, 3]).await.unwrap();
    drop(a);

    let mut buf = Vec::new();
    let err = read_frame(&mut b, &mut buf, 1024).await.unwrap_err();
    match err {
        PackerError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupt_dump_leaves_packer_unchanged() {
    let (mut a, mut b) = duplex(256);

    // Valid header claiming 3 bytes of entries, then an empty name literal.
    write_frame(&mut a, &[0x00, 0x04, 3, 0, 0, 0, 0, 0, 0])
        .await
        .unwrap();

    let mut packer = server_packer();
    let before = packer.dump();
    let err = recv_dictionary(&mut b, &mut packer).await.unwrap_err();
    assert!(matches!(
        err,
        PackerError::Decode(PackerDecodeError::InvalidDump(_))
    ));
    assert_eq!(packer.dump(), before);
}

#[tokio::test]
async fn test_malformed_header_frame_reports_parse_error() {
    let (mut a, mut b) = duplex(256);
    // One field with an unknown tag.
    write_frame(&mut a, &[1, 0, 0x7f]).await.unwrap();

    let packer = server_packer();
    let mut header = Header::new();
    header.set_authorization("stale");
    let mut buf = Vec::new();
    let err = recv_header(&mut b, &packer, &mut header, &mut buf)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HeaderError::Parse(PackerError::Decode(
            PackerDecodeError::UnknownFieldKind { tag: 0x7f, offset: 0 }
        ))
    ));
    assert_eq!(header, Header::new());
}

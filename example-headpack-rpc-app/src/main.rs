use example_headpack_rpc_app::{TENANT_KEY, sample_header, service_packer};
use headpack::header::HeaderPool;
use headpack::packer::Packer;
use headpack::utils::BufferPool;
use headpack_tokio::{recv_dictionary, recv_header, send_dictionary, send_header};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::EnvFilter;

const CALLS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Bind to a random available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_packer = Arc::new(service_packer()?);
    let headers = Arc::new(HeaderPool::default());
    let buffers = Arc::new(BufferPool::default());

    let server_task = tokio::spawn(async move {
        let (mut socket, peer) = listener.accept().await?;
        tracing::info!("Accepted connection from {}", peer);

        // Provision the client before it sends anything.
        send_dictionary(&mut socket, &server_packer).await?;

        for _ in 0..CALLS {
            let mut header = headers.acquire();
            let mut buf = buffers.borrow(server_packer.max_frame_size());

            let result = recv_header(&mut socket, &server_packer, &mut header, &mut buf).await;
            match result {
                Ok(()) => {
                    tracing::info!(
                        "Call with {} byte frame: tenant={:?} content-length={}",
                        buf.len(),
                        header.get(TENANT_KEY).map(|v| String::from_utf8_lossy(&v).into_owned()),
                        header.content_length()
                    );
                    buffers.give_back(buf);
                }
                Err(err) => {
                    tracing::error!("Dropping connection: {}", err);
                    buffers.discard(buf);
                    headers.release(header);
                    break;
                }
            }
            headers.release(header);
        }
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
    });

    let mut socket = TcpStream::connect(addr).await?;
    let mut client_packer = Packer::new();
    recv_dictionary(&mut socket, &mut client_packer).await?;

    for call in 0..CALLS {
        let header = sample_header(call)?;
        let sent = send_header(&mut socket, &mut client_packer, &header).await?;
        let plain: usize = header.iter().map(|(n, v)| n.len() + v.len()).sum();
        println!("Call {}: {} field bytes sent as {} frame bytes", call, plain, sent);
    }

    server_task.await?.map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}

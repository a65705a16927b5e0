use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::auth::AuthSession;
use crate::client::ClientRegistry;
use crate::config::ServerConfig;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::storage::StoreHandle;

/// One read from the control connection.
#[derive(Debug, PartialEq)]
enum LineRead {
    Eof,
    Line(String),
    TooLong,
    NotUtf8,
}

/// Reads one command line, buffering at most `max_len` bytes plus the line
/// terminator. Anything past the limit is discarded up to the next newline.
async fn read_command_line<R>(reader: &mut R, max_len: usize) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    let limit = max_len as u64 + 2;
    let mut buf = Vec::new();
    let read = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }

    if !buf.ends_with(b"\n") && buf.len() as u64 >= limit {
        discard_until_newline(reader).await?;
        return Ok(LineRead::TooLong);
    }

    let content = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
    let content = content.strip_suffix(b"\r").unwrap_or(content);
    if content.len() > max_len {
        return Ok(LineRead::TooLong);
    }

    match String::from_utf8(content.to_vec()) {
        Ok(line) => Ok(LineRead::Line(line)),
        Err(_) => Ok(LineRead::NotUtf8),
    }
}

async fn discard_until_newline<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = chunk.len();
                reader.consume(len);
            }
        }
    }
}

/// Serves one client connection until it quits, disconnects or idles out.
///
/// - Each connection owns its own [`AuthSession`], so the session flag is
///   never shared between clients.
/// - The registry mirrors which username, if any, the connection is
///   authenticated as.
pub async fn handle_client(
    cmd_stream: TcpStream,
    client_addr: SocketAddr,
    store: StoreHandle,
    registry: Arc<Mutex<ClientRegistry>>,
    config: Arc<ServerConfig>,
) -> Result<(), std::io::Error> {
    let (read_half, mut write_half) = cmd_stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut session = AuthSession::new(store);

    write_half
        .write_all(format_response(responses::READY, "RAX auth service ready").as_bytes())
        .await?;
    write_half.flush().await?;

    loop {
        let read = timeout(
            config.idle_timeout(),
            read_command_line(&mut reader, config.max_command_length),
        )
        .await;

        let line = match read {
            Ok(Ok(LineRead::Line(line))) => line,
            Ok(Ok(LineRead::Eof)) => {
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(Ok(LineRead::TooLong)) => {
                write_half
                    .write_all(
                        format_response(responses::SYNTAX_ERROR, "Command too long").as_bytes(),
                    )
                    .await?;
                continue;
            }
            Ok(Ok(LineRead::NotUtf8)) => {
                debug!("Client {} sent a line that is not UTF-8", client_addr);
                write_half
                    .write_all(
                        format_response(responses::SYNTAX_ERROR, "Unknown command").as_bytes(),
                    )
                    .await?;
                continue;
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                info!("Client {} idle for too long, closing", client_addr);
                let _ = write_half
                    .write_all(
                        format_response(responses::SERVICE_UNAVAILABLE, "Idle timeout").as_bytes(),
                    )
                    .await;
                break;
            }
        };

        let command = parse_command(&line);
        // Commands carry secrets; only the verb is logged.
        debug!(
            "Received from {}: {}",
            client_addr,
            line.split_whitespace().next().unwrap_or("")
        );

        let result = handle_command(&mut session, &command);

        let username = session
            .is_authenticated()
            .then(|| session.username().to_string());
        registry.lock().await.set_username(&client_addr, username);

        if let Some(msg) = &result.message {
            write_half.write_all(msg.as_bytes()).await?;
        }

        match result.status {
            CommandStatus::CloseConnection => {
                info!("Client {} requested to quit", client_addr);
                break;
            }
            CommandStatus::Failure(reason) => {
                debug!("Command from {} failed: {}", client_addr, reason);
            }
            CommandStatus::Success => {}
        }
    }

    if let Err(e) = write_half.shutdown().await {
        warn!("Failed to shut down connection to {}: {}", client_addr, e);
    }
    Ok(())
}

use super::{HttpResponse, Transport};
use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default bound on one request, connect through last body byte
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const READ_CHUNK: usize = 4096;

/// Largest response we accept, headers included
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Minimal HTTP/1.1 GET client over tokio
///
/// One connection per request (`Connection: close`); the receiver's web
/// server does not keep sessions and neither do we.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    /// Transport bounding each request by `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let target = Target::parse(url)?;
        tracing::debug!("GET {}", url);

        let response = timeout(self.timeout, target.get())
            .await
            .map_err(|_| TransportError::Timeout)??;

        if !response.is_success() {
            tracing::warn!("{} answered HTTP {}", target.authority, response.status);
        }
        Ok(response)
    }
}

/// Pieces of an `http://` URL
#[derive(Debug, PartialEq, Eq)]
struct Target {
    host: String,
    port: u16,
    authority: String,
    path: String,
}

impl Target {
    fn parse(url: &str) -> Result<Self, TransportError> {
        let invalid = || TransportError::InvalidUrl(url.to_string());

        let rest = url.strip_prefix("http://").ok_or_else(invalid)?;
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            // [v6]:port
            let (host, after) = bracketed.split_once(']').ok_or_else(invalid)?;
            let port = match after.strip_prefix(':') {
                Some(p) => p.parse().map_err(|_| invalid())?,
                None if after.is_empty() => 80,
                None => return Err(invalid()),
            };
            (host, port)
        } else {
            match authority.rsplit_once(':') {
                Some((host, p)) => (host, p.parse().map_err(|_| invalid())?),
                None => (authority, 80),
            }
        };

        if host.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            host: host.to_string(),
            port,
            authority: authority.to_string(),
            path: path.to_string(),
        })
    }

    async fn get(&self) -> Result<HttpResponse, TransportError> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;

        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nAccept: */*\r\nConnection: close\r\n\r\n",
            self.path, self.authority
        );
        stream.write_all(request.as_bytes()).await?;

        let mut raw = Vec::new();
        let mut head_end = None;
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = stream.read(&mut buf).await?;
            let eof = n == 0;
            let scanned = raw.len();
            raw.extend_from_slice(&buf[..n]);
            if raw.len() > MAX_RESPONSE_BYTES {
                return Err(too_large());
            }

            if head_end.is_none() {
                // The terminator may straddle two reads
                let from = scanned.saturating_sub(3);
                head_end = find(&raw[from..], b"\r\n\r\n").map(|i| from + i);
            }
            let Some(head_end) = head_end else {
                if eof {
                    return Err(TransportError::InvalidResponse("Truncated headers".to_string()));
                }
                continue;
            };

            if let Some(response) = parse_head_and_body(&raw, head_end, eof)? {
                return Ok(response);
            }
        }
    }
}

/// Try to parse a complete response out of `raw`
///
/// Returns `Ok(None)` while more bytes are needed. At `eof` an incomplete
/// response is an error.
#[cfg(test)]
fn parse_response(raw: &[u8], eof: bool) -> Result<Option<HttpResponse>, TransportError> {
    match find(raw, b"\r\n\r\n") {
        Some(head_end) => parse_head_and_body(raw, head_end, eof),
        None if eof => Err(TransportError::InvalidResponse("Truncated headers".to_string())),
        None => Ok(None),
    }
}

/// Parse a response whose header block ends at `head_end`
fn parse_head_and_body(
    raw: &[u8],
    head_end: usize,
    eof: bool,
) -> Result<Option<HttpResponse>, TransportError> {
    let head = std::str::from_utf8(&raw[..head_end])
        .map_err(|_| TransportError::InvalidResponse("Headers are not UTF-8".to_string()))?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.split_whitespace();
    let status = match (parts.next(), parts.next()) {
        (Some(version), Some(code)) if version.starts_with("HTTP/") => code
            .parse::<u16>()
            .map_err(|_| TransportError::InvalidResponse(format!("Bad status line: {}", status_line)))?,
        _ => {
            return Err(TransportError::InvalidResponse(format!("Bad status line: {}", status_line)));
        }
    };

    let mut content_length = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            let len = value.parse::<usize>().map_err(|_| {
                TransportError::InvalidResponse(format!("Bad Content-Length: {}", value))
            })?;
            if len > MAX_RESPONSE_BYTES {
                return Err(too_large());
            }
            content_length = Some(len);
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = value.to_ascii_lowercase().contains("chunked");
        }
    }

    let body = &raw[head_end + 4..];
    let truncated = || TransportError::InvalidResponse("Truncated body".to_string());

    if status == 204 || status == 304 {
        return Ok(Some(HttpResponse::new(status, Vec::new())));
    }

    if chunked {
        return match decode_chunked(body)? {
            Some(decoded) => Ok(Some(HttpResponse::new(status, decoded))),
            None if eof => Err(truncated()),
            None => Ok(None),
        };
    }

    match content_length {
        Some(len) if body.len() >= len => Ok(Some(HttpResponse::new(status, &body[..len]))),
        Some(_) if eof => Err(truncated()),
        Some(_) => Ok(None),
        None if eof => Ok(Some(HttpResponse::new(status, body))),
        None => Ok(None),
    }
}

/// Decode a chunked body, `None` if the final chunk has not arrived
fn decode_chunked(mut data: &[u8]) -> Result<Option<Vec<u8>>, TransportError> {
    let mut out = Vec::new();
    loop {
        let Some(line_end) = find(data, b"\r\n") else {
            return Ok(None);
        };
        let size_line = std::str::from_utf8(&data[..line_end])
            .map_err(|_| TransportError::InvalidResponse("Bad chunk size".to_string()))?;
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| TransportError::InvalidResponse(format!("Bad chunk size: {}", size_hex)))?;
        data = &data[line_end + 2..];

        if size == 0 {
            return Ok(Some(out));
        }
        if size > MAX_RESPONSE_BYTES - out.len() {
            return Err(too_large());
        }
        let framed = size.checked_add(2).ok_or_else(too_large)?;
        if data.len() < framed {
            return Ok(None);
        }
        out.extend_from_slice(&data[..size]);
        data = &data[framed..];
    }
}

fn too_large() -> TransportError {
    TransportError::InvalidResponse(format!("Response exceeds {} bytes", MAX_RESPONSE_BYTES))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_parse_url() {
        let target = Target::parse("http://192.168.1.50/StatusHandler.asp").unwrap();
        assert_eq!(target.host, "192.168.1.50");
        assert_eq!(target.port, 80);
        assert_eq!(target.path, "/StatusHandler.asp");

        let target = Target::parse("http://avr.local:8080/EventHandler.asp?WebToHostItem=PO").unwrap();
        assert_eq!(target.host, "avr.local");
        assert_eq!(target.port, 8080);
        assert_eq!(target.authority, "avr.local:8080");
        assert_eq!(target.path, "/EventHandler.asp?WebToHostItem=PO");

        let target = Target::parse("http://[::1]:81").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, 81);
        assert_eq!(target.path, "/");

        assert!(matches!(Target::parse("https://avr/"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(Target::parse("http://avr:port/"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(Target::parse("http:///x"), Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_content_length() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhel";
        assert_eq!(parse_response(raw, false).unwrap(), None);
        assert!(parse_response(raw, true).is_err());

        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";
        let response = parse_response(raw, false).unwrap().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"hello");
    }

    #[test]
    fn test_parse_read_to_close() {
        let raw = b"HTTP/1.0 404 Not Found\r\nServer: avr\r\n\r\nmissing";
        assert_eq!(parse_response(raw, false).unwrap(), None);
        let response = parse_response(raw, true).unwrap().unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.body, b"missing");
    }

    #[test]
    fn test_parse_chunked() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5;ext=1\r\npedia\r\n0\r\n\r\n";
        let response = parse_response(raw, false).unwrap().unwrap();
        assert_eq!(response.body, b"Wikipedia");

        let partial = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n";
        assert_eq!(parse_response(partial, false).unwrap(), None);
    }

    #[test]
    fn test_oversized_chunk_is_rejected() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nffffffffffffffff\r\nabc";
        assert!(matches!(parse_response(raw, false), Err(TransportError::InvalidResponse(_))));

        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n200000\r\nabc";
        assert!(matches!(parse_response(raw, false), Err(TransportError::InvalidResponse(_))));
    }

    #[test]
    fn test_oversized_content_length_is_rejected() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 99999999999\r\n\r\n";
        assert!(matches!(parse_response(raw, false), Err(TransportError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_response(b"SSH-2.0-OpenSSH\r\n\r\n", true),
            Err(TransportError::InvalidResponse(_))
        ));
        assert!(matches!(parse_response(b"HTTP/1.1 200", true), Err(TransportError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_fetch_against_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\n{}")
                .await
                .unwrap();
            request
        });

        let transport = HttpTransport::default();
        let response = transport
            .fetch(&format!("http://127.0.0.1:{}/StatusHandler.asp", port))
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, b"{}");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /StatusHandler.asp HTTP/1.1\r\n"));
        assert!(request.contains("Connection: close"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_chunk() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nffffffffffffffff\r\nabc")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(1)).await;
        });

        let transport = HttpTransport::new(Duration::from_millis(500));
        let result = transport.fetch(&format!("http://127.0.0.1:{}/", port)).await;
        assert!(matches!(result, Err(TransportError::InvalidResponse(_))));
        server.abort();
    }

    #[tokio::test]
    async fn test_fetch_rejects_endless_headers() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            let filler = vec![b'x'; 64 * 1024];
            socket.write_all(b"HTTP/1.1 200 OK\r\nX-Filler: ").await.unwrap();
            for _ in 0..32 {
                if socket.write_all(&filler).await.is_err() {
                    break;
                }
            }
        });

        let transport = HttpTransport::new(Duration::from_secs(5));
        let result = transport.fetch(&format!("http://127.0.0.1:{}/", port)).await;
        assert!(matches!(result, Err(TransportError::InvalidResponse(_))));
        server.abort();
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(socket);
        });

        let transport = HttpTransport::new(Duration::from_millis(100));
        let result = transport.fetch(&format!("http://127.0.0.1:{}/", port)).await;
        assert!(matches!(result, Err(TransportError::Timeout)));
        server.abort();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::default();
        let result = transport.fetch(&format!("http://127.0.0.1:{}/", port)).await;
        assert!(matches!(result, Err(TransportError::Io(_))));
    }
}

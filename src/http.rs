//! Fetching remote HTML pages together with their response headers.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of fetching a URL.
pub struct FetchResult {
    /// The fetched body bytes.
    pub data: Vec<u8>,
    /// Response headers as `(name, value)` pairs.
    ///
    /// Names come back lowercased from the HTTP stack, so match them with
    /// [`crate::HeaderCase::Insensitive`].
    pub headers: Vec<(String, String)>,
    /// Whether the server honored a Range request.
    pub range_supported: bool,
}

/// Errors that can occur during HTTP fetching.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => HttpError::HttpStatus {
                status: code,
                message: format!("Server returned status {code}"),
            },
            _ => HttpError::Network(err.to_string()),
        }
    }
}

/// Whether `input` looks like something [`fetch_url`] accepts.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Fetch a page, optionally limiting the body to its first `max_bytes`.
///
/// With a limit, a Range request is tried first; servers that ignore it
/// have their body truncated instead.
pub fn fetch_url(url: &str, max_bytes: Option<usize>) -> Result<FetchResult, HttpError> {
    if !is_url(url) {
        return Err(HttpError::InvalidUrl(format!(
            "URL must start with http:// or https://: {url}"
        )));
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(DEFAULT_TIMEOUT))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let mut request = agent.get(url);
    if let Some(bytes) = max_bytes {
        request = request.header("Range", &format!("bytes=0-{}", bytes.saturating_sub(1)));
    }

    let response = match request.call() {
        Ok(response) => response,
        // Range Not Satisfiable: the page is shorter than the window.
        Err(ureq::Error::StatusCode(416)) if max_bytes.is_some() => agent.get(url).call()?,
        Err(e) => return Err(e.into()),
    };

    let range_supported = response.status() == 206;
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();
    log::debug!("fetched {url}: status {}", response.status());

    let mut reader = response.into_body().into_reader();
    let mut data = Vec::new();
    match max_bytes {
        Some(bytes) => {
            reader.take(bytes as u64).read_to_end(&mut data)?;
        }
        None => {
            reader.read_to_end(&mut data)?;
        }
    }

    Ok(FetchResult {
        data,
        headers,
        range_supported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/page.html"));
        assert!(!is_url("page.html"));
        assert!(!is_url("ftp://example.com"));
    }

    /// Serve one canned response on a local port and return its URL.
    fn serve_once(response: &'static str) -> String {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            reader.get_mut().write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/page.html")
    }

    #[test]
    fn test_partial_content_response() {
        let url = serve_once(
            "HTTP/1.1 206 Partial Content\r\n\
             Content-Type: text/html; charset=koi8-r\r\n\
             Content-Length: 5\r\n\
             Connection: close\r\n\r\n<p>hi",
        );

        let fetched = fetch_url(&url, Some(5)).unwrap();
        assert!(fetched.range_supported);
        assert_eq!(fetched.data, b"<p>hi");
        assert!(
            fetched
                .headers
                .iter()
                .any(|(name, value)| name == "content-type" && value.contains("koi8-r"))
        );
    }

    #[test]
    fn test_full_response_is_truncated() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Length: 11\r\n\
             Connection: close\r\n\r\n<p>hi</p>!!",
        );

        let fetched = fetch_url(&url, Some(5)).unwrap();
        assert!(!fetched.range_supported);
        assert_eq!(fetched.data, b"<p>hi");
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let result = fetch_url("ftp://example.com/page.html", None);
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }
}

//! Source client and shared HTTP utilities for the OpenPrescribing API.

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::OpenRxError;

pub(crate) mod openprescribing;

const ERROR_BODY_MAX_BYTES: usize = 2048;

static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

pub(crate) fn env_base(default: &'static str, env_var: &str) -> Cow<'static, str> {
    std::env::var(env_var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(Cow::Owned)
        .unwrap_or_else(|| Cow::Borrowed(default))
}

/// BNF chemical codes are exactly 9 characters; only the length is checked
/// here, the API decides whether the code exists.
pub(crate) fn is_valid_chemical_code(code: &str) -> bool {
    code.chars().count() == 9
}

/// Returns the shared HTTP client: plain reqwest with request timeouts and
/// the crate user-agent, created once per process.
pub(crate) fn shared_client() -> Result<reqwest::Client, OpenRxError> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("openrx-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(OpenRxError::HttpClientInit)?;

    match HTTP_CLIENT.set(client.clone()) {
        Ok(()) => Ok(client),
        Err(_) => HTTP_CLIENT.get().cloned().ok_or_else(|| OpenRxError::Api {
            api: "http-client".into(),
            message: "Shared HTTP client initialization race".into(),
        }),
    }
}

pub(crate) fn body_excerpt(bytes: &[u8]) -> String {
    let full = String::from_utf8_lossy(bytes);

    let mut end = full.len().min(ERROR_BODY_MAX_BYTES);
    while end > 0 && !full.is_char_boundary(end) {
        end -= 1;
    }

    let mut excerpt = full[..end].trim().replace(['\n', '\r', '\t'], " ");
    if end < full.len() {
        excerpt.push_str(" …");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_code_is_exactly_nine_characters() {
        assert!(is_valid_chemical_code("0407010AD"));
        assert!(!is_valid_chemical_code("0407010ADAAABAB"));
        assert!(!is_valid_chemical_code("040701"));
        assert!(!is_valid_chemical_code(""));
    }

    #[test]
    fn code_length_counts_characters_not_bytes() {
        // 9 scalar values, more than 9 bytes.
        assert!(is_valid_chemical_code("040701Ä€Ð"));
    }

    #[test]
    fn body_excerpt_flattens_whitespace() {
        let excerpt = body_excerpt(b"  bad\ngateway\r\n");
        assert_eq!(excerpt, "bad gateway");
    }

    #[test]
    fn body_excerpt_truncates_long_bodies() {
        let body = "x".repeat(ERROR_BODY_MAX_BYTES + 100);
        let excerpt = body_excerpt(body.as_bytes());
        assert!(excerpt.len() < body.len());
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn body_excerpt_respects_char_boundaries() {
        let mut body = "é".repeat(ERROR_BODY_MAX_BYTES / 2);
        body.push_str("tail");
        let excerpt = body_excerpt(body.as_bytes());
        assert!(excerpt.starts_with('é'));
    }
}

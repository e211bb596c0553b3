use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, thiserror::Error)]
pub enum FileEncodeError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

/// Reads the whole stream and returns its standard base64 encoding, without
/// any `data:` prefix.
pub async fn file_to_base64<R>(mut reader: R) -> Result<String, FileEncodeError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).await?;
    Ok(STANDARD.encode(&buffer))
}

pub async fn path_to_base64(path: impl AsRef<Path>) -> Result<String, FileEncodeError> {
    let file = tokio::fs::File::open(path).await?;
    file_to_base64(file).await
}

/// Returns the payload of a `data:<type>;base64,<payload>` string, or the
/// input unchanged when it has no such prefix.
pub fn strip_data_uri_prefix(encoded: &str) -> &str {
    match encoded.split_once(',') {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    }
}

const PDF: &str = "application/pdf";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOC: &str = "application/msword";
const OCTET_STREAM: &str = "application/octet-stream";

/// Media type for the résumé formats the hiring API understands, keyed on the
/// lowercased text after the last dot.
pub fn media_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF,
        Some("docx") => DOCX,
        Some("doc") => DOC,
        _ => OCTET_STREAM,
    }
}

/// Data URI scheme sent next to an encoded file, e.g. `data:application/pdf;base64`.
pub fn data_uri_scheme(file_name: &str) -> String {
    format!("data:{};base64", media_type(file_name))
}

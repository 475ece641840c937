use std::io;
use std::path::Path;

/// Reads a file as UTF-8, replacing invalid byte sequences instead of failing.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(
                "'{}' is not valid UTF-8 (first bad byte at {}); replacing invalid sequences",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

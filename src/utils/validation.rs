use anyhow::{Result, anyhow};
use std::path::Path;

/// File extensions the processing backend can handle
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Checks whether a filename carries an extension the pipeline accepts.
/// The suffix after the last dot is matched case-insensitively; a filename
/// without a dot is never accepted. Rejection is a normal negative result,
/// not an error.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sanitizes filename to prevent path traversal and injection attacks
/// Returns the sanitized filename or an error if the name is invalid
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Get only the filename component (remove any path)
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        }));
    }

    // Check for path traversal attempts
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    // Remove dangerous characters, keep only safe ones
    // We allow most Unicode characters but block path separators and reserved characters
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == '/'
                || c == '\\'
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("report.pdf"));
        assert!(allowed_file("photo.jpg"));
        assert!(allowed_file("scan.jpeg"));
        assert!(allowed_file("diagram.png"));

        // Case-insensitive suffix match
        assert!(allowed_file("Report.PDF"));
        assert!(allowed_file("PHOTO.Jpg"));

        // Suffix is taken after the last dot
        assert!(allowed_file("my.holiday.photo.jpg"));
        assert!(!allowed_file("archive.tar.gz"));

        // No extension at all
        assert!(!allowed_file("noext"));
        assert!(!allowed_file(""));

        // Unsupported formats
        assert!(!allowed_file("song.mp3"));
        assert!(!allowed_file("page.html"));
        assert!(!allowed_file("pdf")); // no dot, not an extension
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test.pdf").unwrap(), "test.pdf");
        assert_eq!(sanitize_filename("my scan.jpg").unwrap(), "my scan.jpg");
        assert_eq!(
            sanitize_filename("test<script>.pdf").unwrap(),
            "test_script_.pdf"
        );
        assert_eq!(sanitize_filename("测试.png").unwrap(), "测试.png");

        // Path traversal
        assert_eq!(sanitize_filename("../../../etc/passwd").unwrap(), "passwd");
        assert_eq!(
            sanitize_filename("..\\..\\windows\\evil.pdf").unwrap(),
            ".._.._windows_evil.pdf"
        );

        // Names with no filename component are rejected
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["photo.jpg", "test_script_.pdf", "my scan.jpg", "测试.png"] {
            let once = sanitize_filename(name).unwrap();
            let twice = sanitize_filename(&once).unwrap();
            assert_eq!(once, twice);
        }
    }
}

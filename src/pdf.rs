//! PDF text extraction.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Extracts the text content of a PDF file.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed as a PDF or its text
/// layer cannot be decoded.
pub fn extract_text(path: &Path) -> Result<String> {
    let text = pdf_extract::extract_text(path).map_err(|e| Error::pdf(path, e.to_string()))?;
    debug!(
        "Extracted {} characters from {}",
        text.len(),
        path.display()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let bogus = temp.child("not-a-pdf.pdf");
        bogus.write_str("plain text, no PDF header").unwrap();

        let result = extract_text(bogus.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = extract_text(&temp.path().join("absent.pdf"));
        assert!(result.is_err());
    }
}

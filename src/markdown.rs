//! Markdown document writers: the folder-tree page and the PDF summary
//! wrapper pages.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const TREE_HEADER: &str = "# Folder Structure";

/// The embed attributes MkDocs needs to inline a PDF viewer.
const PDF_EMBED_ATTRS: &str = "{ type=application/pdf style=\"min-height:100vh;width:100%\" }";

/// Overwrites `path` with the rendered tree inside a fenced code block.
///
/// Layout: fixed header, blank line, opening fence, tree text, closing
/// fence. The write is not atomic; crash safety is a non-goal here.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_tree_document(tree: &str, path: &Path) -> Result<()> {
    let content = format!("{TREE_HEADER}\n\n```\n{tree}```\n");
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    debug!("Wrote tree document to {}", path.display());
    Ok(())
}

/// Builds the wrapper page body for a summarized PDF.
///
/// The page carries the summary followed by an inline embed of the PDF
/// itself, which is expected to sit next to the wrapper in the docs tree.
#[must_use]
pub fn summary_page(pdf_name: &str, summary: &str) -> String {
    format!(
        "# {pdf_name} (PDF file)\n\
         **Summary**\n\
         {summary}\n\
         **Lec file**\n\
         # {pdf_name} (PDF file)\n\
         ![Alt text](<./{pdf_name}>){PDF_EMBED_ATTRS}\n"
    )
}

/// Writes the wrapper page for `pdf_path`, next to the PDF with the same
/// stem and a `.md` extension. Returns the path written.
///
/// # Errors
///
/// Returns an error if the page cannot be written.
pub fn write_summary_page(pdf_path: &Path, summary: &str) -> Result<PathBuf> {
    let out_path = pdf_path.with_extension("md");
    let pdf_name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = summary_page(&pdf_name, summary);
    fs::write(&out_path, content).map_err(|e| Error::io(&out_path, e))?;
    debug!("Wrote summary page to {}", out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_tree_document_layout() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("README.md");

        write_tree_document("├── src\n└── readme.md\n", out.path()).unwrap();

        let content = fs::read_to_string(out.path()).unwrap();
        assert_eq!(
            content,
            "# Folder Structure\n\n```\n├── src\n└── readme.md\n```\n"
        );
    }

    #[test]
    fn test_empty_tree_document() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("README.md");

        write_tree_document("", out.path()).unwrap();

        let content = fs::read_to_string(out.path()).unwrap();
        assert_eq!(content, "# Folder Structure\n\n```\n```\n");
    }

    #[test]
    fn test_tree_document_overwrites() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("README.md");
        out.write_str("stale content that must disappear").unwrap();

        write_tree_document("└── a.txt\n", out.path()).unwrap();

        let content = fs::read_to_string(out.path()).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with("# Folder Structure"));
    }

    #[test]
    fn test_summary_page_layout() {
        let page = summary_page("lecture01.pdf", "A short summary.");

        assert!(page.starts_with("# lecture01.pdf (PDF file)\n"));
        assert!(page.contains("**Summary**\nA short summary.\n"));
        assert!(page.contains("**Lec file**"));
        assert!(page.contains("![Alt text](<./lecture01.pdf>)"));
        assert!(page.contains("type=application/pdf"));
    }

    #[test]
    fn test_write_summary_page_next_to_pdf() {
        let temp = assert_fs::TempDir::new().unwrap();
        let pdf = temp.child("notes/lecture01.pdf");
        pdf.write_str("%PDF-1.4").unwrap();

        let written = write_summary_page(pdf.path(), "Summary text").unwrap();

        assert_eq!(written, temp.path().join("notes/lecture01.md"));
        let content = fs::read_to_string(&written).unwrap();
        assert!(content.contains("lecture01.pdf (PDF file)"));
    }
}

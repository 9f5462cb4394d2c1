//! PDF text extraction for uploaded documents.

use std::fs;
use std::path::PathBuf;

use crate::core::errors::PipelineError;

/// Extracts text from the given PDF files and concatenates it in file
/// order; within a file, `pdf-extract` emits pages in page order.
///
/// Fails with `Extraction` if any file cannot be parsed as a PDF, and with
/// `EmptyContent` when the concatenation is empty or whitespace-only, which
/// is what scanned-image PDFs without an embedded text layer produce.
pub fn extract_text(paths: &[PathBuf]) -> Result<String, PipelineError> {
    let mut text = String::new();

    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");

        let bytes = fs::read(path)
            .map_err(|err| PipelineError::Extraction(format!("{}: {}", name, err)))?;
        let file_text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|err| PipelineError::Extraction(format!("{}: {}", name, err)))?;

        text.push_str(&file_text);
    }

    if text.trim().is_empty() {
        return Err(PipelineError::EmptyContent);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn garbage_bytes_fail_with_extraction_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("not-a-pdf.pdf");
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(b"this is not a pdf").expect("write");

        let err = extract_text(&[path]).unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }

    #[test]
    fn zero_files_fail_with_empty_content() {
        let err = extract_text(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyContent));
    }

    #[test]
    fn missing_file_fails_with_extraction_error() {
        let err = extract_text(&[PathBuf::from("/nonexistent/void.pdf")]).unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }
}

//! File validation for incoming documents

use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::error::{ExtractError, Result};

/// True for `*.docx` (any case), excluding Word's `~$` lock files
pub(crate) fn is_docx_candidate(file_path: &Path) -> bool {
    let is_docx = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));

    let is_lock_file = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"));

    is_docx && !is_lock_file
}

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        return Err(ExtractError::InvalidDocx(format!(
            "invalid file format: expected .docx file, got .{extension}"
        )));
    }

    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(ExtractError::InvalidDocx(
                "this appears to be an Excel file (.xlsx), not a Word document".to_string(),
            ));
        }

        return Err(ExtractError::InvalidDocx(
            "invalid .docx file: missing word/document.xml".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_docx_candidates() {
        assert!(is_docx_candidate(Path::new("word-docs/about.docx")));
        assert!(is_docx_candidate(Path::new("About.DOCX")));
        assert!(!is_docx_candidate(Path::new("~$about.docx")));
        assert!(!is_docx_candidate(Path::new("about.doc")));
        assert!(!is_docx_candidate(Path::new("notes")));
    }

    #[test]
    fn test_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        assert!(matches!(validate_docx_file(&path), Err(ExtractError::Zip(_))));
    }

    #[test]
    fn test_rejects_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("xl/workbook.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<workbook/>").unwrap();
        zip.finish().unwrap();

        let err = validate_docx_file(&path).unwrap_err();
        assert!(err.to_string().contains("Excel"));
    }
}

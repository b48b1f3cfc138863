//! Integration tests for error handling and edge cases.

use pdfdeck::PdfDeckError;
use pdfdeck::host::PresetDialogs;
use pdfdeck::{Mode, engine};
use tempfile::TempDir;

use crate::common::{fs_session, write_pdf};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let session = fs_session(PresetDialogs::new());
    let report = session
        .load_paths(&["/nonexistent/file.pdf".into()])
        .await
        .unwrap();

    assert!(report.loaded.is_empty());
    assert!(matches!(report.failures[0].error, PdfDeckError::FileIo { .. }));
    assert!(session.store().error().is_some());
    assert!(!session.store().is_loading());
}

#[tokio::test]
async fn test_error_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty.pdf");
    std::fs::write(&empty, b"").unwrap();

    let session = fs_session(PresetDialogs::new());
    let report = session.load_paths(&[empty]).await.unwrap();

    assert!(matches!(report.failures[0].error, PdfDeckError::Format { .. }));
    assert_eq!(
        session.store().error().as_deref(),
        Some("File appears to be empty")
    );
}

#[tokio::test]
async fn test_error_non_pdf_selection() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("notes.txt");
    std::fs::write(&notes, b"hello").unwrap();

    let session = fs_session(PresetDialogs::new());
    let err = session.load_paths(&[notes]).await.unwrap_err();

    assert_eq!(err.to_string(), "Please select PDF files only.");
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_error_split_mode_multiple_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 100, 1);

    let session = fs_session(PresetDialogs::new());
    session.set_mode(Mode::Split);
    let err = session.load_paths(&[a, b]).await.unwrap_err();

    assert!(matches!(err, PdfDeckError::ModeConstraint { .. }));
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_error_build_with_nothing_loaded() {
    let session = fs_session(PresetDialogs::new());
    let err = session.build_preview().await.unwrap_err();
    assert!(matches!(err, PdfDeckError::NothingSelected));
}

#[tokio::test]
async fn test_empty_path_list_is_noop() {
    let session = fs_session(PresetDialogs::new());
    let report = session.load_paths(&[]).await.unwrap();
    assert!(report.loaded.is_empty());
    assert!(report.failures.is_empty());
    assert!(!session.store().is_loading());
}

#[test]
fn test_error_extract_page_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "short.pdf", 100, 2);
    let bytes = std::fs::read(path).unwrap();

    let err = engine::extract(&bytes, &[0, 5], &engine::AssemblyOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        PdfDeckError::PageOutOfRange {
            page: 5,
            page_count: 2
        }
    ));
}

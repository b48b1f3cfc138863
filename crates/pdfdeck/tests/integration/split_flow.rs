//! End-to-end split mode: extraction and range splitting.

use pdfdeck::Mode;
use pdfdeck::error::PdfDeckError;
use pdfdeck::host::PresetDialogs;
use pdfdeck::model::PageSpan;
use tempfile::TempDir;

use crate::common::{fs_session, page_widths, write_pdf};

#[tokio::test]
async fn test_extract_selected_pages_in_selection_order() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "Contract.pdf", 100, 5);
    let output = temp_dir.path().join("extracted.pdf");

    let session = fs_session(PresetDialogs::new().with_save(&output));
    session.set_mode(Mode::Split);
    session.load_paths(&[source]).await.unwrap();

    let id = session.store().document_ids().remove(0);
    session.store().deselect_all_pages(&id);
    for page in [4, 1, 3] {
        session.store().toggle_page_selection(&id, page);
    }

    let preview = session.build_preview().await.unwrap();
    assert_eq!(preview.file_name, "Contract_extracted.pdf");
    session.save_preview(&preview).await.unwrap();

    assert_eq!(page_widths(&std::fs::read(&output).unwrap()), vec![104, 101, 103]);
    // Source is untouched
    assert_eq!(session.store().document(&id).unwrap().page_count(), 5);
}

#[tokio::test]
async fn test_split_mode_keeps_previous_document_on_failed_load() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "good.pdf", 100, 2);
    let bad = temp_dir.path().join("bad.pdf");
    std::fs::write(&bad, b"%PDF-1.4 truncated").unwrap();

    let session = fs_session(PresetDialogs::new());
    session.set_mode(Mode::Split);
    session.load_paths(&[good]).await.unwrap();

    let report = session.load_paths(&[bad]).await.unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.store().snapshot()[0].name(), "good.pdf");
    assert!(session.store().error().is_some());
}

#[tokio::test]
async fn test_split_into_ranges_and_save_parts() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "manual.pdf", 100, 6);
    let out_dir = temp_dir.path().join("parts");

    let session = fs_session(PresetDialogs::new());
    session.set_mode(Mode::Split);
    session.load_paths(&[source]).await.unwrap();
    let id = session.store().document_ids().remove(0);

    let spans = vec![
        PageSpan::new(0, 1),
        PageSpan::new(2, 2),
        PageSpan {
            start: 3,
            end: 5,
            file_name: Some("appendix.pdf".to_string()),
        },
    ];
    let parts = session.split_document(&id, spans).await.unwrap();
    let written = session.save_parts(&parts, &out_dir).await.unwrap();

    assert_eq!(written.len(), 3);
    assert!(out_dir.join("manual_part1.pdf").exists());
    assert!(out_dir.join("manual_part2.pdf").exists());
    assert_eq!(
        page_widths(&std::fs::read(out_dir.join("appendix.pdf")).unwrap()),
        vec![103, 104, 105]
    );
}

#[tokio::test]
async fn test_split_with_unbounded_range_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "short.pdf", 100, 2);

    let session = fs_session(PresetDialogs::new());
    session.set_mode(Mode::Split);
    session.load_paths(&[source]).await.unwrap();
    let id = session.store().document_ids().remove(0);

    let err = session
        .split_document(&id, vec![PageSpan::new(0, usize::MAX)])
        .await
        .unwrap_err();
    assert!(matches!(err, PdfDeckError::PageOutOfRange { page_count: 2, .. }));
}

#[tokio::test]
async fn test_switching_mode_clears_collection() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 100, 1);

    let session = fs_session(PresetDialogs::new());
    session.load_paths(&[a, b]).await.unwrap();
    assert_eq!(session.store().len(), 2);

    session.set_mode(Mode::Split);
    assert!(session.store().is_empty());
    assert!(session.store().error().is_none());
}

//! End-to-end merge mode: load from disk, rearrange, build and save.

use std::collections::HashMap;

use pdfdeck::engine::{AssemblyOptions, merge};
use pdfdeck::host::PresetDialogs;
use pdfdeck::{Mode, SaveOutcome};
use tempfile::TempDir;

use crate::common::{build_pdf, fs_session, page_widths, write_pdf};

#[tokio::test]
async fn test_merge_three_files_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 2);
    let b = write_pdf(temp_dir.path(), "b.pdf", 200, 1);
    let c = write_pdf(temp_dir.path(), "c.pdf", 300, 3);
    let output = temp_dir.path().join("out/merged.pdf");

    let session = fs_session(PresetDialogs::new().with_save(&output));
    let report = session.load_paths(&[a, b, c]).await.unwrap();
    assert!(report.is_complete());
    assert_eq!(session.store().total_selected_pages(), 6);

    let preview = session.build_preview().await.unwrap();
    assert_eq!(preview.kind, Mode::Merge);
    assert_eq!(preview.page_count().unwrap(), 6);

    let outcome = session.save_preview(&preview).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved { ref path, .. } if *path == output));

    let written = std::fs::read(&output).unwrap();
    assert_eq!(page_widths(&written), vec![100, 101, 200, 300, 301, 302]);
}

#[tokio::test]
async fn test_merge_after_reordering_documents_and_pages() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 3);
    let b = write_pdf(temp_dir.path(), "b.pdf", 200, 2);

    let session = fs_session(PresetDialogs::new());
    session.load_paths(&[a, b]).await.unwrap();

    let ids = session.store().document_ids();
    session.store().reorder_documents(1, 0);
    session.store().toggle_page_selection(&ids[0], 1);
    session.store().reorder_selected_pages(&ids[0], 1, 0);
    session.store().deselect_all_pages(&ids[1]);
    session.store().toggle_page_selection(&ids[1], 1);

    let preview = session.build_preview().await.unwrap();
    assert_eq!(page_widths(&preview.bytes), vec![201, 102, 100]);
}

#[tokio::test]
async fn test_merge_removed_document_is_left_out() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 200, 1);

    let session = fs_session(PresetDialogs::new());
    session.load_paths(&[a, b]).await.unwrap();
    let ids = session.store().document_ids();
    session.store().remove_document(&ids[0]);

    let preview = session.build_preview().await.unwrap();
    assert_eq!(page_widths(&preview.bytes), vec![200]);
}

#[tokio::test]
async fn test_save_cancelled_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 100, 1);

    let session = fs_session(PresetDialogs::new());
    session.load_paths(&[a]).await.unwrap();
    let preview = session.build_preview().await.unwrap();

    let outcome = session.save_preview(&preview).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Cancelled);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_merge_resolves_inherited_attributes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("inherit.pdf"), build_pdf(150, 2, true)).unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let session = fs_session(PresetDialogs::new());
    rt.block_on(session.load_paths(&[temp_dir.path().join("inherit.pdf")]))
        .unwrap();

    let documents = session.store().snapshot();
    let overrides = HashMap::from([(documents[0].id().clone(), vec![1, 0, 1])]);
    let bytes = merge(&documents, Some(&overrides), &AssemblyOptions::default()).unwrap();

    assert_eq!(page_widths(&bytes), vec![150, 150, 150]);

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    for page_id in doc.get_pages().values() {
        let page = doc.get_dictionary(*page_id).unwrap();
        assert!(page.get(b"Resources").is_ok(), "Resources should be copied onto the page");
    }
}

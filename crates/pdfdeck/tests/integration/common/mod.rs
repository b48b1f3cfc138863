//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly so the tests do not depend on binary
//! files checked into the repository.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lopdf::{Document, Object, dictionary};
use pdfdeck::Session;
use pdfdeck::config::{Config, ThumbnailConfig};
use pdfdeck::host::{FsHost, PresetDialogs};
use pdfdeck::render::NoopRenderer;
use pdfdeck::settings::MemorySettingsStore;

/// Build a PDF whose page `i` has a MediaBox width of `first_width + i`.
///
/// Pages inherit their MediaBox from the page tree root when `inherit` is
/// set, which exercises attribute resolution during assembly.
pub fn build_pdf(first_width: i64, pages: usize, inherit: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (0..pages)
        .map(|i| {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            };
            if !inherit {
                page.set(
                    "MediaBox",
                    vec![0.into(), 0.into(), (first_width + i as i64).into(), 200.into()],
                );
            }
            doc.add_object(page).into()
        })
        .collect();

    let mut root = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    };
    if inherit {
        root.set(
            "MediaBox",
            vec![0.into(), 0.into(), first_width.into(), 200.into()],
        );
    }
    doc.objects.insert(pages_id, Object::Dictionary(root));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize fixture");
    bytes
}

/// Write a generated PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, first_width: i64, pages: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(first_width, pages, false)).expect("Failed to write fixture");
    path
}

/// MediaBox widths of every page, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).expect("Output is not a PDF");
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).expect("Page is not a dictionary");
            page.get(b"MediaBox").expect("Page has no MediaBox").as_array().expect("MediaBox is not an array")[2]
                .as_i64()
                .expect("Width is not an integer")
        })
        .collect()
}

/// Session over the real file system with thumbnails disabled.
pub fn fs_session(dialogs: PresetDialogs) -> Session<FsHost> {
    let config = Config {
        thumbnails: ThumbnailConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    Session::new(
        FsHost::new(dialogs),
        Arc::new(NoopRenderer),
        Arc::new(MemorySettingsStore::default()),
        config,
    )
}

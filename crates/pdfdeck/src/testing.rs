//! Fixtures shared by unit tests.

use std::path::PathBuf;
use std::sync::Arc;

use lopdf::{Document, Object, Stream, dictionary};

use crate::model::Document as LoadedDocument;

/// Serialized PDF whose page `i` has a MediaBox width of `100 + i`.
pub(crate) fn sample_pdf(pages: usize) -> Vec<u8> {
    sample_pdf_from(100, pages)
}

/// Like [`sample_pdf`], with page `i` being `first_width + i` wide.
pub(crate) fn sample_pdf_from(first_width: i64, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|i| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (first_width + i as i64).into(), 200.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Marker text drawn only on the second page of [`annotated_pdf`].
pub(crate) const SECOND_PAGE_MARKER: &[u8] = b"ONLYONPAGETWO";

/// Two pages. The first carries a text annotation whose `/P` points back at
/// it and a link whose destination is the second page; the second page has a
/// content stream drawing [`SECOND_PAGE_MARKER`].
pub(crate) fn annotated_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let first_id = doc.new_object_id();

    let content = [b"BT /F1 12 Tf (".as_slice(), SECOND_PAGE_MARKER, b") Tj ET"].concat();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let second_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 101.into(), 200.into()],
        "Contents" => content_id,
    });

    let note_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
        "P" => first_id,
    });
    let link_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 20.into(), 10.into(), 30.into()],
        "Dest" => vec![second_id.into(), "Fit".into()],
    });
    doc.objects.insert(
        first_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 100.into(), 200.into()],
            "Annots" => vec![note_id.into(), link_id.into()],
        }),
    );

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![first_id.into(), second_id.into()],
            "Count" => 2,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// True if `needle` occurs anywhere in `bytes`.
pub(crate) fn contains_bytes(bytes: &[u8], needle: &[u8]) -> bool {
    bytes.windows(needle.len()).any(|window| window == needle)
}

/// MediaBox widths of every page, in page order.
pub(crate) fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            page.get(b"MediaBox").unwrap().as_array().unwrap()[2]
                .as_i64()
                .unwrap()
        })
        .collect()
}

/// A loaded document backed by [`sample_pdf_from`] bytes.
pub(crate) fn loaded_document(name: &str, first_width: i64, pages: usize) -> LoadedDocument {
    LoadedDocument::new(
        PathBuf::from(name),
        Arc::from(sample_pdf_from(first_width, pages)),
        pages,
        Vec::new(),
    )
}

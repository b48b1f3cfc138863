//! One function per subcommand, each driving a library [`Session`].

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use pdfdeck::config::{Config, PageSelection};
use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::host::{FsHost, Host, PresetDialogs};
use pdfdeck::model::{DocumentId, Mode, Preview, Thumbnail};
use pdfdeck::render::{NoopRenderer, PageRenderer, PdfiumRenderer};
use pdfdeck::settings::{JsonSettingsStore, MemorySettingsStore, Settings, SettingsStore};
use pdfdeck::utils::format_file_size;
use pdfdeck::{SaveOutcome, Session};

use crate::cli::{expand_inputs, parse_selection, parse_span};
use crate::handle_output_overwrite;
use crate::output::OutputFormatter;

/// Session over the file system pinned to `mode`.
///
/// One-shot commands never touch the remembered mode.
fn session(mode: Mode, config: &Config, renderer: Arc<dyn PageRenderer>) -> Session<FsHost> {
    Session::new(
        FsHost::new(PresetDialogs::new()),
        renderer,
        Arc::new(MemorySettingsStore::new(Settings { mode })),
        config.clone(),
    )
}

/// Load one file, failing if it was skipped.
async fn load_single(session: &Session<FsHost>, input: &Path) -> Result<DocumentId> {
    let mut report = session.load_paths(&[input.to_path_buf()]).await?;

    match report.loaded.pop() {
        Some(id) => Ok(id),
        None => Err(report
            .failures
            .into_iter()
            .next()
            .map(|failure| failure.error)
            .unwrap_or_else(|| PdfDeckError::other("No document loaded"))),
    }
}

/// Replace the selection of `id` with `selection`, checking page bounds.
fn apply_selection(
    session: &Session<FsHost>,
    id: &DocumentId,
    selection: &PageSelection,
) -> Result<()> {
    let page_count = session
        .store()
        .document(id)
        .map(|doc| doc.page_count())
        .unwrap_or_default();

    if let Some(&page) = selection.pages().iter().find(|&&page| page >= page_count) {
        return Err(PdfDeckError::PageOutOfRange { page, page_count });
    }

    session.store().update(|store| {
        store.deselect_all_pages(id);
        for &page in selection.pages() {
            store.toggle_page_selection(id, page);
        }
    });
    Ok(())
}

/// Write a built preview to `output` unless this is a dry run.
async fn save(
    session: &Session<FsHost>,
    preview: &Preview,
    output: PathBuf,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let pages = preview.page_count()?;
    formatter.info(&format!(
        "Built {} page(s) ({})",
        pages,
        format_file_size(preview.bytes.len() as u64)
    ));

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output.display()));
        return Ok(());
    }

    handle_output_overwrite(&output, config.overwrite_mode, formatter)?;
    session.host().dialogs().set_save(Some(output));

    match session.save_preview(preview).await? {
        SaveOutcome::Saved { path, message } => {
            formatter.success(&message);
            formatter.detail("Output", &path.display().to_string());
            Ok(())
        }
        SaveOutcome::Cancelled => Err(PdfDeckError::Cancelled),
    }
}

/// `pdfdeck merge`
pub async fn merge(
    config: &Config,
    formatter: &OutputFormatter,
    inputs: &[String],
    output: Option<PathBuf>,
    selections: &[String],
) -> Result<()> {
    let paths = expand_inputs(inputs)?;
    formatter.info(&format!("Loading {} file(s)...", paths.len()));

    let session = session(Mode::Merge, config, Arc::new(NoopRenderer));
    let report = session.load_paths(&paths).await?;
    formatter.load_report(&report);

    if report.loaded.is_empty() {
        return Err(report
            .failures
            .into_iter()
            .next()
            .map(|failure| failure.error)
            .unwrap_or(PdfDeckError::NothingSelected));
    }

    for selection in selections {
        let (position, pages) = parse_selection(selection)?;
        let id = report.loaded.get(position).ok_or_else(|| {
            PdfDeckError::invalid_config(format!(
                "Selection '{selection}' refers to document {}, but only {} loaded",
                position + 1,
                report.loaded.len()
            ))
        })?;
        apply_selection(&session, id, &pages)?;
    }

    let preview = session.build_preview().await?;
    let output = output.unwrap_or_else(|| PathBuf::from(&preview.file_name));
    save(&session, &preview, output, config, formatter).await
}

/// `pdfdeck extract`
pub async fn extract(
    config: &Config,
    formatter: &OutputFormatter,
    input: &Path,
    pages: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = session(Mode::Split, config, Arc::new(NoopRenderer));
    let id = load_single(&session, input).await?;

    let selection = PageSelection::parse(pages)?;
    apply_selection(&session, &id, &selection)?;

    let preview = session.build_preview().await?;
    let output = output.unwrap_or_else(|| PathBuf::from(&preview.file_name));
    save(&session, &preview, output, config, formatter).await
}

/// `pdfdeck split`
pub async fn split(
    config: &Config,
    formatter: &OutputFormatter,
    input: &Path,
    ranges: &[String],
    out_dir: &Path,
) -> Result<()> {
    let spans = ranges
        .iter()
        .map(|range| parse_span(range))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let session = session(Mode::Split, config, Arc::new(NoopRenderer));
    let id = load_single(&session, input).await?;
    let parts = session.split_document(&id, spans).await?;

    for (index, part) in parts.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!("{} ({})", part.file_name, format_file_size(part.bytes.len() as u64)),
        );
    }

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Parts would be written to: {}", out_dir.display()));
        return Ok(());
    }

    for part in &parts {
        handle_output_overwrite(&out_dir.join(&part.file_name), config.overwrite_mode, formatter)?;
    }

    let written = session.save_parts(&parts, out_dir).await?;
    formatter.success(&format!(
        "Split into {} file(s) in {}",
        written.len(),
        out_dir.display()
    ));
    Ok(())
}

/// `pdfdeck thumbnails`
pub async fn thumbnails(
    config: &Config,
    formatter: &OutputFormatter,
    input: &Path,
    out_dir: &Path,
) -> Result<()> {
    let renderer: Arc<dyn PageRenderer> = if PdfiumRenderer::is_available() {
        Arc::new(PdfiumRenderer::new())
    } else {
        formatter.warning("PDFium library not found, thumbnails will be placeholders");
        Arc::new(NoopRenderer)
    };

    let session = session(Mode::Split, config, renderer);
    let id = load_single(&session, input).await?;
    let Some(doc) = session.store().document(&id) else {
        return Err(PdfDeckError::other("Document disappeared after loading"));
    };

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());

    let mut written = 0;
    for (index, thumbnail) in doc.thumbnails().iter().enumerate() {
        let Thumbnail::Image {
            width,
            height,
            jpeg,
        } = thumbnail
        else {
            continue;
        };

        let path = out_dir.join(format!("{stem}_p{}.jpg", index + 1));
        formatter.debug(&format!("{} ({width}x{height})", path.display()));

        if !config.dry_run {
            session.host().write(&path, jpeg).await?;
        }
        written += 1;
    }

    let missing = doc.page_count() - written;
    if missing > 0 {
        formatter.warning(&format!("{missing} page(s) have no thumbnail"));
    }

    if config.dry_run {
        formatter.success(&format!("Dry run: {written} thumbnail(s) rendered"));
    } else {
        formatter.success(&format!(
            "Wrote {written} thumbnail(s) to {}",
            out_dir.display()
        ));
    }
    Ok(())
}

/// `pdfdeck info`
pub async fn info(config: &Config, formatter: &OutputFormatter, inputs: &[String]) -> Result<()> {
    let paths = expand_inputs(inputs)?;

    let session = session(Mode::Merge, config, Arc::new(NoopRenderer));
    let report = session.load_paths(&paths).await?;
    formatter.load_report(&report);

    for (index, doc) in session.store().snapshot().iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{}: {} page(s), {}",
                doc.name(),
                doc.page_count(),
                format_file_size(doc.bytes().len() as u64)
            ),
        );
        formatter.detail("Path", &doc.path().display().to_string());
    }

    if formatter.is_verbose() {
        formatter.detail(
            "Total pages",
            &session.store().total_selected_pages().to_string(),
        );
    }

    match report.failures.into_iter().next() {
        Some(failure) if report.loaded.is_empty() => Err(failure.error),
        _ => Ok(()),
    }
}

/// `pdfdeck mode`
pub fn mode(config: &Config, formatter: &OutputFormatter, mode: Option<&str>) -> Result<()> {
    let store = match &config.settings_path {
        Some(path) => JsonSettingsStore::new(path),
        None => JsonSettingsStore::in_config_dir().ok_or_else(|| {
            PdfDeckError::invalid_config("No configuration directory; pass --settings")
        })?,
    };
    formatter.detail("Settings", &store.path().display().to_string());

    match mode {
        Some(mode) => {
            let mode = Mode::from_str(mode)?;
            store.save(&Settings { mode })?;
            formatter.success(&format!("Mode set to {mode}"));
        }
        None => println!("{}", store.load().mode),
    }
    Ok(())
}

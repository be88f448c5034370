//! Moving text in and out of the project: file imports into the open section
//! and whole-document exports.

use crate::commands::{CmdMessage, CmdResult, SaveMode, Workspace};
use crate::error::{Result, ScriptorError};
use crate::markup::{escape_html, markdown_to_html, to_plain_text};
use crate::model::{PresentationSettings, Section};
use crate::surface::EditingSurface;
use chrono::Local;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends a file's contents to the open section.
///
/// `.txt`, `.html` and `.htm` are taken verbatim, `.md` is rendered to HTML.
pub fn import<S: EditingSurface>(ws: &mut Workspace<S>, path: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(id) = ws.store.active_id().cloned() else {
        result.add_message(CmdMessage::warning("No section open to import into."));
        return Ok(result);
    };

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let raw = match ext.as_str() {
        "txt" | "html" | "htm" | "md" => fs::read_to_string(path).map_err(ScriptorError::Io)?,
        _ => {
            return Err(ScriptorError::UnsupportedFile(
                path.display().to_string(),
            ))
        }
    };
    let text = if ext == "md" {
        markdown_to_html(&raw)
    } else {
        raw
    };

    ws.capture();
    ws.store.edit_content(&id, |content| {
        content.push('\n');
        content.push_str(&text);
    });
    ws.store.refresh_surface(&mut ws.surface);

    result.add_message(CmdMessage::success(format!("Imported: {}", path.display())));
    Ok(result
        .with_save(SaveMode::Immediate)
        .with_affected_section(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// One standalone HTML document.
    #[default]
    Html,
    /// A `.tar.gz` with one HTML document per section.
    Archive,
    /// Plain text, each section under an underlined title.
    Text,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Archive => "tar.gz",
            ExportFormat::Text => "txt",
        }
    }
}

/// Exports every section that has content, in outline order.
pub fn export<S: EditingSurface>(
    ws: &mut Workspace<S>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    ws.capture();

    let sections: Vec<&Section> = ws
        .store
        .sections()
        .iter()
        .filter(|s| !s.content.trim().is_empty())
        .collect();

    let mut result = CmdResult::default();
    if sections.is_empty() {
        result.add_message(CmdMessage::info("Nothing to export."));
        return Ok(result);
    }

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "scriptor-{}.{}",
            Local::now().format("%Y-%m-%d_%H-%M-%S"),
            format.extension()
        ))
    });
    let file = File::create(&path).map_err(ScriptorError::Io)?;

    match format {
        ExportFormat::Html => {
            let title = sections[0].title.as_str();
            let mut file = file;
            file.write_all(render_document(title, &sections, &ws.settings).as_bytes())
                .map_err(ScriptorError::Io)?;
        }
        ExportFormat::Archive => write_archive(file, &sections, &ws.settings)?,
        ExportFormat::Text => {
            let mut file = file;
            file.write_all(render_text(&sections).as_bytes())
                .map_err(ScriptorError::Io)?;
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Exported {} section{} to {}",
        sections.len(),
        if sections.len() == 1 { "" } else { "s" },
        path.display()
    )));
    Ok(result.with_written_paths(vec![path]))
}

/// A printable HTML document for `sections`, styled by the presentation settings.
pub fn render_document(
    title: &str,
    sections: &[&Section],
    settings: &PresentationSettings,
) -> String {
    let (width, height) = settings.page_size.dimensions();
    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    doc.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    doc.push_str("<style>\n");
    doc.push_str(&format!("@page {{ size: {} {}; margin: 0; }}\n", width, height));
    doc.push_str(&format!(
        ".page {{ width: {}; min-height: {}; box-sizing: border-box; padding: 1in; \
         margin: 0 auto; page-break-after: always; background-size: cover; }}\n",
        width, height
    ));
    doc.push_str("body.theme-light { background: #ffffff; color: #1d1d1f; }\n");
    doc.push_str("body.theme-dark { background: #1d1d1f; color: #f5f5f7; }\n");
    if settings.has_background() {
        doc.push_str(&format!(
            ".page {{ background-image: url(\"{}\"); }}\n",
            settings.background_ref.replace('"', "%22")
        ));
    }
    doc.push_str("</style>\n</head>\n");
    doc.push_str(&format!(
        "<body class=\"theme-{} page-{}\">\n",
        settings.theme, settings.page_size
    ));
    for section in sections {
        doc.push_str(&format!(
            "<section class=\"page\" id=\"{}\">\n<h1>{}</h1>\n{}\n</section>\n",
            escape_html(section.id.as_str()),
            escape_html(&section.title),
            section.content
        ));
    }
    doc.push_str("</body>\n</html>\n");
    doc
}

/// Visible text of `sections`, each headed by its title between `=` rules.
pub fn render_text(sections: &[&Section]) -> String {
    let mut output = String::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        let rule = "=".repeat(section.title.chars().count().max(40));
        output.push_str(&format!("{}\n{}\n{}\n\n", rule, section.title, rule));
        output.push_str(&to_plain_text(&section.content));
    }

    output.push('\n');
    output
}

fn write_archive<W: Write>(
    writer: W,
    sections: &[&Section],
    settings: &PresentationSettings,
) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for (ix, section) in sections.iter().enumerate() {
        let entry_name = format!(
            "scriptor/{:02}-{}.html",
            ix + 1,
            sanitize_filename(&section.title)
        );
        let content = render_document(&section.title, &[*section], settings);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(ScriptorError::Io)?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(ScriptorError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    let safe = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string();
    if safe.is_empty() {
        "untitled".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{id, workspace};
    use crate::model::{PageSize, Theme};
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn import_appends_text_after_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "imported words").unwrap();

        let mut ws = workspace(&["A"]);
        ws.surface.type_text("<p>typed</p>");
        let result = import(&mut ws, &path).unwrap();

        assert_eq!(result.save, SaveMode::Immediate);
        assert_eq!(ws.surface.as_str(), "<p>typed</p>\nimported words");
        assert_eq!(ws.store.get(&id(1)).unwrap().content, ws.surface.as_str());
    }

    #[test]
    fn import_renders_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chapter.MD");
        fs::write(&path, "# Heading\n\nBody").unwrap();

        let mut ws = workspace(&["A"]);
        import(&mut ws, &path).unwrap();
        assert!(ws.surface.as_str().starts_with("\n<h1>Heading</h1>"));
    }

    #[test]
    fn import_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.docx");
        fs::write(&path, "binary").unwrap();

        let mut ws = workspace(&["A"]);
        let err = import(&mut ws, &path).unwrap_err();
        assert!(matches!(err, ScriptorError::UnsupportedFile(_)));
        assert_eq!(ws.surface.as_str(), "");
    }

    #[test]
    fn import_without_open_section_is_ignored() {
        let mut ws = workspace(&[]);
        let result = import(&mut ws, Path::new("missing.txt")).unwrap();
        assert_eq!(result.save, SaveMode::None);
    }

    #[test]
    fn export_html_skips_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.html");

        let mut ws = workspace(&["Title Page", "Copyright", "Chapter 1"]);
        ws.settings.theme = Theme::Dark;
        ws.settings.page_size = PageSize::Letter;
        ws.surface.type_text("<p>My Book</p>");
        ws.store.edit_content(&id(3), |c| c.push_str("<p>It begins.</p>"));

        let result = export(&mut ws, ExportFormat::Html, Some(out.clone())).unwrap();
        assert_eq!(result.written_paths, vec![out.clone()]);

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("<body class=\"theme-dark page-letter\">"));
        assert!(html.contains("size: 8.5in 11in"));
        assert!(html.contains("<h1>Title Page</h1>\n<p>My Book</p>"));
        assert!(html.contains("<h1>Chapter 1</h1>"));
        assert!(!html.contains("Copyright"));
    }

    #[test]
    fn export_text_strips_markup_and_skips_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.txt");

        let mut ws = workspace(&["Title Page", "Copyright", "Chapter 1"]);
        ws.surface.type_text("<h1>My Book</h1><p>by A. Writer</p>");
        ws.store
            .edit_content(&id(3), |c| c.push_str("<p>It began &amp; ended.</p>"));

        export(&mut ws, ExportFormat::Text, Some(out.clone())).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let rule = "=".repeat(40);
        assert_eq!(
            text,
            format!(
                "{rule}\nTitle Page\n{rule}\n\nMy Book\nby A. Writer\n\n\
                 {rule}\nChapter 1\n{rule}\n\nIt began & ended.\n"
            )
        );
        assert!(!text.contains('<'));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn export_with_no_content_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.html");

        let mut ws = workspace(&["A"]);
        let result = export(&mut ws, ExportFormat::Html, Some(out.clone())).unwrap();
        assert!(result.written_paths.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn archive_holds_one_document_per_section() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.tar.gz");

        let mut ws = workspace(&["Title Page", "Chapter 1/2"]);
        ws.surface.type_text("title");
        ws.store.edit_content(&id(2), |c| c.push_str("chapter"));
        export(&mut ws, ExportFormat::Archive, Some(out.clone())).unwrap();

        let mut archive = tar::Archive::new(GzDecoder::new(File::open(&out).unwrap()));
        let mut names = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            assert!(body.starts_with("<!DOCTYPE html>"));
            names.push(entry.path().unwrap().display().to_string());
        }
        assert_eq!(
            names,
            vec!["scriptor/01-Title Page.html", "scriptor/02-Chapter 1_2.html"]
        );
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_filename("Hello World"), "Hello World");
        assert_eq!(sanitize_filename("foo/bar"), "foo_bar");
        assert_eq!(sanitize_filename("  "), "untitled");
    }
}

//! DOCX export using the docx-rs library
//!
//! This module turns a [`ContentModel`] into a Word (.docx) document built
//! from scratch. The model is first laid out as a flat [`DocumentOutline`]
//! and then packed entirely in memory; the file is only written once
//! packing has succeeded, so a failed export never leaves a partial file.

use crate::content_model::ContentModel;
use docx_rs::{
    AbstractNumbering, BorderType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, Paragraph, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};
use regex::Regex;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Content type of the exported file
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extension appended to exported file names
pub const DOCX_EXTENSION: &str = "docx";

/// Numbering instance used for every bullet point
const BULLET_NUMBERING_ID: usize = 1;

/// Spacing after paragraphs, in twentieths of a point
const TITLE_SPACING_AFTER: u32 = 300;
const HEADING_SPACING_AFTER: u32 = 300;
const BULLET_SPACING_AFTER: u32 = 200;
const CODE_SPACING_AFTER: u32 = 400;

const CODE_FONT: &str = "Courier New";
const CODE_COLOR: &str = "444444";

/// Whitespace runs and characters not allowed in file names
static FILENAME_UNSAFE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f]+"#).expect("file name pattern is valid")
});

/// Errors that can occur during DOCX export
#[derive(Error, Debug)]
pub enum ExportError {
    /// No valid model is available
    #[error("No content available to download")]
    NothingToExport,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Format error: {0}")]
    FormatError(String),
}

/// One block of the exported document, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// Document title, styled as Heading 1
    Title(String),
    /// Thin horizontal rule under the title
    Separator,
    /// Section heading, styled as Heading 2
    SectionHeading(String),
    /// One bullet point
    Bullet(String),
    /// A section's code excerpt as a monospaced paragraph
    Code(String),
}

/// Flat layout of a document before it is packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutline {
    pub blocks: Vec<DocBlock>,
}

impl DocumentOutline {
    /// Lay out a model: title, separator, then each section in order
    pub fn from_model(model: &ContentModel) -> Self {
        let mut blocks = vec![DocBlock::Title(model.title().to_string()), DocBlock::Separator];

        for section in model.topics() {
            blocks.push(DocBlock::SectionHeading(section.display_name().to_string()));
            blocks.extend(section.points.iter().cloned().map(DocBlock::Bullet));
            if let Some(code) = &section.code {
                blocks.push(DocBlock::Code(code.clone()));
            }
        }

        Self { blocks }
    }

    /// Section headings in document order
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::SectionHeading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bullet texts in document order
    pub fn bullets(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::Bullet(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// File name for an exported document
///
/// Whitespace runs (and characters file systems reject) collapse to a
/// single underscore, e.g. `"Big O  notes"` becomes `Big_O_notes.docx`.
pub fn export_filename(title: &str) -> String {
    format!(
        "{}.{}",
        FILENAME_UNSAFE.replace_all(title, "_"),
        DOCX_EXTENSION
    )
}

/// Export the current model to `out_dir`
///
/// # Parameters
/// * `model` - The validated model, or `None` when there is nothing to export
/// * `out_dir` - Directory the document is saved into
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written document
/// * `Err(ExportError::NothingToExport)` - No model; nothing was generated or written
/// * `Err(ExportError)` - Packing or writing failed
pub fn export(model: Option<&ContentModel>, out_dir: &Path) -> Result<PathBuf, ExportError> {
    let Some(model) = model else {
        log::warn!("Export requested with no content available");
        return Err(ExportError::NothingToExport);
    };

    let bytes = to_docx_bytes(model)?;

    let output_path = out_dir.join(export_filename(model.title()));
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(&output_path, &bytes)?;

    log::info!(
        "Wrote DOCX to: {} ({} bytes, {})",
        output_path.display(),
        bytes.len(),
        DOCX_MIME_TYPE
    );
    Ok(output_path)
}

/// Pack a model into DOCX bytes
pub fn to_docx_bytes(model: &ContentModel) -> Result<Vec<u8>, ExportError> {
    let outline = DocumentOutline::from_model(model);

    log::info!(
        "Creating DOCX with docx-rs: {} sections, {} blocks",
        model.topics().len(),
        outline.blocks.len()
    );

    let mut docx = Docx::new();
    docx = add_styles(docx);
    docx = add_bullet_numbering(docx);

    for block in &outline.blocks {
        docx = docx.add_paragraph(block_paragraph(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::FormatError(format!("Failed to write DOCX: {}", e)))?;

    Ok(buffer.into_inner())
}

/// Add the heading styles used by the title and section headings
fn add_styles(docx: Docx) -> Docx {
    let heading1 = Style::new("Heading1", StyleType::Paragraph)
        .name("Heading 1")
        .bold()
        .size(32);
    let heading2 = Style::new("Heading2", StyleType::Paragraph)
        .name("Heading 2")
        .bold()
        .size(28);

    docx.add_style(heading1).add_style(heading2)
}

/// Register the single-level bullet list
fn add_bullet_numbering(docx: Docx) -> Docx {
    let level = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

    docx.add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(level))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

/// Create the paragraph for one outline block
fn block_paragraph(block: &DocBlock) -> Paragraph {
    match block {
        DocBlock::Title(text) => Paragraph::new()
            .style("Heading1")
            .add_run(Run::new().add_text(text))
            .line_spacing(LineSpacing::new().after(TITLE_SPACING_AFTER)),

        DocBlock::Separator => separator_paragraph(),

        DocBlock::SectionHeading(text) => Paragraph::new()
            .style("Heading2")
            .add_run(Run::new().add_text(text))
            .line_spacing(LineSpacing::new().after(HEADING_SPACING_AFTER)),

        DocBlock::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(text))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0))
            .line_spacing(LineSpacing::new().after(BULLET_SPACING_AFTER)),

        DocBlock::Code(code) => Paragraph::new()
            .add_run(code_run(code))
            .line_spacing(LineSpacing::new().after(CODE_SPACING_AFTER)),
    }
}

/// A one-half-point space with only a bottom border, drawn as a thin rule
fn separator_paragraph() -> Paragraph {
    let mut p = Paragraph::new().add_run(
        Run::new()
            .add_text(" ")
            .fonts(RunFonts::new().ascii("Arial").hi_ansi("Arial"))
            .size(1),
    );

    // ParagraphBorders::default() carries all four sides
    p.property = p.property.set_borders(
        ParagraphBorders::with_empty().set(
            ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                .val(BorderType::Single)
                .size(2)
                .space(1),
        ),
    );
    p
}

/// Monospaced run that keeps the code's line structure
fn code_run(code: &str) -> Run {
    let mut run = Run::new()
        .fonts(RunFonts::new().ascii(CODE_FONT).hi_ansi(CODE_FONT))
        .color(CODE_COLOR);

    for (i, line) in code.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }

    run
}

//! HTML preview of generated notes
//!
//! This module renders a [`ContentModel`] as:
//! - A bare HTML fragment for on-screen preview
//! - A standalone HTML page wrapping that fragment in a page-like container
//!
//! All text coming from the backend is escaped before it is embedded.

use crate::content_model::{ContentModel, Section, ValidationError};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Shown before any response has been received
pub const NO_CONTENT_FRAGMENT: &str = "<p>No content available</p>";

/// Shown when the backend answered with something that is not a content model
pub const INVALID_CONTENT_FRAGMENT: &str = "<p>Error: Unable to generate content.</p>";

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Render the preview for whatever the form currently holds
///
/// # Parameters
/// * `current` - `None` when nothing has been fetched yet, otherwise the
///   validation outcome of the last response
///
/// # Returns
/// The notes fragment, or one of the fixed fallback fragments
pub fn preview(current: Option<&Result<ContentModel, ValidationError>>) -> String {
    match current {
        None => NO_CONTENT_FRAGMENT.to_string(),
        Some(Err(_)) => INVALID_CONTENT_FRAGMENT.to_string(),
        Some(Ok(model)) => to_fragment(model),
    }
}

/// Render a validated model as an HTML fragment
pub fn to_fragment(model: &ContentModel) -> String {
    let mut output = String::new();

    output.push_str(&format!("<h1>{}</h1>\n", escape_html(model.title())));

    for section in model.topics() {
        write_section(&mut output, section);
    }

    output
}

/// Export a model to a standalone HTML page
///
/// # Parameters
/// * `model` - The validated notes to render
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
/// * `Ok(())` - Successfully wrote the page
/// * `Err(HtmlExportError)` - Error creating or writing the file
pub fn to_html_page(model: &ContentModel, output_path: &Path) -> Result<(), HtmlExportError> {
    let mut output = String::new();

    write_html_header(&mut output, model.title());

    output.push_str("<body>\n");
    output.push_str("<div class=\"preview-container\">\n");
    output.push_str("<div class=\"word-document\">\n");
    output.push_str("<div class=\"content\">\n");
    output.push_str(&to_fragment(model));
    output.push_str("</div>\n");
    output.push_str("</div>\n");
    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    // Write to file - create parent directories if they don't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    log::info!("Wrote HTML preview to: {}", output_path.display());
    Ok(())
}

/// Write one section: heading, bullet list, optional code block
fn write_section(output: &mut String, section: &Section) {
    output.push_str(&format!(
        "<h2>{}</h2>\n",
        escape_html(section.display_name())
    ));

    output.push_str("<ul>\n");
    for point in &section.points {
        output.push_str(&format!("<li>{}</li>\n", escape_html(point)));
    }
    output.push_str("</ul>\n");

    if let Some(code) = &section.code {
        output.push_str(&format!("<pre><code>{}</code></pre>\n", escape_html(code)));
    }
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Page styling that mimics a printed Word page
const CSS_STYLES: &str = r#"
body {
    margin: 0;
    padding: 40px 20px;
    background-color: #e9ecef;
    font-family: Calibri, "Segoe UI", Arial, sans-serif;
}

.preview-container {
    display: flex;
    justify-content: center;
}

.word-document {
    width: 8.5in;
    min-height: 11in;
    padding: 1in;
    box-sizing: border-box;
    background: white;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
}

.content h1 {
    font-size: 16pt;
    padding-bottom: 8px;
    margin-bottom: 20px;
    border-bottom: 1px solid #000;
}

.content h2 {
    font-size: 14pt;
    margin: 24px 0 12px;
}

.content ul {
    padding-left: 30px;
    margin-bottom: 12px;
}

.content li {
    margin-bottom: 8px;
}

.content pre {
    background-color: #f6f8fa;
    border: 1px solid #e1e4e8;
    padding: 12px;
    overflow-x: auto;
}

.content pre code {
    font-family: "Courier New", monospace;
    color: #444444;
}

@media print {
    body {
        background: white;
        padding: 0;
    }

    .word-document {
        box-shadow: none;
        padding: 0;
    }
}
"#;

use crate::error::WordleResult;
use crate::layout::{Canvas, PlacedWord};
use std::collections::HashMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// d3's `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal colour scale: each new text takes the next palette entry, wrapping around, and
/// keeps it for the lifetime of the scale. Grows with the set of distinct answers seen by
/// one wordle and is never pruned.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    assigned: HashMap<String, usize>,
}

impl Palette {
    pub fn colour(&mut self, text: &str) -> &'static str {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(text.to_string()).or_insert(next);
        CATEGORY10[slot % CATEGORY10.len()]
    }
}

/// A surface that can show a finished placement.
pub trait Renderer {
    fn clear(&mut self);

    /// Replaces whatever was drawn before with `words`.
    fn draw(&mut self, canvas: Canvas, words: &[PlacedWord], font: &str) -> WordleResult<()>;
}

pub fn escape_xml(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Renders placements as an SVG document, optionally mirrored to a file on every draw.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    palette: Palette,
    output: Option<PathBuf>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Atomic write: the target is replaced only once the new document is fully on disk.
    pub fn write_to(&self, path: &Path) -> WordleResult<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(self.document.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn clear(&mut self) {
        self.document.clear();
    }

    fn draw(&mut self, canvas: Canvas, words: &[PlacedWord], font: &str) -> WordleResult<()> {
        self.clear();
        let doc = &mut self.document;
        let font = escape_xml(font);

        doc.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            num(canvas.width),
            num(canvas.height)
        ));
        doc.push_str(&format!(
            "<g transform=\"translate({},{})\">\n",
            num(canvas.width / 2.0),
            num(canvas.height / 2.0)
        ));
        for word in words {
            let fill = self.palette.colour(&word.text);
            doc.push_str(&format!(
                r#"<text style="font-size: {}px; font-family: {}; fill: {};" text-anchor="middle" transform="translate({},{})rotate({})">{}</text>"#,
                num(word.size),
                font,
                fill,
                num(word.x),
                num(word.y),
                num(word.rotate),
                escape_xml(&word.text)
            ));
            doc.push('\n');
        }
        doc.push_str("</g>\n</svg>\n");

        if let Some(path) = &self.output {
            self.write_to(path)?;
        }
        Ok(())
    }
}

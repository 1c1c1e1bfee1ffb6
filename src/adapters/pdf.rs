//! PDF output for composed menus.
//!
//! Section text uses a small markup subset: `#`..`######` headings, `- `
//! bullets, `**bold**` spans and a trailing `\` as line-continuation marker.
//! Every heading becomes an outline item (see [`super::outline`]), so
//! viewers show the index as a table of contents.

use super::outline::{self, OutlineEntry};
use crate::domain::model::{MenuDocument, Section};
use crate::domain::ports::DocumentRenderer;
use crate::utils::error::{MenuError, Result};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::collections::HashMap;

const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.35;
const BULLET_INDENT_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Courier,
    Times,
    Helvetica,
}

impl FontFamily {
    /// Resolves a CSS-like family list (`Inconsolata, monospace`) to a
    /// builtin PDF font. The first recognised entry wins.
    pub fn resolve(declaration: &str) -> Self {
        declaration
            .split(',')
            .map(|family| {
                family
                    .trim()
                    .trim_matches(|c: char| c == '"' || c == '\'')
                    .to_ascii_lowercase()
            })
            .find_map(|family| match family.as_str() {
                "monospace" | "courier" | "courier new" => Some(FontFamily::Courier),
                "serif" | "times" | "times new roman" => Some(FontFamily::Times),
                "sans-serif" | "helvetica" | "arial" => Some(FontFamily::Helvetica),
                _ => None,
            })
            .unwrap_or(FontFamily::Helvetica)
    }

    fn builtin(self, bold: bool) -> BuiltinFont {
        match (self, bold) {
            (FontFamily::Courier, false) => BuiltinFont::Courier,
            (FontFamily::Courier, true) => BuiltinFont::CourierBold,
            (FontFamily::Times, false) => BuiltinFont::TimesRoman,
            (FontFamily::Times, true) => BuiltinFont::TimesBold,
            (FontFamily::Helvetica, false) => BuiltinFont::Helvetica,
            (FontFamily::Helvetica, true) => BuiltinFont::HelveticaBold,
        }
    }

    /// Advance width in em. Exact for Courier, an average for the others.
    fn char_width(self) -> f32 {
        match self {
            FontFamily::Courier => 0.6,
            FontFamily::Times | FontFamily::Helvetica => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Blank,
    Heading { level: usize, text: String },
    Bullet(Vec<Span>),
    Paragraph(Vec<Span>),
}

pub fn parse_line(line: &str) -> Block {
    let line = line.trim_end();
    let line = line.strip_suffix('\\').unwrap_or(line).trim_end();

    if line.is_empty() {
        return Block::Blank;
    }

    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&level) {
        if let Some(text) = line[level..].strip_prefix(' ') {
            return Block::Heading {
                level,
                text: text.trim().to_string(),
            };
        }
    }

    match line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        Some(rest) => Block::Bullet(parse_spans(rest)),
        None => Block::Paragraph(parse_spans(line)),
    }
}

/// Splits on `**` markers; an unbalanced trailing marker is kept as text.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut parts: Vec<String> = text.split("**").map(str::to_string).collect();
    if parts.len() % 2 == 0 {
        if let Some(last) = parts.pop() {
            if let Some(previous) = parts.last_mut() {
                previous.push_str("**");
                previous.push_str(&last);
            }
        }
    }

    parts
        .into_iter()
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, text)| Span { text, bold: i % 2 == 1 })
        .collect()
}

/// Greedy word wrap to `max_chars` columns, keeping span styling.
pub fn wrap_spans(spans: &[Span], max_chars: usize) -> Vec<Vec<Span>> {
    let max_chars = max_chars.max(1);
    let mut chars: Vec<(char, bool)> = spans
        .iter()
        .flat_map(|span| span.text.chars().map(move |c| (c, span.bold)))
        .collect();
    let mut lines = Vec::new();

    while chars.len() > max_chars {
        let split = chars[..=max_chars]
            .iter()
            .rposition(|(c, _)| *c == ' ')
            .filter(|&i| i > 0)
            .unwrap_or(max_chars);
        let rest = chars.split_off(split);
        lines.push(group_runs(&chars));
        chars = rest.into_iter().skip_while(|(c, _)| *c == ' ').collect();
    }
    if !chars.is_empty() || lines.is_empty() {
        lines.push(group_runs(&chars));
    }

    lines
}

fn group_runs(chars: &[(char, bool)]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for &(c, bold) in chars {
        match spans.last_mut() {
            Some(span) if span.bold == bold => span.text.push(c),
            _ => spans.push(Span {
                text: c.to_string(),
                bold,
            }),
        }
    }
    spans
}

/// Page geometry in millimetres, font sizes in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub body_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        // A4
        Self {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
            body_size: 10.5,
        }
    }
}

impl PageLayout {
    fn heading_size(&self, level: usize) -> f32 {
        match level {
            1 => self.body_size * 2.0,
            2 => self.body_size * 1.6,
            3 => self.body_size * 1.3,
            _ => self.body_size * 1.1,
        }
    }

    fn max_chars(&self, family: FontFamily, size: f32, indent: f32) -> usize {
        let usable = self.width - 2.0 * self.margin - indent;
        (usable / (family.char_width() * size * PT_TO_MM)).floor() as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &MenuDocument) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            document.title.as_str(),
            Mm(self.layout.width),
            Mm(self.layout.height),
            "Layer 1",
        );
        let first_layer = doc.get_page(page).get_layer(layer);

        let (pages, headings) = {
            let mut writer = PageWriter {
                doc: &doc,
                layout: &self.layout,
                fonts: HashMap::new(),
                layer: first_layer,
                cursor: self.layout.height - self.layout.margin,
                pages: 1,
                headings: Vec::new(),
            };

            for (i, section) in document.sections.iter().enumerate() {
                if i > 0 {
                    writer.new_page();
                }
                writer.write_section(section)?;
            }
            (writer.pages, writer.headings)
        };

        tracing::debug!(
            "Rendered {} sections on {} pages, {} outline items",
            document.sections.len(),
            pages,
            headings.len()
        );

        let bytes = doc.save_to_bytes().map_err(|e| MenuError::RenderError {
            message: e.to_string(),
        })?;
        outline::write_outline(bytes, &headings)
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layout: &'a PageLayout,
    fonts: HashMap<(FontFamily, bool), IndirectFontRef>,
    layer: PdfLayerReference,
    cursor: f32,
    /// Pages so far; also the 1-based number of the current page
    pages: usize,
    headings: Vec<OutlineEntry>,
}

impl PageWriter<'_> {
    fn top(&self) -> f32 {
        self.layout.height - self.layout.margin
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.layout.width),
            Mm(self.layout.height),
            format!("Page {}", self.pages + 1),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.top();
        self.pages += 1;
    }

    fn font(&mut self, family: FontFamily, bold: bool) -> Result<IndirectFontRef> {
        if let Some(font) = self.fonts.get(&(family, bold)) {
            return Ok(font.clone());
        }
        let font = self
            .doc
            .add_builtin_font(family.builtin(bold))
            .map_err(|e| MenuError::RenderError {
                message: format!("failed to load font {:?}: {}", family, e),
            })?;
        self.fonts.insert((family, bold), font.clone());
        Ok(font)
    }

    fn space(&mut self, amount: f32) {
        if self.cursor < self.top() {
            self.cursor -= amount;
        }
    }

    fn write_section(&mut self, section: &Section) -> Result<()> {
        let family = FontFamily::resolve(&section.font_family);
        let body = self.layout.body_size;

        for line in section.text.lines() {
            match parse_line(line) {
                Block::Blank => self.space(body * PT_TO_MM * 0.5),
                Block::Heading { level, text } => {
                    let size = self.layout.heading_size(level);
                    self.space(size * PT_TO_MM * 0.6);
                    let spans = vec![Span {
                        text: text.clone(),
                        bold: true,
                    }];
                    let page = self.write_wrapped(&spans, family, size, 0.0)?;
                    self.headings.push(OutlineEntry {
                        level,
                        title: text,
                        page,
                    });
                }
                Block::Bullet(spans) => {
                    let indent = BULLET_INDENT_CHARS as f32 * family.char_width() * body * PT_TO_MM;
                    self.write_marker("-", family, body)?;
                    self.write_wrapped(&spans, family, body, indent)?;
                }
                Block::Paragraph(spans) => {
                    self.write_wrapped(&spans, family, body, 0.0)?;
                }
            }
        }

        Ok(())
    }

    /// Draws the bullet marker on the line the next `write_wrapped` call will use.
    fn write_marker(&mut self, marker: &str, family: FontFamily, size: f32) -> Result<()> {
        self.ensure_room(size);
        let font = self.font(family, false)?;
        let y = self.cursor - size * PT_TO_MM;
        self.layer
            .use_text(marker, size, Mm(self.layout.margin), Mm(y), &font);
        Ok(())
    }

    fn ensure_room(&mut self, size: f32) {
        if self.cursor - size * LINE_SPACING * PT_TO_MM < self.layout.margin {
            self.new_page();
        }
    }

    /// Returns the page the first line landed on.
    fn write_wrapped(
        &mut self,
        spans: &[Span],
        family: FontFamily,
        size: f32,
        indent: f32,
    ) -> Result<usize> {
        let max_chars = self.layout.max_chars(family, size, indent);
        let char_width = family.char_width() * size * PT_TO_MM;
        let mut first_page = None;

        for line in wrap_spans(spans, max_chars) {
            self.ensure_room(size);
            first_page.get_or_insert(self.pages);

            let y = self.cursor - size * PT_TO_MM;
            let mut x = self.layout.margin + indent;
            for span in &line {
                let font = self.font(family, span.bold)?;
                self.layer
                    .use_text(span.text.as_str(), size, Mm(x), Mm(y), &font);
                x += span.text.chars().count() as f32 * char_width;
            }
            self.cursor -= size * LINE_SPACING * PT_TO_MM;
        }

        Ok(first_page.unwrap_or(self.pages))
    }
}

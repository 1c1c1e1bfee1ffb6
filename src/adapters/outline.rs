//! Document outline for rendered menus.
//!
//! printpdf keeps a single bookmark per page, so the outline tree is written
//! into the saved file with lopdf instead. Headings nest by level: a `##`
//! after a `#` becomes its child.

use crate::utils::error::{MenuError, Result};
use printpdf::lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: usize,
    pub title: String,
    /// 1-based page number
    pub page: usize,
}

struct OutlineTree<'a> {
    entries: &'a [OutlineEntry],
    ids: Vec<ObjectId>,
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl<'a> OutlineTree<'a> {
    fn new(doc: &mut Document, entries: &'a [OutlineEntry]) -> Self {
        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); entries.len()];
        let mut open: Vec<usize> = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            while open
                .last()
                .is_some_and(|&top| entries[top].level >= entry.level)
            {
                open.pop();
            }
            match open.last() {
                Some(&parent) => children[parent].push(i),
                None => roots.push(i),
            }
            open.push(i);
        }

        let ids = entries.iter().map(|_| doc.new_object_id()).collect();
        Self {
            entries,
            ids,
            roots,
            children,
        }
    }
}

fn render_error(e: impl std::fmt::Display) -> MenuError {
    MenuError::RenderError {
        message: format!("outline: {}", e),
    }
}

/// PDF text string: literal for ASCII, UTF-16BE with a byte order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Replaces the outline of an already saved PDF with one item per entry.
pub fn write_outline(pdf: Vec<u8>, entries: &[OutlineEntry]) -> Result<Vec<u8>> {
    if entries.is_empty() {
        return Ok(pdf);
    }

    let mut doc = Document::load_mem(&pdf).map_err(render_error)?;
    let pages = doc.get_pages();
    let tree = OutlineTree::new(&mut doc, entries);
    let outlines_id = doc.new_object_id();

    let visible = link_items(&mut doc, &tree, &pages, &tree.roots, outlines_id)?;

    let mut outlines = Dictionary::new();
    outlines.set("Type", "Outlines");
    if let (Some(&first), Some(&last)) = (tree.roots.first(), tree.roots.last()) {
        outlines.set("First", tree.ids[first]);
        outlines.set("Last", tree.ids[last]);
    }
    outlines.set("Count", visible);
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));

    let previous = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Outlines"))
        .and_then(Object::as_reference)
        .ok();
    if let Some(previous) = previous {
        doc.objects.remove(&previous);
    }

    let catalog = doc.catalog_mut().map_err(render_error)?;
    catalog.set("Outlines", outlines_id);
    catalog.set("PageMode", "UseOutlines");

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(render_error)?;
    Ok(bytes)
}

/// Writes one sibling run under `parent`; returns the number of open items below it.
fn link_items(
    doc: &mut Document,
    tree: &OutlineTree<'_>,
    pages: &std::collections::BTreeMap<u32, ObjectId>,
    siblings: &[usize],
    parent: ObjectId,
) -> Result<i64> {
    let mut visible = 0;

    for (k, &i) in siblings.iter().enumerate() {
        let entry = &tree.entries[i];
        let page_id = u32::try_from(entry.page)
            .ok()
            .and_then(|page| pages.get(&page))
            .copied()
            .ok_or_else(|| MenuError::RenderError {
                message: format!(
                    "heading '{}' points at missing page {}",
                    entry.title, entry.page
                ),
            })?;

        let mut item = Dictionary::new();
        item.set("Title", text_string(&entry.title));
        item.set("Parent", parent);
        item.set("Dest", vec![Object::Reference(page_id), "Fit".into()]);
        if k > 0 {
            item.set("Prev", tree.ids[siblings[k - 1]]);
        }
        if let Some(&next) = siblings.get(k + 1) {
            item.set("Next", tree.ids[next]);
        }

        let kids = &tree.children[i];
        if let (Some(&first), Some(&last)) = (kids.first(), kids.last()) {
            let below = link_items(doc, tree, pages, kids, tree.ids[i])?;
            item.set("First", tree.ids[first]);
            item.set("Last", tree.ids[last]);
            item.set("Count", below);
            visible += below;
        }

        doc.objects.insert(tree.ids[i], Object::Dictionary(item));
        visible += 1;
    }

    Ok(visible)
}

/// Outline titles of a saved PDF as `(depth, title)`, depth-first.
#[cfg(test)]
pub(crate) fn read_outline(pdf: &[u8]) -> Vec<(usize, String)> {
    fn walk(
        doc: &Document,
        first: Option<ObjectId>,
        depth: usize,
        out: &mut Vec<(usize, String)>,
    ) {
        let mut current = first;
        while let Some(id) = current {
            let item = doc.get_dictionary(id).unwrap();
            let raw = item.get(b"Title").unwrap().as_str().unwrap();
            let title = match raw.strip_prefix(&[0xFE, 0xFF][..]) {
                Some(utf16) => String::from_utf16(
                    &utf16
                        .chunks(2)
                        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                        .collect::<Vec<_>>(),
                )
                .unwrap(),
                None => String::from_utf8(raw.to_vec()).unwrap(),
            };
            out.push((depth, title));
            walk(
                doc,
                item.get(b"First").and_then(Object::as_reference).ok(),
                depth + 1,
                out,
            );
            current = item.get(b"Next").and_then(Object::as_reference).ok();
        }
    }

    let doc = Document::load_mem(pdf).unwrap();
    let outlines = doc
        .catalog()
        .unwrap()
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .unwrap();
    let first = doc
        .get_dictionary(outlines)
        .unwrap()
        .get(b"First")
        .and_then(Object::as_reference)
        .ok();

    let mut out = Vec::new();
    walk(&doc, first, 0, &mut out);
    out
}

//! Minimal xlsx writer for test fixtures: inline strings, numbers and
//! booleans, one worksheet per sheet, no styles.

use anyhow::Result;
use cocktail_menu::core::Cell;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// A sheet whose first row and column are offset from A1.
pub struct Sheet<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<Cell>>,
    pub first_row: usize,
    pub first_col: usize,
}

impl<'a> Sheet<'a> {
    pub fn new(name: &'a str, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name,
            rows,
            first_row: 0,
            first_col: 0,
        }
    }

    pub fn at(mut self, first_row: usize, first_col: usize) -> Self {
        self.first_row = first_row;
        self.first_col = first_col;
        self
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

fn cell_xml(reference: &str, cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) => Some(format!(
            r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
            reference,
            escape(s)
        )),
        Cell::Int(i) => Some(format!(r#"<c r="{}"><v>{}</v></c>"#, reference, i)),
        Cell::Float(f) => Some(format!(r#"<c r="{}"><v>{}</v></c>"#, reference, f)),
        Cell::Bool(b) => Some(format!(
            r#"<c r="{}" t="b"><v>{}</v></c>"#,
            reference,
            u8::from(*b)
        )),
    }
}

fn worksheet_xml(sheet: &Sheet<'_>) -> String {
    let mut xml = format!(r#"<worksheet xmlns="{}"><sheetData>"#, MAIN_NS);
    for (r, row) in sheet.rows.iter().enumerate() {
        let row_number = sheet.first_row + r + 1;
        xml.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_name(sheet.first_col + c), row_number);
            if let Some(cell) = cell_xml(&reference, cell) {
                xml.push_str(&cell);
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

pub fn write_xlsx(path: &Path, sheets: &[Sheet<'_>]) -> Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    let mut workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{}" xmlns:r="{}"><sheets>"#,
        MAIN_NS, REL_NS
    );
    let mut relationships = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">"#,
        PACKAGE_REL_NS
    );

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            n
        ));
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(sheet.name),
            n,
            n
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, REL_NS, n
        ));
    }
    content_types.push_str("</Types>");
    workbook.push_str("</sheets></workbook>");
    relationships.push_str("</Relationships>");

    let package_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
        PACKAGE_REL_NS, REL_NS
    );

    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types),
        ("_rels/.rels".to_string(), package_rels),
        ("xl/workbook.xml".to_string(), workbook),
        ("xl/_rels/workbook.xml.rels".to_string(), relationships),
    ];
    for (i, sheet) in sheets.iter().enumerate() {
        parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), worksheet_xml(sheet)));
    }

    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;

    Ok(())
}

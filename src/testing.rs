//! Test support: minimal generated xlsx workbooks and unique temp paths.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::spreadsheet::cell_position;

/// A temp-dir path that no other test run collides with.
pub(crate) fn unique_path(prefix: &str, extension: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{suffix}.{extension}"))
}

/// Cell content for generated worksheets.
pub(crate) enum Field<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    Empty,
    /// Numeric serial styled with a date number format
    DateSerial(f64),
    /// Numeric serial styled with a datetime number format
    DateTimeSerial(f64),
    /// Numeric serial styled with a time number format
    TimeSerial(f64),
}

/// Writes a single-sheet xlsx workbook with the given rows. Cells are laid
/// out from A1; `Field::Empty` leaves a hole.
pub(crate) fn write_xlsx(path: &Path, sheet_name: &str, rows: &[Vec<Field>]) {
    let file = File::create(path).expect("create xlsx");
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let parts: Vec<(&str, String)> = vec![
        ("[Content_Types].xml", content_types()),
        ("_rels/.rels", package_relationships()),
        ("xl/workbook.xml", workbook(sheet_name)),
        ("xl/_rels/workbook.xml.rels", workbook_relationships()),
        ("xl/styles.xml", styles()),
        ("xl/worksheets/sheet1.xml", worksheet(rows)),
    ];
    for (name, content) in parts {
        archive.start_file(name, options).expect("zip entry");
        archive.write_all(content.as_bytes()).expect("zip write");
    }
    archive.finish().expect("zip finish");
}

fn content_types() -> String {
    concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
        "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
        "<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
        "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
        "</Types>",
    )
    .to_owned()
}

fn package_relationships() -> String {
    concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>",
        "</Relationships>",
    )
    .to_owned()
}

fn workbook(sheet_name: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
            "<workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" ",
            "xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
            "<sheets><sheet name=\"{name}\" sheetId=\"1\" r:id=\"rId1\"/></sheets>",
            "</workbook>",
        ),
        name = escape(sheet_name),
    )
}

fn workbook_relationships() -> String {
    concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>",
        "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
        "</Relationships>",
    )
    .to_owned()
}

/// Style indexes: 0 = general, 1 = date (numFmtId 14), 2 = datetime (22),
/// 3 = time (20).
fn styles() -> String {
    concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
        "<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
        "<cellXfs count=\"4\">",
        "<xf numFmtId=\"0\" applyNumberFormat=\"0\"/>",
        "<xf numFmtId=\"14\" applyNumberFormat=\"1\"/>",
        "<xf numFmtId=\"22\" applyNumberFormat=\"1\"/>",
        "<xf numFmtId=\"20\" applyNumberFormat=\"1\"/>",
        "</cellXfs>",
        "</styleSheet>",
    )
    .to_owned()
}

fn worksheet(rows: &[Vec<Field>]) -> String {
    let mut sheet_data = String::new();
    for (row, record) in rows.iter().enumerate() {
        sheet_data.push_str(&format!("<row r=\"{}\">", row + 1));
        for (column, field) in record.iter().enumerate() {
            let position = cell_position(row, column);
            let cell = match field {
                Field::Empty => continue,
                Field::Int(value) => format!("<c r=\"{position}\"><v>{value}</v></c>"),
                Field::Float(value) => format!("<c r=\"{position}\"><v>{value}</v></c>"),
                Field::Bool(value) => {
                    format!("<c r=\"{position}\" t=\"b\"><v>{}</v></c>", *value as u8)
                }
                Field::Str(value) => format!(
                    "<c r=\"{position}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                    escape(value)
                ),
                Field::DateSerial(value) => {
                    format!("<c r=\"{position}\" s=\"1\"><v>{value}</v></c>")
                }
                Field::DateTimeSerial(value) => {
                    format!("<c r=\"{position}\" s=\"2\"><v>{value}</v></c>")
                }
                Field::TimeSerial(value) => {
                    format!("<c r=\"{position}\" s=\"3\"><v>{value}</v></c>")
                }
            };
            sheet_data.push_str(&cell);
        }
        sheet_data.push_str("</row>");
    }

    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
            "<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
            "<sheetData>{rows}</sheetData>",
            "</worksheet>",
        ),
        rows = sheet_data,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

use lscmp_common::{LscmpError, MatchStatus, NameEntry};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Font color applied to matched names (ARGB)
pub const DEFAULT_MATCHED_COLOR: &str = "FF008000";
/// Font color applied to missing names (ARGB)
pub const DEFAULT_MISSING_COLOR: &str = "FFFF0000";

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Writes a comparison as a single-sheet XLSX workbook.
///
/// Left names go in column A and right names in column B, row for row in
/// listing order. Match status is conveyed through the font color of each
/// cell. The workbook is assembled part by part and zipped directly, so no
/// spreadsheet runtime is needed.
pub struct XlsxExporter {
    sheet_name: String,
    matched_color: String,
    missing_color: String,
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self {
            sheet_name: "Comparison".to_string(),
            matched_color: DEFAULT_MATCHED_COLOR.to_string(),
            missing_color: DEFAULT_MISSING_COLOR.to_string(),
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Override the status colors. Accepts 6 (RGB) or 8 (ARGB) hex digits,
    /// with or without a leading '#'.
    pub fn with_colors(mut self, matched: &str, missing: &str) -> Result<Self, LscmpError> {
        self.matched_color = normalize_color(matched)?;
        self.missing_color = normalize_color(missing)?;
        Ok(self)
    }

    /// Write the workbook to `path`, creating or truncating the file.
    pub fn export(
        &self,
        path: &Path,
        left: &[NameEntry],
        right: &[NameEntry],
    ) -> Result<(), LscmpError> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", content_types_xml()),
            ("_rels/.rels", root_rels_xml()),
            ("docProps/core.xml", core_properties_xml()),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", workbook_rels_xml()),
            ("xl/styles.xml", self.styles_xml()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml(left, right)),
        ];

        for (name, content) in &parts {
            zip.start_file(*name, options)
                .map_err(|e| LscmpError::Export(format!("Failed to start part {}: {}", name, e)))?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()
            .map_err(|e| LscmpError::Export(format!("Failed to finalize workbook: {}", e)))?;

        debug!(
            "Wrote {} rows to {:?}",
            left.len().max(right.len()),
            path
        );
        Ok(())
    }

    fn workbook_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!(
            "<workbook xmlns=\"{}\" xmlns:r=\"{}\">",
            MAIN_NS, REL_NS
        ));
        xml.push_str(&format!(
            "<sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets>",
            escape_xml(&self.sheet_name)
        ));
        xml.push_str("</workbook>");
        xml
    }

    /// The stylesheet carries three fonts: the default, matched, and missing.
    /// Cell styles 1 and 2 select the colored fonts.
    fn styles_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!("<styleSheet xmlns=\"{}\">", MAIN_NS));

        xml.push_str("<fonts count=\"3\">");
        xml.push_str("<font><sz val=\"11\"/><name val=\"Calibri\"/></font>");
        xml.push_str(&format!(
            "<font><sz val=\"11\"/><color rgb=\"{}\"/><name val=\"Calibri\"/></font>",
            self.matched_color
        ));
        xml.push_str(&format!(
            "<font><sz val=\"11\"/><color rgb=\"{}\"/><name val=\"Calibri\"/></font>",
            self.missing_color
        ));
        xml.push_str("</fonts>");

        // The first two fills are reserved by the format
        xml.push_str("<fills count=\"2\">");
        xml.push_str("<fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("<fill><patternFill patternType=\"gray125\"/></fill>");
        xml.push_str("</fills>");

        xml.push_str("<borders count=\"1\">");
        xml.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
        xml.push_str("</borders>");

        xml.push_str("<cellStyleXfs count=\"1\">");
        xml.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>");
        xml.push_str("</cellStyleXfs>");

        xml.push_str("<cellXfs count=\"3\">");
        xml.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>");
        xml.push_str(
            "<xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\"/>",
        );
        xml.push_str(
            "<xf numFmtId=\"0\" fontId=\"2\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\"/>",
        );
        xml.push_str("</cellXfs>");

        xml.push_str("<cellStyles count=\"1\">");
        xml.push_str("<cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/>");
        xml.push_str("</cellStyles>");

        xml.push_str("</styleSheet>");
        xml
    }

    fn sheet_xml(&self, left: &[NameEntry], right: &[NameEntry]) -> String {
        let rows = left.len().max(right.len());

        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!("<worksheet xmlns=\"{}\">", MAIN_NS));
        if rows == 0 {
            xml.push_str("<dimension ref=\"A1\"/>");
        } else {
            xml.push_str(&format!("<dimension ref=\"A1:B{}\"/>", rows));
        }
        xml.push_str("<sheetViews><sheetView workbookViewId=\"0\"/></sheetViews>");
        xml.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>");
        xml.push_str("<sheetData>");

        for i in 0..rows {
            let row = i + 1;
            xml.push_str(&format!("<row r=\"{}\">", row));
            if let Some(entry) = left.get(i) {
                xml.push_str(&cell_xml("A", row, entry));
            }
            if let Some(entry) = right.get(i) {
                xml.push_str(&cell_xml("B", row, entry));
            }
            xml.push_str("</row>");
        }

        xml.push_str("</sheetData>");
        xml.push_str("</worksheet>");
        xml
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_xml(column: &str, row: usize, entry: &NameEntry) -> String {
    let style = match entry.status {
        MatchStatus::Matched => 1,
        MatchStatus::Missing => 2,
    };
    format!(
        "<c r=\"{}{}\" s=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
        column,
        row,
        style,
        escape_xml(&entry.name)
    )
}

fn content_types_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    );
    xml.push_str(
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    );
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>");
    xml.push_str(
        "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
    );
    xml.push_str(
        "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
    );
    xml.push_str(
        "<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
    );
    xml.push_str(
        "<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
    );
    xml.push_str("</Types>");
    xml
}

fn root_rels_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str(&format!("<Relationships xmlns=\"{}\">", PKG_REL_NS));
    xml.push_str(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>",
    );
    xml.push_str(
        "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>",
    );
    xml.push_str("</Relationships>");
    xml
}

fn workbook_rels_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str(&format!("<Relationships xmlns=\"{}\">", PKG_REL_NS));
    xml.push_str(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>",
    );
    xml.push_str(
        "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    );
    xml.push_str("</Relationships>");
    xml
}

fn core_properties_xml() -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str(
        "<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );
    xml.push_str("<dc:creator>lscmp</dc:creator>");
    xml.push_str("<cp:lastModifiedBy>lscmp</cp:lastModifiedBy>");
    xml.push_str(&format!(
        "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>",
        now
    ));
    xml.push_str(&format!(
        "<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
        now
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn normalize_color(value: &str) -> Result<String, LscmpError> {
    let trimmed = value.trim().trim_start_matches('#');
    let valid_len = trimmed.len() == 6 || trimmed.len() == 8;
    if !valid_len || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LscmpError::Export(format!(
            "Invalid color '{}': expected 6 or 8 hex digits",
            value
        )));
    }

    let upper = trimmed.to_ascii_uppercase();
    if upper.len() == 6 {
        Ok(format!("FF{}", upper))
    } else {
        Ok(upper)
    }
}

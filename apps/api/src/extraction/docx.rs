//! DOCX text extraction: body paragraphs of `word/document.xml`, one per line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main document part of a `.docx` file and returns its body
/// paragraphs joined with `\n`.
pub fn extract_docx(path: &Path) -> Result<String> {
    let file = File::open(path).context("cannot open file")?;
    let mut archive = zip::ZipArchive::new(file).context("not a zip container")?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?
        .read_to_string(&mut xml)
        .with_context(|| format!("cannot read {DOCUMENT_PART}"))?;

    Ok(paragraphs(&xml)?.join("\n"))
}

/// Body-level paragraph texts in document order.
///
/// A paragraph's text is its `w:t` runs, with `w:tab` as `\t` and
/// `w:br`/`w:cr` as `\n`. Paragraphs nested in tables or text boxes are not
/// body paragraphs and are skipped. Empty paragraphs are kept.
pub fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    let mut current = String::new();

    let mut para_depth = 0usize;
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let collecting = para_depth == 1 && table_depth == 0 && run_depth > 0;
        match reader.read_event().context("malformed document.xml")? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    para_depth += 1;
                    if para_depth == 1 {
                        current.clear();
                    }
                }
                b"w:tbl" => table_depth += 1,
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if para_depth == 0 && table_depth == 0 => out.push(String::new()),
                b"w:tab" if collecting => current.push('\t'),
                b"w:br" | b"w:cr" if collecting => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if para_depth == 1 && table_depth == 0 {
                        out.push(std::mem::take(&mut current));
                    }
                    para_depth = para_depth.saturating_sub(1);
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text && collecting => {
                current.push_str(&t.unescape().context("bad text entity")?);
            }
            Event::CData(t) if in_text && collecting => {
                current.push_str(&String::from_utf8_lossy(&t));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{inner}</w:body></w:document>"#
        )
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = body(&format!("{}{}", para("Jane Doe"), para("Rust Engineer")));
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Jane Doe", "Rust Engineer"]);
    }

    #[test]
    fn test_runs_concatenate_within_paragraph() {
        let xml = body(
            r#"<w:p><w:r><w:t>Kuber</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>netes</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Kubernetes"]);
    }

    #[test]
    fn test_empty_paragraphs_kept() {
        let xml = body(&format!("{}<w:p/><w:p></w:p>{}", para("a"), para("b")));
        assert_eq!(paragraphs(&xml).unwrap(), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>2019</w:t><w:br/><w:t>Lead</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["R&D\t2019\nLead"]);
    }

    #[test]
    fn test_table_and_textbox_paragraphs_skipped() {
        let xml = body(&format!(
            r#"{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl><w:p><w:r><w:t>outer</w:t><w:pict><w:txbxContent>{}</w:txbxContent></w:pict></w:r></w:p>"#,
            para("before"),
            para("in table"),
            para("in box"),
        ));
        assert_eq!(paragraphs(&xml).unwrap(), vec!["before", "outer"]);
    }

    #[test]
    fn test_extract_docx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default()).unwrap();
        zip.write_all(body(&format!("{}<w:p/>{}", para("Jane"), para("Python"))).as_bytes())
            .unwrap();
        zip.finish().unwrap();

        assert_eq!(extract_docx(&path).unwrap(), "Jane\n\nPython");
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        let err = extract_docx(&path).unwrap_err();
        assert!(format!("{err:#}").contains("word/document.xml"));
    }

    #[test]
    fn test_non_zip_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "plain text pretending").unwrap();
        assert!(extract_docx(&path).is_err());
    }
}

//! Workbook codec for bulk catalog import and export.
//!
//! The workbook is a sectioned CSV document, one sheet per entity type in
//! dependency order (`# Brands`, `# Parts`, `# Devices`, `# Groups`), each
//! with a header row. Cells follow RFC 4180 double-quote escaping; newlines
//! inside cells are flattened on encode so the document stays line-oriented.

use crate::{
    model::import::ImportRowErrorDto,
    server::{
        error::{catalog::CatalogError, Error},
        model::import::{BrandRow, DeviceRow, GroupRow, ImportBatch, PartRow, RowAction},
    },
};

const BRANDS_SHEET: &str = "Brands";
const PARTS_SHEET: &str = "Parts";
const DEVICES_SHEET: &str = "Devices";
const GROUPS_SHEET: &str = "Groups";

/// Serializes a batch to workbook text, sheets in dependency order
pub fn encode(batch: &ImportBatch) -> String {
    let mut content = String::new();

    content.push_str("# Brands\n");
    content.push_str("action,name\n");
    for row in &batch.brands {
        content.push_str(&format!("{},\"{}\"\n", row.action, escape_csv(&row.name)));
    }

    content.push_str("\n# Parts\n");
    content.push_str("action,name,description\n");
    for row in &batch.parts {
        content.push_str(&format!(
            "{},\"{}\",\"{}\"\n",
            row.action,
            escape_csv(&row.name),
            row.description.as_deref().map(escape_csv).unwrap_or_default()
        ));
    }

    content.push_str("\n# Devices\n");
    content.push_str("action,brand,name,aliases\n");
    for row in &batch.devices {
        content.push_str(&format!(
            "{},\"{}\",\"{}\",\"{}\"\n",
            row.action,
            escape_csv(&row.brand),
            escape_csv(&row.name),
            escape_csv(&row.aliases.join(","))
        ));
    }

    content.push_str("\n# Groups\n");
    content.push_str("action,part,members,note,source,tags,confidence\n");
    for row in &batch.groups {
        content.push_str(&format!(
            "{},\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",{}\n",
            row.action,
            escape_csv(&row.part),
            escape_csv(&row.members.join(",")),
            row.note.as_deref().map(escape_csv).unwrap_or_default(),
            row.source.as_deref().map(escape_csv).unwrap_or_default(),
            escape_csv(&row.tags.join(",")),
            row.confidence.unwrap_or(1.0)
        ));
    }

    content
}

// Parses workbook text into a batch plus per-row structural errors
//
// Unusable rows (unknown action, too few columns, malformed numbers) become
// itemized errors and never block their siblings; row 0 flags problems with
// a sheet itself. Only a document without any recognizable sheet is rejected
// outright.
pub fn parse(text: &str) -> Result<(ImportBatch, Vec<ImportRowErrorDto>), Error> {
    let mut batch = ImportBatch::default();
    let mut errors = Vec::new();

    let mut sheet: Option<&str> = None;
    let mut row = 0usize;
    let mut expect_header = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if let Some(marker) = trimmed.strip_prefix('#') {
            let name = marker.trim();

            sheet = match name {
                BRANDS_SHEET => Some(BRANDS_SHEET),
                PARTS_SHEET => Some(PARTS_SHEET),
                DEVICES_SHEET => Some(DEVICES_SHEET),
                GROUPS_SHEET => Some(GROUPS_SHEET),
                other => {
                    errors.push(sheet_error(other, 0, format!("unknown sheet '{other}'")));
                    None
                }
            };

            row = 0;
            expect_header = sheet.is_some();
            continue;
        }

        let Some(current) = sheet else {
            continue;
        };

        let cells = split_line(line);

        // The line right after a sheet marker is its header, when present
        if expect_header {
            expect_header = false;

            if cells.first().map(String::as_str) == Some("action") {
                continue;
            }
        }

        row += 1;

        let Some(action) = cells.first().and_then(|cell| RowAction::parse(cell)) else {
            let cell = cells.first().cloned().unwrap_or_default();
            errors.push(sheet_error(current, row, format!("unknown action '{cell}'")));
            continue;
        };

        let outcome = match current {
            BRANDS_SHEET => parse_brand_row(&mut batch, row, action, &cells),
            PARTS_SHEET => parse_part_row(&mut batch, row, action, &cells),
            DEVICES_SHEET => parse_device_row(&mut batch, row, action, &cells),
            _ => parse_group_row(&mut batch, row, action, &cells),
        };

        if let Err(message) = outcome {
            errors.push(sheet_error(current, row, message));
        }
    }

    if batch.is_empty() && errors.is_empty() {
        return Err(CatalogError::Validation(
            "workbook contains no recognizable sheets".to_string(),
        )
        .into());
    }

    Ok((batch, errors))
}

fn parse_brand_row(
    batch: &mut ImportBatch,
    row: usize,
    action: RowAction,
    cells: &[String],
) -> Result<(), String> {
    if cells.len() < 2 {
        return Err("expected columns action,name".to_string());
    }

    batch.brands.push(BrandRow {
        row,
        action,
        name: cells[1].clone(),
    });

    Ok(())
}

fn parse_part_row(
    batch: &mut ImportBatch,
    row: usize,
    action: RowAction,
    cells: &[String],
) -> Result<(), String> {
    if cells.len() < 2 {
        return Err("expected columns action,name,description".to_string());
    }

    batch.parts.push(PartRow {
        row,
        action,
        name: cells[1].clone(),
        description: optional_cell(cells.get(2)),
    });

    Ok(())
}

fn parse_device_row(
    batch: &mut ImportBatch,
    row: usize,
    action: RowAction,
    cells: &[String],
) -> Result<(), String> {
    if cells.len() < 3 {
        return Err("expected columns action,brand,name,aliases".to_string());
    }

    batch.devices.push(DeviceRow {
        row,
        action,
        brand: cells[1].clone(),
        name: cells[2].clone(),
        aliases: split_list(cells.get(3)),
    });

    Ok(())
}

fn parse_group_row(
    batch: &mut ImportBatch,
    row: usize,
    action: RowAction,
    cells: &[String],
) -> Result<(), String> {
    if cells.len() < 3 {
        return Err("expected columns action,part,members,note,source,tags,confidence".to_string());
    }

    let confidence = match cells.get(6).map(String::as_str).unwrap_or_default().trim() {
        "" => None,
        cell => {
            let value: f64 = cell
                .parse()
                .map_err(|_| format!("invalid confidence '{cell}'"))?;

            if !(0.0..=1.0).contains(&value) {
                return Err(format!("confidence '{cell}' must be between 0 and 1"));
            }

            Some(value)
        }
    };

    batch.groups.push(GroupRow {
        row,
        action,
        part: cells[1].clone(),
        members: split_list(cells.get(2)),
        note: optional_cell(cells.get(3)),
        source: optional_cell(cells.get(4)),
        tags: split_list(cells.get(5)),
        confidence,
    });

    Ok(())
}

fn sheet_error(sheet: &str, row: usize, error: String) -> ImportRowErrorDto {
    ImportRowErrorDto {
        sheet: sheet.to_string(),
        row: row as u64,
        error,
    }
}

fn optional_cell(cell: Option<&String>) -> Option<String> {
    cell.map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

fn split_list(cell: Option<&String>) -> Vec<String> {
    cell.map(String::as_str)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits one CSV line into cells, honoring RFC 4180 double-quote escaping
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => quoted = true,
                ',' => {
                    cells.push(current.trim().to_string());
                    current = String::new();
                }
                _ => current.push(c),
            }
        }
    }

    cells.push(current.trim().to_string());
    cells
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

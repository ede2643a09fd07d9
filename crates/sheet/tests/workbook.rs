use rust_xlsxwriter::Workbook;
use sheetsift_sheet::{Book, CellValue, SheetError};
use std::path::Path;
use tempfile::tempdir;

fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();

    let first = workbook.add_worksheet();
    first.set_name("近3年").unwrap();
    first.write_string(0, 0, "[個股排名 (Top 30)]").unwrap();
    first.write_string(1, 0, "排名").unwrap();
    first.write_string(1, 1, "代號").unwrap();
    first.write_number(2, 0, 1.0).unwrap();
    first.write_number(2, 1, 2330.0).unwrap();
    first.write_number(2, 2, 12.5).unwrap();

    // Used range starts at column C
    let second = workbook.add_worksheet();
    second.set_name("Offset").unwrap();
    second.write_string(3, 2, "late").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_reads_all_sheets_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Stock_Analysis_Report_3Year.xlsx");
    write_fixture(&path);

    let book = Book::from_workbook(&path).unwrap();

    assert_eq!(book.name(), "Stock_Analysis_Report_3Year");
    assert_eq!(book.sheet_names(), vec!["近3年", "Offset"]);

    let sheet = book.sheet("近3年").unwrap();
    assert_eq!(sheet.row_count(), 3);
    assert_eq!(
        sheet.cell(0, 0),
        &CellValue::Text("[個股排名 (Top 30)]".to_string())
    );
    assert_eq!(sheet.cell(2, 0), &CellValue::Int(1));
    assert_eq!(sheet.cell(2, 1), &CellValue::Int(2330));
    assert_eq!(sheet.cell(2, 2), &CellValue::Float(12.5));
    assert_eq!(sheet.cell(1, 2), &CellValue::Empty);
}

#[test]
fn test_rows_are_anchored_at_column_a() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    write_fixture(&path);

    let book = Book::from_workbook(&path).unwrap();
    let sheet = book.sheet("Offset").unwrap();

    assert_eq!(sheet.row_count(), 1);
    assert_eq!(sheet.cell(0, 0), &CellValue::Empty);
    assert_eq!(sheet.cell(0, 2), &CellValue::Text("late".to_string()));
}

#[test]
fn test_unreadable_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = Book::from_workbook(&path);
    assert!(matches!(result, Err(SheetError::Workbook(_))));
}

//! Tests for CSV loading and writing.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use unify_ingest::{
    IngestError, IngestOptions, collect_input_files, list_csv_files, read_dataset,
    read_dataset_with_options, write_collated, write_collated_csv,
};
use unify_model::{CellValue, CollatedRow, CollatedTable};

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn reads_headers_and_typed_cells() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "wb.csv",
        "\u{feff}Country  Name, Year ,M49\nUnited Kingdom,2017,826\n\n,,\nAfghanistan,2017,004\nChad\n",
    );

    let dataset = read_dataset(&path).unwrap();
    assert_eq!(dataset.label.as_deref(), Some("wb.csv"));
    assert_eq!(dataset.columns, vec!["Country Name", "Year", "M49"]);
    assert_eq!(dataset.row_count(), 3);

    let first = &dataset.rows[0];
    assert_eq!(first.get("Country Name"), &CellValue::text("United Kingdom"));
    assert_eq!(first.get("Year"), &CellValue::Number(2017.0));
    assert_eq!(first.get("M49"), &CellValue::Number(826.0));

    assert_eq!(dataset.rows[1].get("M49"), &CellValue::text("004"));
    assert!(dataset.rows[2].get("Year").is_missing());
}

#[test]
fn custom_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "semi.csv", "Country;Year\nFrance;2018\n");
    let options = IngestOptions {
        delimiter: b';',
        ..IngestOptions::default()
    };
    let dataset = read_dataset_with_options(&path, &options).unwrap();
    assert_eq!(dataset.columns, vec!["Country", "Year"]);
    assert_eq!(dataset.rows[0].get("Country"), &CellValue::text("France"));
}

#[test]
fn rejects_structural_problems() {
    let dir = TempDir::new().unwrap();

    let empty = write(dir.path(), "empty.csv", "\n , \n");
    assert!(matches!(read_dataset(&empty), Err(IngestError::EmptyCsv { .. })));

    let duplicate = write(dir.path(), "dup.csv", "Year,Country,Year\n");
    match read_dataset(&duplicate) {
        Err(IngestError::DuplicateColumn { column, .. }) => assert_eq!(column, "Year"),
        other => panic!("unexpected result: {other:?}"),
    }

    let blank = write(dir.path(), "blank.csv", "Country,,Year\n");
    assert!(matches!(
        read_dataset(&blank),
        Err(IngestError::EmptyColumnName { .. })
    ));

    let utf16 = dir.path().join("utf16.csv");
    fs::write(&utf16, [0xFF, 0xFE, b'C', 0]).unwrap();
    assert!(matches!(
        read_dataset(&utf16),
        Err(IngestError::UnsupportedEncoding { .. })
    ));

    assert!(matches!(
        read_dataset(&dir.path().join("missing.csv")),
        Err(IngestError::FileNotFound { .. })
    ));

    let big = write(dir.path(), "big.csv", "Country,Year\nFrance,2018\n");
    let options = IngestOptions {
        max_file_size: 4,
        ..IngestOptions::default()
    };
    assert!(matches!(
        read_dataset_with_options(&big, &options),
        Err(IngestError::FileTooLarge { .. })
    ));
}

#[test]
fn discovers_csv_files_in_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.csv", "x\n");
    write(dir.path(), "a.CSV", "x\n");
    write(dir.path(), "notes.txt", "x\n");
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let files = list_csv_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.CSV", "b.csv"]);

    let extra = write(dir.path(), "notes.txt", "x\n");
    let inputs = vec![extra.clone(), dir.path().to_path_buf()];
    let collected = collect_input_files(&inputs).unwrap();
    assert_eq!(collected.len(), 3);
    assert_eq!(collected[0], extra);

    assert!(matches!(
        list_csv_files(&dir.path().join("nope")),
        Err(IngestError::DirectoryNotFound { .. })
    ));
    assert!(matches!(
        collect_input_files(&[dir.path().join("nope.csv")]),
        Err(IngestError::FileNotFound { .. })
    ));
}

fn collated() -> CollatedTable {
    let mut table = CollatedTable::new(
        "Country".to_string(),
        "Year".to_string(),
        vec!["Country".to_string(), "Year".to_string(), "GDP".to_string()],
    );
    table.rows.push(CollatedRow {
        source_index: 0,
        row_index: 0,
        data_year: Some("2017".to_string()),
        values: vec![
            CellValue::text("United Kingdom, The"),
            CellValue::Number(2017.0),
            CellValue::Number(1.5),
        ],
    });
    table.rows.push(CollatedRow {
        source_index: 1,
        row_index: 0,
        data_year: None,
        values: vec![CellValue::text("France"), CellValue::Missing],
    });
    table
}

#[test]
fn writes_extras_first() {
    let mut buffer = Vec::new();
    write_collated(&collated(), &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(
        text,
        "Dataset Index,Data Year,Country,Year,GDP\n\
         0,2017,\"United Kingdom, The\",2017,1.5\n\
         1,,France,,\n"
    );
}

#[test]
fn written_csv_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    write_collated_csv(&collated(), &path).unwrap();

    let dataset = read_dataset(&path).unwrap();
    assert_eq!(dataset.columns[..2], ["Dataset Index", "Data Year"]);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(
        dataset.rows[0].get("Country"),
        &CellValue::text("United Kingdom, The")
    );
}

use pretty_assertions::assert_eq;
use sar_tick_studio::table::LabeledTable;
use sar_tick_studio::timeseries::{
    assemble_time_series, average_row_values, simplify_stage_label, TimeSeriesBuilder,
};
use sar_tick_studio::utils::error::TableError;

fn stage_table(columns: &[&str], averages: &[&str]) -> LabeledTable {
    LabeledTable {
        index_name: "Tick".to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: vec![
            (
                "Average (Vt)".to_string(),
                averages.iter().map(|a| a.to_string()).collect(),
            ),
            (
                "Std (Vt)".to_string(),
                vec![String::new(); columns.len()],
            ),
            ("0".to_string(), vec!["1".to_string(); columns.len()]),
        ],
    }
}

#[test]
fn test_stage_columns_sorted_numerically() {
    let inputs = vec![
        ("DR2".to_string(), stage_table(&["S1R"], &["1.0000"])),
        ("DR10".to_string(), stage_table(&["S1R"], &["3.0000"])),
        ("DR1".to_string(), stage_table(&["S1R"], &["0.5000"])),
    ];

    let matrix = assemble_time_series(&inputs).unwrap();
    assert_eq!(matrix.stages().to_vec(), vec!["DR1", "DR2", "DR10"]);
    assert_eq!(matrix.row("S1R"), vec![Some(0.5), Some(1.0), Some(3.0)]);
}

#[test]
fn test_sensor_rows_sorted_numerically() {
    let inputs = vec![(
        "DR0".to_string(),
        stage_table(&["S10R", "S2R", "S1R"], &["1", "2", "3"]),
    )];

    let matrix = assemble_time_series(&inputs).unwrap();
    assert_eq!(matrix.sensors().to_vec(), vec!["S1R", "S2R", "S10R"]);
}

#[test]
fn test_empty_averages_are_skipped_not_zero() {
    let inputs = vec![
        ("DR1".to_string(), stage_table(&["S1R", "S2R"], &["-1.2500", ""])),
        ("DR2".to_string(), stage_table(&["S1R", "S2R"], &["-1.0000", "2.0000"])),
    ];

    let matrix = assemble_time_series(&inputs).unwrap();
    assert_eq!(matrix.value("S2R", "DR1"), None);
    assert_eq!(matrix.value("S2R", "DR2"), Some(2.0));
    assert_eq!(matrix.series("S2R"), vec![(1, 2.0)]);
    assert_eq!(matrix.value_range(), Some((-1.25, 2.0)));
}

#[test]
fn test_stage_with_only_empty_averages_has_no_column() {
    let inputs = vec![
        ("DR1".to_string(), stage_table(&["S1R"], &[""])),
        ("DR2".to_string(), stage_table(&["S1R"], &["4.0"])),
    ];

    let matrix = assemble_time_series(&inputs).unwrap();
    assert_eq!(matrix.stages().to_vec(), vec!["DR2"]);
}

#[test]
fn test_missing_average_row_is_malformed() {
    let mut table = stage_table(&["S1R"], &["1.0"]);
    table.rows.remove(0);

    let err = average_row_values(&table).unwrap_err();
    assert!(matches!(err, TableError::MalformedInput(_)));

    let inputs = vec![
        ("DR1".to_string(), stage_table(&["S1R"], &["1.0"])),
        ("DR2".to_string(), table),
    ];
    assert!(assemble_time_series(&inputs).is_err());
}

#[test]
fn test_non_sensor_columns_ignored() {
    let table = stage_table(&["S1R", "Note", "S3R"], &["1.0", "abc", "2.0"]);
    let values = average_row_values(&table).unwrap();

    assert_eq!(
        values,
        vec![("S1R".to_string(), 1.0), ("S3R".to_string(), 2.0)]
    );
}

#[test]
fn test_non_numeric_average_is_malformed() {
    let table = stage_table(&["S1R"], &["n/a"]);
    assert!(average_row_values(&table).is_err());
}

#[test]
fn test_repeated_stage_overwrites_per_sensor() {
    let mut builder = TimeSeriesBuilder::new();
    builder
        .add_table("DR5", &stage_table(&["S1R", "S2R"], &["1.0", "2.0"]))
        .unwrap();
    builder
        .add_table("DR5", &stage_table(&["S1R", "S2R"], &["9.0", ""]))
        .unwrap();

    let matrix = builder.build();
    assert_eq!(matrix.value("S1R", "DR5"), Some(9.0));
    assert_eq!(matrix.value("S2R", "DR5"), Some(2.0));
}

#[test]
fn test_fallback_label_sorts_after_numbered_stages() {
    let inputs = vec![
        (simplify_stage_label("baseline"), stage_table(&["S1R"], &["0.1"])),
        (simplify_stage_label("DR3p1h"), stage_table(&["S1R"], &["0.2"])),
    ];

    let matrix = assemble_time_series(&inputs).unwrap();
    assert_eq!(matrix.stages().to_vec(), vec!["DR3", "baseline"]);
}

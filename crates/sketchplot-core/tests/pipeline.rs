//! End-to-end chart preparation from CSV files

use std::io::Write;

use proptest::prelude::*;
use rstest::rstest;
use sketchplot_core::io::{open_file, CsvReader};
use sketchplot_core::{
    ecdf_hover, nearest_within, pick_step, prepare_from_reader, ChartConfig, ChartKind,
    LinearScale, PreparedChart,
};

const ORDERS: &str = "\
Order_ID,Category,Total_Sales
1,Laptops,120
2,Phones,80
3,Laptops,95
4,Accessories,15
5,Phones,
6,Laptops,110
7,Phones,70
8,Accessories,n/a
9,Laptops,2400
10,Phones,88
";

fn orders_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(ORDERS.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// === Axis steps ===

#[rstest]
#[case(1000.0, 6, 200.0)]
#[case(50.0, 6, 10.0)]
#[case(1.0, 6, 0.2)]
#[case(7.0, 7, 1.0)]
#[case(2520.0, 7, 500.0)]
fn test_pick_step_table(#[case] max: f64, #[case] ticks: usize, #[case] expected: f64) {
    let step = pick_step(max, ticks).unwrap();
    assert!((step - expected).abs() < 1e-12 * expected.max(1.0), "{step} != {expected}");
}

// === Pipelines ===

#[test]
fn test_box_plot_from_file() {
    let file = orders_file();
    let reader = open_file(file.path().to_str().unwrap()).unwrap();

    let prepared = prepare_from_reader(reader.as_ref(), ChartKind::BoxPlot, &ChartConfig::default())
        .unwrap();
    let PreparedChart::BoxPlot(data) = prepared else {
        panic!("expected a box plot");
    };

    assert_eq!(data.summary.count, 8);
    assert_eq!(data.summary.outliers, vec![15.0, 2400.0]);
    assert_eq!(data.outliers.len(), 2);
}

#[test]
fn test_strip_plot_from_text() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let prepared = prepare_from_reader(&reader, ChartKind::Strip, &ChartConfig::default()).unwrap();
    let PreparedChart::Strip(data) = prepared else {
        panic!("expected a strip plot");
    };

    assert_eq!(data.categories, vec!["Laptops", "Phones", "Accessories"]);
    assert_eq!(data.points.len(), 8);
}

#[test]
fn test_missing_column_is_reported() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let mut config = ChartConfig::default();
    config.columns.value = "Quantity".to_string();

    let err = prepare_from_reader(&reader, ChartKind::Histogram, &config).unwrap_err();
    assert!(err.to_string().contains("Quantity"));
}

#[test]
fn test_empty_column_is_empty_input() {
    let reader = CsvReader::from_text("Category,Total_Sales\nA,\nB,x\n", b',').unwrap();
    let err = prepare_from_reader(&reader, ChartKind::Ecdf, &ChartConfig::default()).unwrap_err();
    assert!(err.is_empty_input());
}

#[test]
fn test_prepared_chart_json_is_tagged() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let prepared =
        prepare_from_reader(&reader, ChartKind::Histogram, &ChartConfig::default()).unwrap();

    let json = serde_json::to_value(&prepared).unwrap();
    assert_eq!(json["kind"], "histogram");
    assert_eq!(json["bins"]["counts"].as_array().map(Vec::len), Some(30));
}

#[test]
fn test_ecdf_hover_through_prepared_scale() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let PreparedChart::Ecdf(data) =
        prepare_from_reader(&reader, ChartKind::Ecdf, &ChartConfig::default()).unwrap()
    else {
        panic!("expected an ecdf");
    };

    let scale = LinearScale::new(data.x_range, (90.0, 860.0));
    let pointer_x = scale.map(2400.0);
    let hover = ecdf_hover(&data.ecdf, &scale, pointer_x);
    assert_eq!(hover.value, 2400.0);
    assert_eq!(hover.probability, 1.0);

    let drawn: Vec<[f64; 2]> = data
        .ecdf
        .points()
        .iter()
        .map(|(v, p)| [scale.map(*v), 470.0 - p * 410.0])
        .collect();
    let hit = nearest_within(&drawn, [pointer_x, 60.0], 12.0).unwrap();
    assert_eq!(hit.index, data.ecdf.len() - 1);
}

#[test]
fn test_log_histogram_from_text() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let PreparedChart::LogHistogram(data) =
        prepare_from_reader(&reader, ChartKind::LogHistogram, &ChartConfig::default()).unwrap()
    else {
        panic!("expected a log histogram");
    };

    // 15 .. 2400 spans the decades 10^1 .. 10^4
    assert_eq!(data.log_range, (1.0, 4.0));
    assert_eq!(data.bins.total(), 8);
    assert_eq!(data.bins.len(), 28);
    assert_eq!(data.x_ticks.first().map(|t| t.value), Some(20.0));
    assert_eq!(data.x_ticks.last().map(|t| t.value), Some(2000.0));
}

#[test]
fn test_bar_from_text() {
    let reader = CsvReader::from_text(ORDERS, b',').unwrap();
    let PreparedChart::Bar(data) =
        prepare_from_reader(&reader, ChartKind::Bar, &ChartConfig::default()).unwrap()
    else {
        panic!("expected a bar chart");
    };

    let labels: Vec<&str> = data.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Laptops", "Phones", "Accessories"]);
    assert_eq!(data.bars[0].total, 2725.0);
    assert_eq!(data.step, 500.0);
    assert_eq!(data.axis_max, 3000.0);
}

#[test]
fn test_heatmap_from_text() {
    let text = "\
Category,Month,Total_Sales
Laptops,March,300
Phones,January,120
Laptops,January,200
Tablets,February,40
Laptops,March,100
";
    let reader = CsvReader::from_text(text, b',').unwrap();
    let mut config = ChartConfig::default();
    config.group.top_n = 2;

    let PreparedChart::Heatmap(data) =
        prepare_from_reader(&reader, ChartKind::Heatmap, &config).unwrap()
    else {
        panic!("expected a heatmap");
    };

    assert_eq!(data.table.rows, vec!["Laptops", "Phones"]);
    assert_eq!(data.table.columns, vec!["January", "March"]);
    assert_eq!(data.table.get("Laptops", "March"), Some(400.0));
    assert_eq!(data.table.get("Phones", "March"), Some(0.0));
    assert_eq!(data.value_range, (0.0, 400.0));
}

// === Property-Based Tests ===

proptest! {
    #[test]
    fn test_pick_step_is_nice(max in 1.0e-6..1.0e9f64, ticks in 1usize..20) {
        let step = pick_step(max, ticks).unwrap();
        let magnitude = 10f64.powf(step.log10().floor());
        let multiplier = step / magnitude;

        prop_assert!(step > 0.0);
        prop_assert!(
            [1.0, 2.0, 5.0, 10.0].iter().any(|m| (multiplier - m).abs() < 1e-9),
            "step {} has multiplier {}", step, multiplier
        );
    }
}

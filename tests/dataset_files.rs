use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use comp_forge::batch::{BatchOptions, featurize_dataset};
use comp_forge::io::{Dataset, Format, read_dataset, write_dataset};
use comp_forge::{Featurizer, PropertyCatalog, Variant};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn read(path: &Path, format: Format) -> Dataset {
    let file = File::open(path).unwrap();
    read_dataset(BufReader::new(file), format).unwrap()
}

fn write(path: &Path, dataset: &Dataset, format: Format) {
    let file = File::create(path).unwrap();
    write_dataset(BufWriter::new(file), dataset, format).unwrap();
}

#[test]
fn csv_file_in_json_file_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alloys.csv");
    let output = dir.path().join("alloys.json");

    fs::write(
        &input,
        "id,composition,hardness\n1,Fe0.5Ni0.5,210.5\n2,Cu,\n3,Fe2Ni4,180\n",
    )
    .unwrap();

    let featurizer = Featurizer::with_variant(PropertyCatalog::embedded(), Variant::Extended);
    let dataset = read(&input, Format::Csv);
    let report = featurize_dataset(&featurizer, &dataset, &BatchOptions::default()).unwrap();
    assert!(report.failures.is_empty());
    write(&output, &report.dataset, Format::Json);

    let back = read(&output, Format::Json);
    assert_eq!(back.len(), 3);
    assert_eq!(&back.columns()[..3], ["id", "composition", "hardness"]);
    assert_eq!(&back.columns()[3..], featurizer.feature_labels());

    assert_eq!(back.cell(0, "composition").unwrap(), "Fe0.5Ni0.5");
    assert!(back.cell(1, "hardness").unwrap().is_null());

    let vec = back
        .cell(0, "valence electron concentration")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!(approx_eq(vec, 9.0));

    let entropy = back
        .cell(1, "mixing entropy")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!(approx_eq(entropy, 0.0));

    let size = back
        .cell(2, "atomic size difference")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!(approx_eq(size, 1.0 / 3.0));
}

#[test]
fn bad_rows_survive_a_csv_round_trip_as_empty_cells() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mixed.json");
    let output = dir.path().join("mixed.csv");

    fs::write(
        &input,
        r#"[
            {"composition": "Fe0.6Ni0.4"},
            {"composition": "Xx2O"},
            {"composition": 42}
        ]"#,
    )
    .unwrap();

    let featurizer = Featurizer::with_variant(PropertyCatalog::embedded(), Variant::Base);
    let options = BatchOptions {
        ignore_errors: true,
        ..BatchOptions::default()
    };

    let dataset = read(&input, Format::Json);
    let report = featurize_dataset(&featurizer, &dataset, &options).unwrap();
    assert_eq!(report.featurized(), 1);
    let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![1, 2]);
    write(&output, &report.dataset, Format::Csv);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("composition,valence electron concentration,"));
    assert!(lines[2].starts_with("Xx2O,,"));
    assert!(lines[3].starts_with("42,,"));

    let back = read(&output, Format::Csv);
    let melting = back
        .cell(0, "melting point")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!(approx_eq(melting, 0.6 * 1811.0 + 0.4 * 1728.0));
    assert!(back.cell(1, "melting point").unwrap().is_null());
}

#[test]
fn custom_catalog_file_drives_featurization() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[elements.Fe]
nvalence = 8
atomic_radius = 140.0
covalent_radius = 116.0
electronegativity_pauling = 1.83
density = 7.874
ionization_energies = [7.902]

[elements.Al]
nvalence = 3
atomic_radius = 125.0
covalent_radius = 121.0
electronegativity_pauling = 1.61
density = 2.70
ionization_energies = [5.986, 18.829]
"#,
    )
    .unwrap();

    let catalog = PropertyCatalog::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(catalog.len(), 2);

    let featurizer = Featurizer::with_variant(catalog.into(), Variant::Extended);
    let features = featurizer.featurize_formula("Fe3Al").unwrap();

    let vec = features.get("valence electron concentration").unwrap();
    assert!(approx_eq(vec, 0.75 * 8.0 + 0.25 * 3.0));
    let second = features.get("second ionization energy").unwrap();
    assert!(approx_eq(second, 0.25 * 18.829));

    assert!(featurizer.featurize_formula("FeNi").is_err());
}

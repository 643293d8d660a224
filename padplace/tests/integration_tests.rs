//! End-to-end tests for the extract-then-update pipeline

use padplace::prelude::*;
use padplace::{classify_circles, discover_footprints, export_labeled_csv, RadiusClass};
use std::fs;
use std::path::{Path, PathBuf};

const ELECTRODE: &str = "CustomComponents:1625-5-57-15_D3.18mm_disk";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn stage_board(dir: &Path) -> PathBuf {
    let staged = dir.join("sensor_board.kicad_pcb");
    fs::copy(fixture_path("sensor_board.kicad_pcb"), &staged).unwrap();
    staged
}

#[test]
fn test_update_from_dxf_places_electrodes() {
    let dir = tempfile::tempdir().unwrap();
    let board = stage_board(dir.path());

    let options = PlacementOptions {
        target_radius: Some(1.5),
        ..PlacementOptions::default()
    };
    let report = PadPlaceCore::update_from_dxf(
        &fixture_path("electrode_array.dxf"),
        &board,
        ELECTRODE,
        &options,
    )
    .unwrap();

    assert_eq!(report.updated, 3);
    assert_eq!(report.requested, 3);

    let output = fs::read_to_string(&report.output_path).unwrap();
    assert!(output.contains("\t\t(at 10.46 20)"));
    assert!(output.contains("\t\t(at 30 40)"));
    assert!(output.contains("\t\t(at 50 60)"));
    assert!(output.contains("\t\t(at 140 100)"), "mount stays put");
}

#[test]
fn test_update_from_dxf_with_flip_y() {
    let dir = tempfile::tempdir().unwrap();
    let board = stage_board(dir.path());

    let options = PlacementOptions {
        target_radius: Some(1.5),
        flip_y: true,
        ..PlacementOptions::default()
    };
    let report = PadPlaceCore::update_from_dxf(
        &fixture_path("electrode_array.dxf"),
        &board,
        ELECTRODE,
        &options,
    )
    .unwrap();

    let output = fs::read_to_string(&report.output_path).unwrap();
    assert!(output.contains("\t\t(at 10.46 -20)"));
    assert!(output.contains("\t\t(at 30 -40)"));
}

#[test]
fn test_update_from_dxf_with_channel_remap() {
    let dir = tempfile::tempdir().unwrap();
    let board = stage_board(dir.path());

    let options = PlacementOptions {
        target_radius: Some(1.5),
        remap_file: Some(fixture_path("channel_remap.txt")),
        ..PlacementOptions::default()
    };
    let report = PadPlaceCore::update_from_dxf(
        &fixture_path("electrode_array.dxf"),
        &board,
        ELECTRODE,
        &options,
    )
    .unwrap();

    assert_eq!(report.updated, 3);

    // The remap file swaps channels 1 and 3: the first footprint takes
    // the third circle's coordinates and vice versa.
    let output = fs::read_to_string(&report.output_path).unwrap();
    let first = output.find("(at 50 60)").unwrap();
    let second = output.find("(at 30 40)").unwrap();
    let third = output.find("(at 10.46 20)").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_missing_dxf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let board = stage_board(dir.path());

    let result = PadPlaceCore::update_from_dxf(
        &fixture_path("does_not_exist.dxf"),
        &board,
        ELECTRODE,
        &PlacementOptions::default(),
    );

    assert!(matches!(result, Err(PadPlaceError::Dxf(_))));
}

#[test]
fn test_discover_footprints_sorted_unique() {
    let names = discover_footprints(&fixture_path("sensor_board.kicad_pcb")).unwrap();

    assert_eq!(
        names,
        vec![
            ELECTRODE.to_string(),
            "MountingHole:MountingHole_3.2mm_M3_DIN965_Pad".to_string(),
        ]
    );
}

#[test]
fn test_classify_and_export_labeled_csv() {
    let dir = tempfile::tempdir().unwrap();

    let options = PlacementOptions::default();
    let circles =
        PadPlaceCore::extract_coordinates(&fixture_path("electrode_array.dxf"), &options).unwrap();
    let classes = vec![
        RadiusClass::new("electrode", Some(1.5)),
        RadiusClass::new("mount", Some(3.0)),
    ];
    let labeled = classify_circles(&circles, &classes);
    assert_eq!(labeled.len(), 4);

    let written = export_labeled_csv(dir.path(), &labeled).unwrap();
    assert_eq!(written.len(), 2);

    let electrodes = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(electrodes.lines().count(), 4, "header plus three rows");
    assert!(electrodes.contains("electrode,3,50.0,60.0,1.5"));
}

use std::path::PathBuf;

use wayfinder_lib::{Dataset, DatasetPaths};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_paths() -> DatasetPaths {
    let dir = fixture_dir();
    DatasetPaths {
        nodes: dir.join("nodes.geojson"),
        floorplan: dir.join("floorplan.geojson"),
        boundary: dir.join("boundary.geojson"),
    }
}

pub fn load_fixture_dataset() -> Dataset {
    Dataset::load(&fixture_paths()).expect("fixture dataset loads")
}

use std::fs;
use std::path::{Path, PathBuf};

/// Discover all .hx files in the demos/ directory
pub fn discover_demos() -> Vec<PathBuf> {
    let demos_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    let mut demos: Vec<_> = fs::read_dir(&demos_dir)
        .expect("Failed to read demos directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("hx"))
        .collect();
    demos.sort();
    demos
}

/// Load a .hx file from demos/
pub fn load_demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(format!("{}.hx", name));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load demo {}: {}", name, e))
}

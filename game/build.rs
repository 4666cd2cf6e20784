use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// One arena: the block grid plus its metadata sidecar.
struct MapFiles {
    name: String,
    csv: PathBuf,
    json: PathBuf,
}

fn main() {
    let maps_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../maps");
    println!("cargo:rerun-if-changed={}", maps_dir.display());

    let mut maps = find_maps(&maps_dir);
    maps.sort_by(|a, b| a.name.cmp(&b.name));

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    write_if_changed(&Path::new(&out_dir).join("maps.rs"), &map_table(&maps));
}

fn find_maps(dir: &Path) -> Vec<MapFiles> {
    let Ok(entries) = fs::read_dir(dir) else {
        println!("cargo:warning=no maps directory at {}", dir.display());
        return Vec::new();
    };

    let mut maps = Vec::new();
    for path in entries.flatten().map(|e| e.path()) {
        if path.extension().is_none_or(|e| e != "csv") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let json = path.with_extension("json");
        if !json.exists() {
            println!("cargo:warning=map {name} has no .json sidecar, skipping");
            continue;
        }
        println!("cargo:rerun-if-changed={}", path.display());
        println!("cargo:rerun-if-changed={}", json.display());
        maps.push(MapFiles {
            name: name.to_string(),
            csv: path.clone(),
            json,
        });
    }
    maps
}

/// Rust source for `MAP_DATA`: `(name, csv, json)` with both files inlined.
fn map_table(maps: &[MapFiles]) -> String {
    let mut code = String::from("static MAP_DATA: &[(&str, &str, &str)] = &[\n");
    for map in maps {
        writeln!(
            code,
            "    ({:?}, include_str!({:?}), include_str!({:?})),",
            map.name,
            map.csv.display().to_string(),
            map.json.display().to_string(),
        )
        .expect("writing to a String cannot fail");
    }
    code.push_str("];\n");
    code
}

// Rewriting an identical file would trigger a rebuild of the crate.
fn write_if_changed(dest: &Path, code: &str) {
    if fs::read_to_string(dest).is_ok_and(|existing| existing == code) {
        return;
    }
    fs::write(dest, code).unwrap_or_else(|e| panic!("Failed to write {}: {e}", dest.display()));
}

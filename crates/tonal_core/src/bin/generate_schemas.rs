//! Writes JSON schemas for the serialized types to a directory
//! (default: `schemas/`), one file per type.

use std::fs;
use std::path::PathBuf;

use schemars::{Schema, schema_for};
use tonal_core::{ExplorerState, ExplorerView, InstrumentSet, LayoutRow, ResolvedScale};

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("schemas"));
    fs::create_dir_all(&out_dir)?;

    let schemas: [(&str, Schema); 5] = [
        ("resolved_scale", schema_for!(ResolvedScale)),
        ("layout_row", schema_for!(LayoutRow)),
        ("explorer_state", schema_for!(ExplorerState)),
        ("explorer_view", schema_for!(ExplorerView)),
        ("instruments", schema_for!(InstrumentSet)),
    ];

    for (name, schema) in schemas {
        let path = out_dir.join(format!("{}.json", name));
        let json = serde_json::to_string_pretty(&schema)?;
        fs::write(&path, json)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

//! Map layout loading
//!
//! Maps are four plain-text grids (comma-separated per row), one file per
//! layer: floor blocks, grass, objects and entities. A cell is either the
//! empty sentinel `-1` or an integer code whose meaning depends on the layer.
//! All four layers must have the same shape.

use std::fs;
use std::path::Path;

/// Cell value that marks an empty cell in every layer.
pub const EMPTY_CELL: i32 = -1;

/// One parsed layer: rows of cell codes.
pub type Layout = Vec<Vec<i32>>;

/// Error type for map loading.
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    /// A cell failed to parse as an integer code.
    BadCell { row: usize, col: usize, value: String },
    /// A layer's grid shape disagrees with the others.
    ShapeMismatch { layer: &'static str },
    /// A layer file contained no rows.
    Empty,
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::BadCell { row, col, value } => {
                write!(f, "bad cell at row {}, column {}: {:?}", row, col, value)
            }
            MapError::ShapeMismatch { layer } => {
                write!(f, "layer {:?} does not match the boundary layer shape", layer)
            }
            MapError::Empty => write!(f, "layout has no rows"),
        }
    }
}

impl std::error::Error for MapError {}

/// Parse one layer from comma-separated text. Blank lines are skipped.
pub fn parse_layout(text: &str) -> Result<Layout, MapError> {
    let mut rows = Vec::new();
    for (row_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for (col_index, cell) in line.split(',').enumerate() {
            let code = cell.trim().parse::<i32>().map_err(|_| MapError::BadCell {
                row: row_index,
                col: col_index,
                value: cell.trim().to_string(),
            })?;
            row.push(code);
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(MapError::Empty);
    }
    Ok(rows)
}

/// Load one layer from a file.
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<Layout, MapError> {
    let text = fs::read_to_string(path)?;
    parse_layout(&text)
}

/// The four parallel layers of one map.
#[derive(Debug)]
pub struct MapLayers {
    pub boundary: Layout,
    pub grass: Layout,
    pub objects: Layout,
    pub entities: Layout,
}

impl MapLayers {
    /// Load the standard layer files from a map directory and check that
    /// all four grids agree in shape.
    pub fn load(dir: &Path) -> Result<Self, MapError> {
        let layers = Self {
            boundary: load_layout(dir.join("map_FloorBlocks.csv"))?,
            grass: load_layout(dir.join("map_Grass.csv"))?,
            objects: load_layout(dir.join("map_Objects.csv"))?,
            entities: load_layout(dir.join("map_Entities.csv"))?,
        };
        layers.validate()?;
        Ok(layers)
    }

    /// Build layers from already-parsed grids, checking shapes.
    pub fn from_layouts(
        boundary: Layout,
        grass: Layout,
        objects: Layout,
        entities: Layout,
    ) -> Result<Self, MapError> {
        let layers = Self { boundary, grass, objects, entities };
        layers.validate()?;
        Ok(layers)
    }

    fn validate(&self) -> Result<(), MapError> {
        let shape: Vec<usize> = self.boundary.iter().map(|row| row.len()).collect();
        for (name, layout) in [
            ("grass", &self.grass),
            ("objects", &self.objects),
            ("entities", &self.entities),
        ] {
            let other: Vec<usize> = layout.iter().map(|row| row.len()).collect();
            if other != shape {
                return Err(MapError::ShapeMismatch { layer: name });
            }
        }
        Ok(())
    }
}

use std::fmt;

/// Failure to build a `GameMap` from external map data.
///
/// The simulation itself never fails; this only covers loading.
#[derive(Debug)]
pub enum MapError {
    Csv(csv::Error),
    Json(serde_json::Error),
    Empty,
    Ragged { row: usize, expected: usize, actual: usize },
    DataLength { expected: usize, actual: usize },
    UnknownMap(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "invalid map csv: {e}"),
            Self::Json(e) => write!(f, "invalid map json: {e}"),
            Self::Empty => write!(f, "map has no cells"),
            Self::Ragged {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row} has {actual} cells, expected {expected} like the first row"
            ),
            Self::DataLength { expected, actual } => write!(
                f,
                "tile layer has {actual} entries, expected width*height = {expected}"
            ),
            Self::UnknownMap(name) => write!(f, "no map named {name:?}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for MapError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

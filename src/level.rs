//! Level layouts: grid validation and where levels come from
//!
//! A level is a rectangular grid of starting block healths. Layout files hold
//! one row per line with whitespace-separated non-negative integers; a `0`
//! marks an empty cell.
//!
//! Levels are identified by number. On disk, level `n` is the pair
//! `maps/lvl_NN.txt` and `colors/lvl_NN_color.txt`; only numbers with both
//! files present are offered.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::consts::MAX_GRID_DIMENSION;
use crate::theme::Color;

/// Highest level number probed when scanning a directory
pub const MAX_LEVEL_ID: u32 = 99;

/// Errors produced while loading level data
#[derive(Debug)]
pub enum LevelError {
    /// Grid failed shape, size or value validation
    InvalidLevelData(String),
    /// A layout or color file does not exist
    MissingResource(String),
    /// Color file exists but holds no `#rrggbb` value
    InvalidColor(String),
    /// Standard I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::InvalidLevelData(reason) => write!(f, "invalid level data: {reason}"),
            LevelError::MissingResource(what) => write!(f, "missing resource: {what}"),
            LevelError::InvalidColor(text) => write!(f, "invalid color: {text:?}"),
            LevelError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

fn invalid(reason: impl Into<String>) -> LevelError {
    LevelError::InvalidLevelData(reason.into())
}

/// A validated block-health grid
///
/// Always rectangular, between 1 and 50 rows and columns, with at least one
/// cell holding a live block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    rows: Vec<Vec<u32>>,
}

impl LevelGrid {
    /// Parse a layout file's text
    ///
    /// Blank lines are ignored. Any token that is not an integer rejects the
    /// whole grid.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<i64>().map_err(|_| {
                        invalid(format!("line {}: {token:?} is not an integer", line_no + 1))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Validate raw rows
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, LevelError> {
        let Some(first) = rows.first() else {
            return Err(invalid("grid has no rows"));
        };
        let cols = first.len();

        if cols == 0 {
            return Err(invalid("grid has an empty row"));
        }
        if rows.len() > MAX_GRID_DIMENSION {
            return Err(invalid(format!(
                "{} rows exceeds the limit of {MAX_GRID_DIMENSION}",
                rows.len()
            )));
        }
        if cols > MAX_GRID_DIMENSION {
            return Err(invalid(format!(
                "{cols} columns exceeds the limit of {MAX_GRID_DIMENSION}"
            )));
        }
        if let Some(i) = rows.iter().position(|r| r.len() != cols) {
            return Err(invalid(format!(
                "row {} has {} cells, expected {cols}",
                i + 1,
                rows[i].len()
            )));
        }

        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| {
                        u32::try_from(v)
                            .map_err(|_| invalid(format!("cell value {v} is negative or too large")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        // A grid with nothing to break would count as cleared the moment it loads
        if rows.iter().flatten().all(|&v| v == 0) {
            return Err(invalid("grid contains no blocks"));
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows[0].len()
    }

    /// Every cell as `(row, col, health)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &health)| (r, c, health))
        })
    }
}

/// File stem shared by a level's layout and color files, e.g. `lvl_01`
pub fn level_filename(id: u32) -> String {
    format!("lvl_{id:02}")
}

/// Supplies level layouts and colors by level number
pub trait LevelSource {
    /// Available levels, in play order
    fn level_ids(&self) -> Vec<u32>;

    /// The validated layout for a level
    fn grid(&self, id: u32) -> Result<LevelGrid, LevelError>;

    /// The level's base block color
    fn base_color(&self, id: u32) -> Result<Color, LevelError>;
}

/// Levels held in memory as layout text
#[derive(Debug, Clone, Default)]
pub struct InMemoryLevels {
    levels: BTreeMap<u32, (String, Option<String>)>,
}

impl InMemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a level from layout text and an optional hex color
    pub fn with_level(mut self, id: u32, layout: &str, color: Option<&str>) -> Self {
        self.levels
            .insert(id, (layout.to_string(), color.map(str::to_string)));
        self
    }

    /// Three small built-in levels
    pub fn demo() -> Self {
        Self::new()
            .with_level(1, "1 1 1 1 1\n1 1 1 1 1\n", Some("#00539b"))
            .with_level(2, "2 1 2 1 2\n0 2 0 2 0\n1 1 1 1 1\n", Some("#8b0000"))
            .with_level(3, "3 0 3 0 3\n2 2 2 2 2\n1 1 1 1 1\n1 0 0 0 1\n", None)
    }
}

impl LevelSource for InMemoryLevels {
    fn level_ids(&self) -> Vec<u32> {
        self.levels.keys().copied().collect()
    }

    fn grid(&self, id: u32) -> Result<LevelGrid, LevelError> {
        let (layout, _) = self
            .levels
            .get(&id)
            .ok_or_else(|| LevelError::MissingResource(format!("level {id}")))?;
        LevelGrid::parse(layout)
    }

    fn base_color(&self, id: u32) -> Result<Color, LevelError> {
        let hex = self
            .levels
            .get(&id)
            .and_then(|(_, color)| color.as_deref())
            .ok_or_else(|| LevelError::MissingResource(format!("color for level {id}")))?;
        Color::from_hex(hex).ok_or_else(|| LevelError::InvalidColor(hex.to_string()))
    }
}

/// Levels read from `maps/` and `colors/` under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryLevels {
    root: PathBuf,
}

impl DirectoryLevels {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn map_path(&self, id: u32) -> PathBuf {
        self.root
            .join("maps")
            .join(format!("{}.txt", level_filename(id)))
    }

    fn color_path(&self, id: u32) -> PathBuf {
        self.root
            .join("colors")
            .join(format!("{}_color.txt", level_filename(id)))
    }

    fn read(path: &Path) -> Result<String, LevelError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LevelError::MissingResource(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl LevelSource for DirectoryLevels {
    fn level_ids(&self) -> Vec<u32> {
        (1..=MAX_LEVEL_ID)
            .filter(|&id| self.map_path(id).is_file() && self.color_path(id).is_file())
            .collect()
    }

    fn grid(&self, id: u32) -> Result<LevelGrid, LevelError> {
        LevelGrid::parse(&Self::read(&self.map_path(id))?)
    }

    fn base_color(&self, id: u32) -> Result<Color, LevelError> {
        let text = Self::read(&self.color_path(id))?;
        let hex = text.trim();
        Color::from_hex(hex).ok_or_else(|| LevelError::InvalidColor(hex.to_string()))
    }
}

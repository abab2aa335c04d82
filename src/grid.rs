//! Named layout grid shared by every card in a run.
//!
//! A grid is three lookup tables: anchor points (where glyph pips and indices
//! are centred), and X/Y coordinate tables (used for `IMAGE` pip bounds). All
//! values are pixels, derived once from the card geometry. Lookups return
//! `Option` so a bad name in layout data can be skipped by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A pixel position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Card dimensions expressed as a cell size and a cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardGeometry {
    /// Edge length of one grid cell in pixels.
    pub cell: u32,
    pub columns: u32,
    pub rows: u32,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            cell: 64,
            columns: 4,
            rows: 6,
        }
    }
}

impl CardGeometry {
    /// Largest canvas edge in pixels.
    pub const MAX_EDGE: u32 = 16_384;

    /// `(width, height)` in pixels, or `None` when either edge is zero or
    /// exceeds [`Self::MAX_EDGE`].
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let width = self.cell.checked_mul(self.columns)?;
        let height = self.cell.checked_mul(self.rows)?;
        let edge = 1..=Self::MAX_EDGE;
        (edge.contains(&width) && edge.contains(&height)).then_some((width, height))
    }

    /// Canvas width; callers are expected to hold a geometry that passed
    /// [`Self::dimensions`].
    pub fn width(&self) -> u32 {
        self.cell.saturating_mul(self.columns)
    }

    pub fn height(&self) -> u32 {
        self.cell.saturating_mul(self.rows)
    }
}

/// Built-in point sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPreset {
    /// Corners, edge midpoints and centre: fifteen named anchors.
    #[default]
    Standard,
    /// Standard anchors plus column thirds and row sixths between the pip margins.
    Thirds,
}

/// Declarative grid selection. Overrides are in cell units and win over the
/// preset; X/Y overrides apply before anchors are derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub preset: GridPreset,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub points: BTreeMap<String, [f32; 2]>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub xs: BTreeMap<String, f32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ys: BTreeMap<String, f32>,
}

/// Standard anchors as (name, x column, y row).
const STANDARD_POINTS: &[(&str, &str, &str)] = &[
    ("TOP_LEFT_CORNER", "LEFT_CORNER", "TOP_CORNER"),
    ("TOP_RIGHT_CORNER", "RIGHT_CORNER", "TOP_CORNER"),
    ("TOP_LEFT", "LEFT", "TOP"),
    ("TOP_RIGHT", "RIGHT", "TOP"),
    ("TOP_CENTER", "CENTER", "TOP"),
    ("MID_LEFT_CORNER", "LEFT_CORNER", "MID"),
    ("MID_RIGHT_CORNER", "RIGHT_CORNER", "MID"),
    ("MID_LEFT", "LEFT", "MID"),
    ("MID_RIGHT", "RIGHT", "MID"),
    ("MID_CENTER", "CENTER", "MID"),
    ("BOTTOM_LEFT_CORNER", "LEFT_CORNER", "BOTTOM_CORNER"),
    ("BOTTOM_RIGHT_CORNER", "RIGHT_CORNER", "BOTTOM_CORNER"),
    ("BOTTOM_LEFT", "LEFT", "BOTTOM"),
    ("BOTTOM_RIGHT", "RIGHT", "BOTTOM"),
    ("BOTTOM_CENTER", "CENTER", "BOTTOM"),
];

/// Read-only lookup tables for one card geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGrid {
    geometry: CardGeometry,
    points: BTreeMap<String, Point>,
    xs: BTreeMap<String, f32>,
    ys: BTreeMap<String, f32>,
}

impl LayoutGrid {
    pub fn new(geometry: CardGeometry, config: &GridConfig) -> Self {
        let cell = geometry.cell as f32;
        let half = cell / 2.0;
        let width = geometry.width() as f32;
        let height = geometry.height() as f32;

        let mut xs = BTreeMap::new();
        xs.insert("LEFT_CORNER".to_string(), half);
        xs.insert("LEFT".to_string(), cell);
        xs.insert("CENTER".to_string(), width / 2.0);
        xs.insert("RIGHT".to_string(), width - cell);
        xs.insert("RIGHT_CORNER".to_string(), width - half);

        let mut ys = BTreeMap::new();
        ys.insert("TOP_CORNER".to_string(), half);
        ys.insert("TOP".to_string(), cell + half);
        ys.insert("MID".to_string(), height / 2.0);
        ys.insert("BOTTOM".to_string(), height - cell - half);
        ys.insert("BOTTOM_CORNER".to_string(), height - half);

        for (name, x) in &config.xs {
            xs.insert(name.clone(), x * cell);
        }
        for (name, y) in &config.ys {
            ys.insert(name.clone(), y * cell);
        }

        let mut points = BTreeMap::new();
        if config.preset == GridPreset::Thirds {
            let (left, right) = (xs["LEFT"], xs["RIGHT"]);
            let span_x = right - left;
            xs.entry("LEFT_THIRD".to_string())
                .or_insert(left + span_x / 3.0);
            xs.entry("RIGHT_THIRD".to_string())
                .or_insert(left + span_x * 2.0 / 3.0);

            let (top, bottom) = (ys["TOP"], ys["BOTTOM"]);
            let span_y = bottom - top;
            ys.entry("TOP_SIXTH".to_string())
                .or_insert(top + span_y / 6.0);
            ys.entry("TOP_THIRD".to_string())
                .or_insert(top + span_y / 3.0);
            ys.entry("BOTTOM_THIRD".to_string())
                .or_insert(top + span_y * 2.0 / 3.0);
            ys.entry("BOTTOM_SIXTH".to_string())
                .or_insert(top + span_y * 5.0 / 6.0);

            for (y_name, y) in &ys {
                for (x_name, x) in &xs {
                    points.insert(format!("{y_name}_{x_name}"), Point::new(*x, *y));
                }
            }
        }

        for (name, x_name, y_name) in STANDARD_POINTS {
            points.insert(name.to_string(), Point::new(xs[*x_name], ys[*y_name]));
        }
        for (name, [x, y]) in &config.points {
            points.insert(name.clone(), Point::new(x * cell, y * cell));
        }

        Self {
            geometry,
            points,
            xs,
            ys,
        }
    }

    pub fn geometry(&self) -> CardGeometry {
        self.geometry
    }

    pub fn cell(&self) -> f32 {
        self.geometry.cell as f32
    }

    pub fn position(&self, name: &str) -> Option<Point> {
        self.points.get(name).copied()
    }

    pub fn x(&self, name: &str) -> Option<f32> {
        self.xs.get(name).copied()
    }

    pub fn y(&self, name: &str) -> Option<f32> {
        self.ys.get(name).copied()
    }

    /// Named anchors in name order.
    pub fn points(&self) -> impl Iterator<Item = (&str, Point)> {
        self.points.iter().map(|(name, point)| (name.as_str(), *point))
    }

    pub fn xs(&self) -> impl Iterator<Item = (&str, f32)> {
        self.xs.iter().map(|(name, x)| (name.as_str(), *x))
    }

    pub fn ys(&self) -> impl Iterator<Item = (&str, f32)> {
        self.ys.iter().map(|(name, y)| (name.as_str(), *y))
    }
}

//! ASCII world map with plotted coordinates.
//!
//! The built-in art is an equirectangular projection: 5 degrees of
//! longitude per column from -180 to 180, 9 degrees of latitude per row
//! from 90 down to -90.

use crate::error::MapError;

/// Marker used for points without one of their own.
pub const DEFAULT_MARKER: char = '*';

const WORLD: &[&str] = &[
    "                                                                         ",
    "                ::::::: :::::::::      ::::     ::::::::::               ",
    "    :::::  :::::::::::   ::::::::             ::: :::::::::::::::::::::::",
    "   :::::::::::::::::::::  :::   ::   ::::::::::::::::::::::::::::::::::::",
    "   ::     ::::::::::::::::        :::::::::::::::::::::::::::::::::::    ",
    "           :::::::::::::            :::::::::::::::::::::::::::::        ",
    "            ::::::::::            :::::::::::::::::::::::::::::::        ",
    "             ::::   :            ::::::::::::::::::::::::::::            ",
    "               :::: ::::         ::::::::::::::   :::: :::: ::           ",
    "                   ::::::        ::::::::::::::    ::   ::  ::           ",
    "                    :::::::           :::::::           :::::            ",
    "                    ::::::::::         ::::::             :::::::::      ",
    "                      :::::::         :::::: ::             ::::::       ",
    "                      :::::            :::::               :::::::::     ",
    "                      ::::                                     ::::    ::",
    "                     :::                                             ::  ",
    "                      ::                                                 ",
    "                       :::                                               ",
    ":::::::::::::::::   :::::::::::::::::::::::::::::::::::::::::::::::::::::",
    ":::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::",
    ":::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::::",
];

/// A coordinate to plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub marker: char,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            marker: DEFAULT_MARKER,
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WorldMap {
    rows: Vec<Vec<char>>,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldMap {
    pub fn new() -> Self {
        Self {
            rows: WORLD.iter().map(|row| row.chars().collect()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell `(row, column)` a coordinate falls into.
    pub fn position(&self, latitude: f64, longitude: f64) -> Result<(usize, usize), MapError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(MapError::OutOfRange {
                latitude,
                longitude,
            });
        }

        let last_col = (self.width() - 1) as f64;
        let last_row = (self.height() - 1) as f64;
        let col = ((longitude + 180.0) / 360.0 * last_col).round() as usize;
        let row = ((90.0 - latitude) / 180.0 * last_row).round() as usize;
        Ok((row, col))
    }

    /// Render the map with every point marked.
    ///
    /// Later points overwrite earlier ones that land in the same cell. No
    /// output is produced if any point is out of range.
    pub fn render(&self, points: &[Point]) -> Result<String, MapError> {
        let mut rows = self.rows.clone();
        for point in points {
            let (row, col) = self.position(point.latitude, point.longitude)?;
            rows[row][col] = point.marker;
        }

        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        Ok(out)
    }
}

//! Solver space to drawing space mapping and cluster colors.

use hs_core::{Coordinates, SimulationResult};

/// A point on a top-left origin drawing surface (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPoint {
    pub x: f64,
    pub y: f64,
}

impl DrawPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Flips the y axis so solver coordinates can be drawn top-down on a square
/// surface of side `grid_size`. No clipping is applied.
pub fn to_drawing_space(point: Coordinates, grid_size: f64) -> DrawPoint {
    DrawPoint::new(point.x, grid_size - point.y)
}

/// Inverse of [`to_drawing_space`].
pub fn from_drawing_space(point: DrawPoint, grid_size: f64) -> Coordinates {
    Coordinates::new(point.x, grid_size - point.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Cluster palette. Clusters past the end wrap around, so two clusters share
/// a color once k exceeds the palette length.
pub const PALETTE: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

pub fn cluster_color(cluster: usize) -> Rgb {
    PALETTE[cluster % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: usize,
    pub cluster: usize,
    pub position: DrawPoint,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub hospital_id: usize,
    pub color: Rgb,
    pub neighborhoods: usize,
}

/// Everything the plot tab draws, already in drawing space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    pub side: f64,
    pub neighborhoods: Vec<Marker>,
    pub hospitals: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
}

impl PlotScene {
    pub fn build(result: &SimulationResult) -> Self {
        let side = result.side();

        let neighborhoods = result
            .neighborhoods
            .iter()
            .map(|n| Marker {
                id: n.id,
                cluster: n.cluster,
                position: to_drawing_space(n.position(), side),
                color: cluster_color(n.cluster),
            })
            .collect();

        let hospitals = result
            .hospitals
            .iter()
            .map(|h| Marker {
                id: h.id,
                cluster: h.id,
                position: to_drawing_space(h.position(), side),
                color: cluster_color(h.id),
            })
            .collect();

        let legend = result
            .hospitals
            .iter()
            .map(|h| LegendEntry {
                hospital_id: h.id,
                color: cluster_color(h.id),
                neighborhoods: result
                    .neighborhoods
                    .iter()
                    .filter(|n| n.cluster == h.id)
                    .count(),
            })
            .collect();

        Self {
            side,
            neighborhoods,
            hospitals,
            legend,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty() && self.hospitals.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mapping_is_pure(x in 0.0f64..1000.0, y in 0.0f64..1000.0, side in 1u32..1000) {
            let side = f64::from(side);
            let p = Coordinates::new(x, y);
            prop_assert_eq!(to_drawing_space(p, side), to_drawing_space(p, side));
        }

        #[test]
        fn round_trip_recovers_integer_coordinates(x in 0u32..1000, y in 0u32..1000, side in 1000u32..2000) {
            let side = f64::from(side);
            let p = Coordinates::new(f64::from(x), f64::from(y));
            prop_assert_eq!(from_drawing_space(to_drawing_space(p, side), side), p);
        }

        #[test]
        fn draw_y_stays_on_surface(y in 0.0f64..=100.0) {
            let d = to_drawing_space(Coordinates::new(0.0, y), 100.0);
            prop_assert!((0.0..=100.0).contains(&d.y));
        }
    }
}

//! Country outlines for the world map.
//!
//! A low-resolution world boundary set (Natural Earth 1:110m derived, public
//! domain) is compiled into the binary. Shapes are keyed like the gazetteer, so
//! every spelling it accepts finds the same outline, and each polygon is
//! triangulated once for filling.

use crate::charts::geo::Gazetteer;
use geojson::{FeatureCollection, PolygonType, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

const WORLD_GEOJSON: &str = include_str!("../../assets/countries.geojson");

/// Closed ring of `[longitude, latitude]` points.
pub type Ring = Vec<[f64; 2]>;

pub type Triangle = [[f64; 2]; 3];

/// One country's outline, ready to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryShape {
    /// Exterior rings, one per landmass
    pub rings: Vec<Ring>,
    /// Fill triangles with holes already cut out
    pub triangles: Vec<Triangle>,
}

impl CountryShape {
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        self.triangles
            .iter()
            .any(|triangle| in_triangle(triangle, [longitude, latitude]))
    }

    fn add_polygon(&mut self, polygon: &PolygonType) -> Result<(), earcutr::Error> {
        let rings: Vec<Ring> = polygon
            .iter()
            .map(|ring| {
                ring.iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| [position[0], position[1]])
                    .collect()
            })
            .collect();
        let Some(exterior) = rings.first() else {
            return Ok(());
        };

        let mut vertices: Vec<f64> = Vec::new();
        let mut holes = Vec::new();
        for (i, ring) in rings.iter().enumerate() {
            if i > 0 {
                holes.push(vertices.len() / 2);
            }
            // GeoJSON repeats the first point at the end of each ring
            let open = match ring.split_last() {
                Some((last, rest)) if rest.first() == Some(last) => rest,
                _ => &ring[..],
            };
            vertices.extend(open.iter().flatten());
        }

        let indices = earcutr::earcut(&vertices, &holes, 2)?;
        let point = |i: usize| [vertices[2 * i], vertices[2 * i + 1]];
        self.triangles.extend(
            indices
                .chunks_exact(3)
                .map(|t| [point(t[0]), point(t[1]), point(t[2])]),
        );
        self.rings.push(exterior.clone());
        Ok(())
    }
}

/// Country outlines keyed by gazetteer name.
pub struct WorldOutlines {
    shapes: HashMap<String, CountryShape>,
}

impl WorldOutlines {
    /// Shared instance built from the embedded boundary set.
    ///
    /// A broken boundary set only costs the outlines: the map then falls back
    /// to centroid markers.
    pub fn builtin() -> &'static WorldOutlines {
        static OUTLINES: OnceLock<WorldOutlines> = OnceLock::new();
        OUTLINES.get_or_init(|| {
            Self::from_geojson(WORLD_GEOJSON, Gazetteer::builtin()).unwrap_or_else(|err| {
                warn!("World outlines unavailable: {}", err);
                Self {
                    shapes: HashMap::new(),
                }
            })
        })
    }

    pub fn from_geojson(text: &str, gazetteer: &Gazetteer) -> Result<Self, geojson::Error> {
        let collection: FeatureCollection = text.parse()?;
        let mut shapes: HashMap<String, CountryShape> = HashMap::new();

        for feature in &collection.features {
            let Some(name) = feature.property("name").and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            let polygons: Vec<&PolygonType> = match &geometry.value {
                Value::Polygon(polygon) => vec![polygon],
                Value::MultiPolygon(polygons) => polygons.iter().collect(),
                _ => continue,
            };

            let shape = shapes.entry(gazetteer.key(name)).or_default();
            for polygon in polygons {
                if let Err(err) = shape.add_polygon(polygon) {
                    debug!("Skipping part of {} outline: {}", name, err);
                }
            }
        }

        debug!("Loaded {} country outlines", shapes.len());
        Ok(Self { shapes })
    }

    pub fn shape(&self, country: &str) -> Option<&CountryShape> {
        self.shapes.get(&Gazetteer::builtin().key(country))
    }
}

fn in_triangle(&[a, b, c]: &Triangle, p: [f64; 2]) -> bool {
    let side = |o: [f64; 2], u: [f64; 2]| {
        (u[0] - o[0]) * (p[1] - o[1]) - (u[1] - o[1]) * (p[0] - o[0])
    };
    let (d1, d2, d3) = (side(a, b), side(b, c), side(c, a));
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

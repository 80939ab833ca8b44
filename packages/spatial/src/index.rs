//! R-tree county index and ray-casting containment.
//!
//! Counties tile the US without overlap, so the first boundary whose
//! precise test accepts the point is the answer. The R-tree envelope probe
//! is only a pre-filter: an envelope covers its whole polygon, so it can
//! never reject a point the precise test would accept.

use geo::{BoundingRect, LineString, MultiPolygon, Polygon};
use gridscout_geography_models::{CountyInfo, GeoPoint, fips};
use rstar::{AABB, RTree, RTreeObject};

use crate::dataset::CountyBoundary;

/// A county boundary stored in the R-tree with its precomputed envelope.
struct CountyEntry {
    boundary: CountyBoundary,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CountyEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Immutable point-in-polygon index over the county boundary dataset.
///
/// Built once at startup and shared read-only for the process lifetime.
pub struct CountyIndex {
    counties: RTree<CountyEntry>,
}

impl CountyIndex {
    /// Builds the index from parsed county boundaries.
    #[must_use]
    pub fn build(boundaries: Vec<CountyBoundary>) -> Self {
        let entries = boundaries
            .into_iter()
            .map(|boundary| {
                let envelope = compute_envelope(&boundary.geometry);
                CountyEntry { boundary, envelope }
            })
            .collect();

        let counties = RTree::bulk_load(entries);
        log::info!("Built county index over {} boundaries", counties.size());

        Self { counties }
    }

    /// Number of county boundaries in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counties.size()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counties.size() == 0
    }

    /// Resolves a point to its containing county.
    ///
    /// Returns `None` when no county contains the point: a typed absence,
    /// not an error. A point on a county boundary vertex counts as
    /// contained; which of two adjacent counties claims a shared border
    /// point is unspecified.
    #[must_use]
    pub fn resolve(&self, point: &GeoPoint) -> Option<CountyInfo> {
        let x = point.longitude();
        let y = point.latitude();
        let query_env = AABB::from_point([x, y]);

        for entry in self.counties.locate_in_envelope_intersecting(&query_env) {
            if multi_polygon_contains(x, y, &entry.boundary.geometry) {
                return Some(CountyInfo {
                    state: fips::state_name(&entry.boundary.state_fips).to_string(),
                    state_abbr: fips::state_abbr(&entry.boundary.state_fips).to_string(),
                    county: entry.boundary.name.clone(),
                    county_type: "County".to_string(),
                    geoid: Some(entry.boundary.geoid.clone()),
                });
            }
        }

        None
    }
}

/// Computes the bounding-box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

/// Whether any constituent polygon contains the point. First match wins.
pub(crate) fn multi_polygon_contains(x: f64, y: f64, mp: &MultiPolygon<f64>) -> bool {
    mp.0.iter().any(|polygon| polygon_contains(x, y, polygon))
}

/// Ray-casting containment for one polygon, holes included.
///
/// Parity is accumulated across the exterior and every interior ring: a
/// point inside a hole crosses both rings' edges and lands outside. A point
/// coinciding with any ring vertex counts as contained.
fn polygon_contains(x: f64, y: f64, polygon: &Polygon<f64>) -> bool {
    let mut inside = false;

    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors().iter()) {
        // Closed rings repeat the first coordinate, so < 4 means fewer than
        // three distinct vertices.
        if ring.0.len() < 4 {
            continue;
        }

        match cast_ray(x, y, ring) {
            RingTest::OnVertex => return true,
            RingTest::Parity(crossed) => {
                if crossed {
                    inside = !inside;
                }
            }
        }
    }

    inside
}

enum RingTest {
    /// The query point coincides with a ring vertex.
    OnVertex,
    /// Whether the horizontal ray crossed this ring an odd number of times.
    Parity(bool),
}

/// Casts a horizontal ray from the point through one ring.
#[allow(clippy::float_cmp)] // vertex coincidence is an exact-equality check
fn cast_ray(x: f64, y: f64, ring: &LineString<f64>) -> RingTest {
    let coords = &ring.0;
    let mut inside = false;

    let mut j = coords.len() - 1;
    for i in 0..coords.len() {
        let (xi, yi) = (coords[i].x, coords[i].y);
        let (xj, yj) = (coords[j].x, coords[j].y);

        if (yi == y && xi == x) || (yj == y && xj == x) {
            return RingTest::OnVertex;
        }

        if ((yi > y) != (yj > y)) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }

        j = i;
    }

    RingTest::Parity(inside)
}

//! Provider result merging.
//!
//! Combined results are re-sorted by a stable priority rule: landmark-typed
//! results before non-landmark, and among landmarks the Google result is
//! preferred over the Mapbox one. Everything else keeps its arrival order
//! (Mapbox results first, then Google), so merges are reproducible.

use std::cmp::Ordering;

use gridscout_geocoder::{GeocodeError, PlaceCandidate, PlaceSource};

/// Category tags that mark a result as a landmark.
pub const LANDMARK_TYPES: &[&str] = &[
    "tourist_attraction",
    "landmark",
    "point_of_interest",
    "establishment",
];

/// Maximum merged suggestions shown to the user.
pub const MAX_SUGGESTIONS: usize = 5;

/// Whether a candidate carries a landmark category tag.
#[must_use]
pub fn is_landmark(candidate: &PlaceCandidate) -> bool {
    candidate
        .types
        .iter()
        .any(|t| LANDMARK_TYPES.contains(&t.as_str()))
}

/// Merges both providers' outcomes, allowing partial success.
///
/// A failed provider contributes nothing but never discards the other
/// provider's results.
#[must_use]
pub fn merge_candidates(
    mapbox: Result<Vec<PlaceCandidate>, GeocodeError>,
    google: Result<Vec<PlaceCandidate>, GeocodeError>,
) -> Vec<PlaceCandidate> {
    let mut combined = Vec::new();

    match mapbox {
        Ok(results) => combined.extend(results),
        Err(e) => log::warn!("Mapbox search failed: {e}"),
    }

    match google {
        Ok(results) => combined.extend(results),
        Err(e) => log::warn!("Google Places search failed: {e}"),
    }

    combined.sort_by(compare_priority);
    combined.truncate(MAX_SUGGESTIONS);
    combined
}

/// Landmark-priority comparator. Equal-priority pairs compare `Equal`, so
/// the (stable) sort preserves their arrival order.
fn compare_priority(a: &PlaceCandidate, b: &PlaceCandidate) -> Ordering {
    let a_is_landmark = is_landmark(a);
    let b_is_landmark = is_landmark(b);

    if a_is_landmark && !b_is_landmark {
        return Ordering::Less;
    }
    if !a_is_landmark && b_is_landmark {
        return Ordering::Greater;
    }

    if a_is_landmark && b_is_landmark {
        if a.source == PlaceSource::Google && b.source == PlaceSource::Mapbox {
            return Ordering::Less;
        }
        if a.source == PlaceSource::Mapbox && b.source == PlaceSource::Google {
            return Ordering::Greater;
        }
    }

    Ordering::Equal
}

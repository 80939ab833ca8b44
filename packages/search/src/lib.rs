#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location search across both place providers.
//!
//! Providers are queried concurrently and combined settle-all: one
//! provider failing (or missing its credential) never discards the other's
//! results. The merged list is re-sorted by a stable landmark-priority rule
//! and capped, so identical inputs always produce identical suggestions.
//!
//! [`SearchSession`] adds the interactive input guard: a debounce window
//! must elapse after the last input before a fetch fires, and a stale
//! in-flight fetch's results are discarded on arrival.

pub mod debounce;
pub mod merge;

use std::time::Duration;

use gridscout_geocoder::service_registry::{self, ProviderConfig};
use gridscout_geocoder::{GeocodeError, PlaceCandidate, credential_from_env, mapbox, places};

pub use debounce::Debouncer;

/// How long input must stay quiet before a search fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Searches both providers and merges their results.
///
/// A blank query is a no-op. Provider failures are logged and degrade to
/// partial (possibly empty) results rather than erroring.
pub async fn search_places(client: &reqwest::Client, query: &str) -> Vec<PlaceCandidate> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let (mapbox_results, google_results) =
        futures::join!(mapbox_search(client, query), google_search(client, query));

    merge::merge_candidates(mapbox_results, google_results)
}

async fn mapbox_search(
    client: &reqwest::Client,
    query: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let Some(service) = service_registry::mapbox_service() else {
        return Ok(Vec::new());
    };
    let ProviderConfig::Mapbox {
        geocoding_url,
        country,
        bbox,
        limit,
        token_env,
        ..
    } = service.provider
    else {
        return Ok(Vec::new());
    };

    let token = credential_from_env(&token_env)?;
    mapbox::forward_geocode(client, &geocoding_url, &token, &country, bbox, limit, query).await
}

async fn google_search(
    client: &reqwest::Client,
    query: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let Some(service) = service_registry::google_places_service() else {
        return Ok(Vec::new());
    };
    let ProviderConfig::GooglePlaces {
        base_url,
        location_bias,
        key_env,
    } = service.provider
    else {
        return Ok(Vec::new());
    };

    let key = credential_from_env(&key_env)?;
    places::text_search(client, &base_url, &key, &location_bias, query).await
}

/// An interactive search session with debounce and stale-result discard.
///
/// Each keystroke calls [`SearchSession::query`]; only the call belonging
/// to the latest input ever returns suggestions. Earlier calls resolve to
/// `None`, either because a newer input arrived during the debounce window
/// or because their fetch came back after being superseded.
#[derive(Clone)]
pub struct SearchSession {
    client: reqwest::Client,
    debouncer: Debouncer,
}

impl SearchSession {
    /// Creates a session with the standard debounce window.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_window(client, DEBOUNCE_WINDOW)
    }

    /// Creates a session with a custom debounce window.
    #[must_use]
    pub fn with_window(client: reqwest::Client, window: Duration) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(window),
        }
    }

    /// Debounces, fetches, and returns suggestions for the latest input.
    ///
    /// Returns `None` if this input was superseded, either during the
    /// debounce window or while its fetch was in flight.
    pub async fn query(&self, text: &str) -> Option<Vec<PlaceCandidate>> {
        let generation = self.debouncer.settle().await?;

        let results = search_places(&self.client, text).await;

        // A newer input may have arrived while the fetch was in flight;
        // its session owns the suggestion list now.
        if !self.debouncer.is_current(generation) {
            return None;
        }

        Some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Blank queries resolve before any provider is contacted, so these
    // tests never touch the network.

    #[tokio::test]
    async fn blank_query_is_a_no_op() {
        let client = reqwest::Client::new();
        assert!(search_places(&client, "   ").await.is_empty());
    }

    #[tokio::test]
    async fn undisturbed_session_query_fires() {
        let session =
            SearchSession::with_window(reqwest::Client::new(), Duration::from_millis(5));
        assert_eq!(session.query(" ").await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn superseded_session_query_is_discarded() {
        let session =
            SearchSession::with_window(reqwest::Client::new(), Duration::from_millis(30));

        let earlier = {
            let session = session.clone();
            tokio::spawn(async move { session.query(" ").await })
        };

        // A newer keystroke arrives mid-window.
        tokio::time::sleep(Duration::from_millis(5)).await;
        let later = session.query(" ").await;

        assert!(earlier.await.unwrap().is_none());
        assert_eq!(later, Some(Vec::new()));
    }
}

//! Facility locator: geocode an anchor, query the facility directory
//! inside a bounding box, then distance-filter, sort, and truncate.

use crate::config;
use crate::models::{BoundingBox, Facility, FacilitySearch, GeoPoint};
use crate::services::{NominatimClient, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// Geocoding failed — "place not found" and "service unavailable"
    /// collapse into this single caller-facing case.
    #[error("could not determine location for '{0}'")]
    LocationUnresolved(String),
    #[error("facility directory lookup failed")]
    DirectoryUnavailable(#[source] ServiceError),
}

/// Great-circle distance between two coordinates in km (haversine,
/// R = 6371 km). Inputs in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    config::EARTH_RADIUS_KM * c
}

pub struct FacilityLocator {
    directory: NominatimClient,
}

impl FacilityLocator {
    pub fn new(directory: NominatimClient) -> Self {
        Self { directory }
    }

    /// Resolve a place name, then find nearby facilities.
    pub async fn locate_by_name(
        &self,
        place: &str,
        name_filter: Option<&str>,
    ) -> Result<FacilitySearch, LocatorError> {
        let anchor = self.directory.geocode(place).await.map_err(|err| {
            tracing::warn!(%err, place, "geocoding failed");
            LocatorError::LocationUnresolved(place.to_string())
        })?;
        self.locate_near(anchor, name_filter).await
    }

    /// Find facilities near an already-resolved coordinate (e.g. from
    /// device geolocation).
    pub async fn locate_near(
        &self,
        anchor: GeoPoint,
        name_filter: Option<&str>,
    ) -> Result<FacilitySearch, LocatorError> {
        let bbox = BoundingBox::around(
            anchor.latitude,
            anchor.longitude,
            config::SEARCH_BOX_HALF_WIDTH_DEG,
        );
        let records = self
            .directory
            .facilities_in_box(&bbox, config::DIRECTORY_RESULT_LIMIT)
            .await
            .map_err(LocatorError::DirectoryUnavailable)?;

        tracing::debug!(
            count = records.len(),
            anchor = %anchor.display_name,
            "facility directory returned"
        );
        Ok(shortlist(records, anchor, name_filter))
    }
}

/// Distance-filter, sort, truncate, and apply the optional display-name
/// filter, attaching advisory notes where the list needs explaining.
pub fn shortlist(
    records: Vec<GeoPoint>,
    anchor: GeoPoint,
    name_filter: Option<&str>,
) -> FacilitySearch {
    let mut facilities: Vec<Facility> = records
        .into_iter()
        .map(|r| {
            let distance_km =
                haversine_km(anchor.latitude, anchor.longitude, r.latitude, r.longitude);
            Facility {
                display_name: r.display_name,
                latitude: r.latitude,
                longitude: r.longitude,
                distance_km,
            }
        })
        .filter(|f| f.distance_km <= config::FACILITY_RADIUS_KM)
        .collect();

    facilities.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    facilities.truncate(config::MAX_FACILITIES);

    let mut advisory = None;

    if let Some(filter) = name_filter {
        let needle = filter.to_lowercase();
        let narrowed: Vec<Facility> = facilities
            .iter()
            .filter(|f| f.display_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if narrowed.is_empty() && !facilities.is_empty() {
            // Keep the unfiltered radius-limited set rather than
            // rendering nothing without explanation.
            advisory = Some(format!(
                "No facility matched '{filter}'; showing all within range instead."
            ));
        } else {
            facilities = narrowed;
        }
    }

    if facilities.is_empty() {
        advisory = Some(format!(
            "Sorry, I couldn't find any hospitals within {:.0} km of {}.",
            config::FACILITY_RADIUS_KM,
            anchor.display_name
        ));
    }

    FacilitySearch {
        anchor,
        facilities,
        advisory,
    }
}

use serde::{Deserialize, Serialize};

/// A geocoded place: coordinates plus the canonical display name
/// the geocoder resolved the query to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// A medical facility with its computed distance from the anchor point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl Facility {
    /// Split the directory's comma-joined display name into a facility
    /// name and a short (two-part) address.
    pub fn name_and_short_address(&self) -> (&str, String) {
        let mut parts = self.display_name.splitn(2, ',');
        let name = parts.next().unwrap_or(&self.display_name).trim();
        let short_address = parts
            .next()
            .map(|rest| {
                rest.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .take(2)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        (name, short_address)
    }

    /// Link to the facility's coordinates on Google Maps.
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

/// Result of one facility lookup: the resolved anchor, the shortlisted
/// facilities, and an advisory note when the list needs explaining
/// (empty within range, or a name filter that matched nothing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitySearch {
    pub anchor: GeoPoint,
    pub facilities: Vec<Facility>,
    pub advisory: Option<String>,
}

/// Axis-aligned search box around an anchor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Box of `half_width_deg` in each direction around the anchor.
    pub fn around(latitude: f64, longitude: f64, half_width_deg: f64) -> Self {
        Self {
            left: longitude - half_width_deg,
            top: latitude + half_width_deg,
            right: longitude + half_width_deg,
            bottom: latitude - half_width_deg,
        }
    }

    /// Nominatim `viewbox` parameter: `left,top,right,bottom`.
    pub fn viewbox_param(&self) -> String {
        format!("{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

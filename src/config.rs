/// Application-level constants
pub const APP_NAME: &str = "Carewise";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "carewise=info"
}

// ── External service endpoints ──────────────────────────────

/// Public Nominatim instance (geocoding + facility directory).
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// OpenFDA drug-label API.
pub const OPENFDA_BASE_URL: &str = "https://api.fda.gov";

/// Google translate side-channel (unofficial gtx endpoint).
pub const TRANSLATE_BASE_URL: &str = "https://translate.googleapis.com";

// ── Facility search tuning ──────────────────────────────────

/// Nominatim amenity tag used for the facility-directory query.
pub const FACILITY_CATEGORY: &str = "hospital";

/// Half-width of the search bounding box, in degrees.
pub const SEARCH_BOX_HALF_WIDTH_DEG: f64 = 0.1;

/// Result-count bound sent to the facility directory.
pub const DIRECTORY_RESULT_LIMIT: u32 = 10;

/// Facilities farther than this are dropped.
pub const FACILITY_RADIUS_KM: f64 = 10.0;

/// At most this many facilities are shown.
pub const MAX_FACILITIES: usize = 5;

/// Earth's mean radius in km, for haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ── Analysis ────────────────────────────────────────────────

/// Knowledge-base key used when no symptom matches the input.
pub const DEFAULT_SYMPTOM_KEY: &str = "fever";

/// Language tag assumed when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "en";

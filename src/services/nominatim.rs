use serde::Deserialize;

use crate::config;
use crate::models::{BoundingBox, GeoPoint};

use super::ServiceError;

/// Client for the Nominatim search API, used both to geocode free-text
/// place names and as the facility directory (bounded amenity search).
pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
}

/// One place in a Nominatim jsonv2 response. Coordinates arrive as
/// strings and are parsed on conversion.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimPlace {
    fn into_geo_point(self) -> Result<GeoPoint, ServiceError> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|e| ServiceError::ResponseParsing(format!("bad latitude: {e}")))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|e| ServiceError::ResponseParsing(format!("bad longitude: {e}")))?;
        Ok(GeoPoint {
            latitude,
            longitude,
            display_name: self.display_name,
        })
    }
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Client against the public OpenStreetMap instance.
    pub fn public() -> Self {
        Self::new(config::NOMINATIM_BASE_URL)
    }

    /// Resolve a free-text place name to coordinates and a canonical
    /// display name. `NotFound` and transport/status errors are the two
    /// distinguished failure cases.
    pub async fn geocode(&self, place: &str) -> Result<GeoPoint, ServiceError> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<NominatimPlace> = self
            .get_json(
                &url,
                &[("q", place), ("format", "jsonv2"), ("limit", "1")],
            )
            .await?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(place.to_string()))?
            .into_geo_point()
    }

    /// Facilities of the fixed category inside the bounding box,
    /// up to `limit` results.
    pub async fn facilities_in_box(
        &self,
        bbox: &BoundingBox,
        limit: u32,
    ) -> Result<Vec<GeoPoint>, ServiceError> {
        let url = format!("{}/search", self.base_url);
        let viewbox = bbox.viewbox_param();
        let limit = limit.to_string();
        let places: Vec<NominatimPlace> = self
            .get_json(
                &url,
                &[
                    ("format", "jsonv2"),
                    ("amenity", config::FACILITY_CATEGORY),
                    ("limit", limit.as_str()),
                    ("addressdetails", "1"),
                    ("bounded", "1"),
                    ("viewbox", viewbox.as_str()),
                ],
            )
            .await?;

        places
            .into_iter()
            .map(NominatimPlace::into_geo_point)
            .collect()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, &self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::ResponseParsing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn place_json(lat: &str, lon: &str, name: &str) -> serde_json::Value {
        serde_json::json!({ "lat": lat, "lon": lon, "display_name": name })
    }

    #[tokio::test]
    async fn geocode_parses_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Springfield"))
            .and(query_param("format", "jsonv2"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                place_json("39.7990", "-89.6440", "Springfield, Illinois, USA"),
            ])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(&server.uri());
        let point = client.geocode("Springfield").await.unwrap();
        assert!((point.latitude - 39.7990).abs() < 1e-9);
        assert!((point.longitude + 89.6440).abs() < 1e-9);
        assert_eq!(point.display_name, "Springfield, Illinois, USA");
    }

    #[tokio::test]
    async fn geocode_empty_response_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(&server.uri());
        let err = client.geocode("Nowhereville").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(place) if place == "Nowhereville"));
    }

    #[tokio::test]
    async fn geocode_service_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = NominatimClient::new(&server.uri());
        let err = client.geocode("Springfield").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn facilities_query_is_bounded_to_the_viewbox() {
        let server = MockServer::start().await;
        let bbox = BoundingBox::around(40.0, -75.0, 0.1);
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("amenity", "hospital"))
            .and(query_param("bounded", "1"))
            .and(query_param("viewbox", "-75.1,40.1,-74.9,39.9"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                place_json("40.01", "-75.02", "General Hospital, 1 Elm St, Springfield"),
                place_json("40.05", "-75.01", "Mercy Clinic, 9 Oak Ave, Springfield"),
            ])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(&server.uri());
        let facilities = client.facilities_in_box(&bbox, 10).await.unwrap();
        assert_eq!(facilities.len(), 2);
        assert_eq!(
            facilities[0].display_name,
            "General Hospital, 1 Elm St, Springfield"
        );
    }

    #[tokio::test]
    async fn bad_coordinate_strings_are_parse_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                place_json("not-a-number", "0", "Broken"),
            ])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(&server.uri());
        let err = client.geocode("Broken").await.unwrap_err();
        assert!(matches!(err, ServiceError::ResponseParsing(_)));
    }
}

//! Router tests driving the axum app in-process

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use localcast::config::ServerConfig;
use localcast::providers::{
    GeocodeClient, PlacesClient, ProviderError, TranslationClient, WeatherClient,
};
use localcast::{
    Coordinate, LocalizedResponse, PlaceName, Providers, RawListing, ResponseComposer,
    SearchSettings, WeatherSnapshot, web,
};
use tower::ServiceExt;

struct Echo;

#[async_trait]
impl TranslationClient for Echo {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }
}

struct FixedPlace;

#[async_trait]
impl GeocodeClient for FixedPlace {
    async fn resolve(&self, _coordinate: Coordinate) -> Result<PlaceName, ProviderError> {
        Ok(PlaceName::new("Seoul", "Gangnam-gu"))
    }
}

struct FixedWeather(Option<WeatherSnapshot>);

#[async_trait]
impl WeatherClient for FixedWeather {
    async fn current_conditions(&self, _coordinate: Coordinate) -> Result<WeatherSnapshot, ProviderError> {
        self.0
            .clone()
            .ok_or_else(|| ProviderError::Weather("provider returned 503".to_string()))
    }
}

struct OneListing;

#[async_trait]
impl PlacesClient for OneListing {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<RawListing>, ProviderError> {
        Ok(vec![RawListing {
            name: "Myeongdong Kyoja".to_string(),
            address: "Seoul Gangnam-gu 1".to_string(),
            link: "https://example.com/kyoja".to_string(),
        }])
    }
}

fn app(weather: Option<WeatherSnapshot>) -> axum::Router {
    let providers = Providers {
        translator: Arc::new(Echo),
        geocoder: Arc::new(FixedPlace),
        weather: Arc::new(FixedWeather(weather)),
        places: Arc::new(OneListing),
    };
    let composer = Arc::new(ResponseComposer::new(providers, SearchSettings::default()));
    web::router(composer, &ServerConfig::default())
}

fn cloudy() -> Option<WeatherSnapshot> {
    Some(WeatherSnapshot::new(21.5, "Cloudy"))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_success_returns_message_and_places() {
    let (status, body) = get(
        app(cloudy()),
        "/get_weather_and_places?lat=37.49&lon=127.03&target_lang=EN",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: LocalizedResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        response.message,
        "The current temperature in Seoul, Gangnam-gu is 21.5°C, and the weather is Cloudy."
    );
    assert_eq!(response.places.len(), 1);
    assert_eq!(response.places[0].link, "https://example.com/kyoja");
}

#[tokio::test]
async fn test_missing_lat_is_bad_request() {
    let (status, body) = get(app(cloudy()), "/get_weather_and_places?lon=127.03").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "위치 정보가 없습니다.");
}

#[tokio::test]
async fn test_missing_location_message_is_localized() {
    let (status, body) = get(app(cloudy()), "/get_weather_and_places?target_lang=EN").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Location information is missing.");
}

#[tokio::test]
async fn test_unparseable_coordinate_is_bad_request() {
    let (status, _) = get(app(cloudy()), "/get_weather_and_places?lat=north&lon=127.03").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_failure_is_bad_request() {
    let (status, body) = get(
        app(None),
        "/get_weather_and_places?lat=37.49&lon=127.03&target_lang=EN",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to retrieve weather information.");
    assert!(body.get("places").is_none());
}

#[tokio::test]
async fn test_repeated_parameters_use_first_value() {
    let (status, body) = get(
        app(cloudy()),
        "/get_weather_and_places?lat=1&lat=2&lon=3&target_lang=EN&target_lang=JA",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("The current temperature"));
    assert!(body["places"].is_array());
}

#[tokio::test]
async fn test_malformed_query_still_returns_json() {
    let (status, body) = get(
        app(cloudy()),
        "/get_weather_and_places?lat=%E0%A4%A&lon=3&target_lang=EN",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Location information is missing.");
}

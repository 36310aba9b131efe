//! Compose pipeline tests against in-process provider doubles

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use localcast::providers::{
    GeocodeClient, PlacesClient, ProviderError, TranslationClient, WeatherClient,
};
use localcast::{
    ComposeError, ComposeRequest, Coordinate, PlaceName, Providers, RawListing, ResponseComposer,
    SearchSettings, WeatherSnapshot,
};

type TranslateFn = Box<dyn Fn(&str, &str) -> Result<String, ProviderError> + Send + Sync>;

struct FakeTranslator {
    behavior: TranslateFn,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeTranslator {
    fn new(behavior: impl Fn(&str, &str) -> Result<String, ProviderError> + Send + Sync + 'static) -> Self {
        Self {
            behavior: Box::new(behavior),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn identity() -> Self {
        Self::new(|text, _| Ok(text.to_string()))
    }

    fn texts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationClient for FakeTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_lang.to_string()));
        (self.behavior)(text, target_lang)
    }
}

struct FakeGeocoder {
    place: Option<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl GeocodeClient for FakeGeocoder {
    async fn resolve(&self, _coordinate: Coordinate) -> Result<PlaceName, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.place
            .map(|p| PlaceName::from(p.to_string()))
            .ok_or_else(|| ProviderError::Geocode("status code 3: no results".to_string()))
    }
}

struct FakeWeather {
    snapshot: Option<WeatherSnapshot>,
    calls: AtomicUsize,
}

#[async_trait]
impl WeatherClient for FakeWeather {
    async fn current_conditions(&self, _coordinate: Coordinate) -> Result<WeatherSnapshot, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot
            .clone()
            .ok_or_else(|| ProviderError::Weather("response has no current conditions".to_string()))
    }
}

struct FakePlaces {
    listings: Option<Vec<RawListing>>,
    queries: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl PlacesClient for FakePlaces {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RawListing>, ProviderError> {
        self.queries.lock().unwrap().push((query.to_string(), limit));
        self.listings
            .clone()
            .ok_or_else(|| ProviderError::Search("provider returned 500".to_string()))
    }
}

struct Harness {
    composer: ResponseComposer,
    translator: Arc<FakeTranslator>,
    geocoder: Arc<FakeGeocoder>,
    weather: Arc<FakeWeather>,
    places: Arc<FakePlaces>,
}

impl Harness {
    fn build(
        translator: FakeTranslator,
        place: Option<&'static str>,
        snapshot: Option<WeatherSnapshot>,
        listings: Option<Vec<RawListing>>,
    ) -> Self {
        let translator = Arc::new(translator);
        let geocoder = Arc::new(FakeGeocoder {
            place,
            calls: AtomicUsize::new(0),
        });
        let weather = Arc::new(FakeWeather {
            snapshot,
            calls: AtomicUsize::new(0),
        });
        let places = Arc::new(FakePlaces {
            listings,
            queries: Mutex::new(Vec::new()),
        });

        let providers = Providers {
            translator: translator.clone(),
            geocoder: geocoder.clone(),
            weather: weather.clone(),
            places: places.clone(),
        };

        Self {
            composer: ResponseComposer::new(providers, SearchSettings::default()),
            translator,
            geocoder,
            weather,
            places,
        }
    }

    fn standard(translator: FakeTranslator) -> Self {
        Self::build(
            translator,
            Some("Seoul, Gangnam-gu"),
            Some(WeatherSnapshot::new(21.5, "Cloudy")),
            Some(sample_listings()),
        )
    }

    fn search_queries(&self) -> Vec<(String, usize)> {
        self.places.queries.lock().unwrap().clone()
    }
}

fn listing(name: &str, address: &str, link: &str) -> RawListing {
    RawListing {
        name: name.to_string(),
        address: address.to_string(),
        link: link.to_string(),
    }
}

fn sample_listings() -> Vec<RawListing> {
    vec![
        listing("봉피양 강남점", "서울특별시 강남구 역삼동 1", "https://example.com/a?x=1&y=2"),
        listing("을밀대", "서울특별시 강남구 역삼동 2", ""),
        listing("진미평양냉면", "서울특별시 강남구 학동 3", "http://blog.example.com/%EC%A7%84"),
    ]
}

fn request(lat: Option<&str>, lon: Option<&str>, lang: Option<&str>) -> ComposeRequest {
    ComposeRequest {
        lat: lat.map(str::to_string),
        lon: lon.map(str::to_string),
        target_lang: lang.map(str::to_string),
    }
}

#[tokio::test]
async fn test_missing_latitude_makes_no_calls() {
    let h = Harness::standard(FakeTranslator::identity());

    let result = h.composer.handle(&request(None, Some("127.03"), Some("EN"))).await;

    assert_eq!(result.unwrap_err(), ComposeError::MissingLocation);
    assert_eq!(h.geocoder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.translator.call_count(), 0);
    assert!(h.search_queries().is_empty());
}

#[tokio::test]
async fn test_unparseable_longitude_is_missing_location() {
    let h = Harness::standard(FakeTranslator::identity());

    let result = h.composer.handle(&request(Some("37.49"), Some("east"), None)).await;

    assert_eq!(result.unwrap_err(), ComposeError::MissingLocation);
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_weather_failure_aborts() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("Seoul, Gangnam-gu"),
        None,
        Some(sample_listings()),
    );

    let result = h.composer.handle(&request(Some("37.49"), Some("127.03"), Some("EN"))).await;

    assert_eq!(result.unwrap_err(), ComposeError::WeatherUnavailable);
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.translator.call_count(), 0);
    assert!(h.search_queries().is_empty());
}

#[tokio::test]
async fn test_english_scenario_message() {
    let h = Harness::standard(FakeTranslator::identity());

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert_eq!(
        response.message,
        "The current temperature in Seoul, Gangnam-gu is 21.5°C, and the weather is Cloudy."
    );
    assert_eq!(response.places.len(), 3);
}

#[tokio::test]
async fn test_korean_condition_uses_dictionary_without_translation() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("서울특별시, 강남구"),
        Some(WeatherSnapshot::new(18.0, "Partly Cloudy")),
        Some(Vec::new()),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("KO")))
        .await
        .unwrap();

    assert_eq!(
        response.message,
        "서울특별시, 강남구의 현재 온도는 18.0°C이며, 날씨는 부분적으로 흐림."
    );
    assert!(!h.translator.texts().contains(&"Partly Cloudy".to_string()));
}

#[tokio::test]
async fn test_korean_unknown_condition_passes_through() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("서울특별시, 강남구"),
        Some(WeatherSnapshot::new(9.2, "Patchy rain possible")),
        Some(Vec::new()),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), None))
        .await
        .unwrap();

    assert!(response.message.ends_with("날씨는 Patchy rain possible."));
    assert!(!h.translator.texts().contains(&"Patchy rain possible".to_string()));
}

#[tokio::test]
async fn test_place_name_translated_even_for_native_language() {
    let h = Harness::standard(FakeTranslator::identity());

    h.composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("KO")))
        .await
        .unwrap();

    assert!(h.translator.texts().contains(&"Seoul, Gangnam-gu".to_string()));
}

#[tokio::test]
async fn test_condition_translation_failure_keeps_provider_text() {
    let translator = FakeTranslator::new(|text, lang| {
        if text == "Cloudy" {
            Err(ProviderError::Translation("DeepL returned 503".to_string()))
        } else {
            Ok(format!("[{lang}] {text}"))
        }
    });
    let h = Harness::standard(translator);

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("JA")))
        .await
        .unwrap();

    assert_eq!(
        response.message,
        "[JA] Seoul, Gangnam-guの現在の気温は21.5°Cで、天気はCloudyです。"
    );
}

#[tokio::test]
async fn test_geocode_failure_degrades_to_empty_place() {
    let h = Harness::build(
        FakeTranslator::identity(),
        None,
        Some(WeatherSnapshot::new(21.5, "Cloudy")),
        Some(sample_listings()),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert_eq!(
        response.message,
        "The current temperature in  is 21.5°C, and the weather is Cloudy."
    );
    assert_eq!(h.search_queries(), vec![("맛집".to_string(), 5)]);
    assert_eq!(response.places.len(), 3);
}

#[tokio::test]
async fn test_empty_place_name_degrades_like_failure() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some(""),
        Some(WeatherSnapshot::new(21.0, "Cloudy")),
        Some(Vec::new()),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert_eq!(h.geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        response.message,
        "The current temperature in  is 21.0°C, and the weather is Cloudy."
    );
    assert_eq!(h.search_queries(), vec![("맛집".to_string(), 5)]);
}

#[tokio::test]
async fn test_search_query_uses_resolved_place() {
    let h = Harness::standard(FakeTranslator::identity());

    h.composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert_eq!(
        h.search_queries(),
        vec![("Seoul, Gangnam-gu 맛집".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_links_are_never_translated() {
    let translator = FakeTranslator::new(|text, _| Ok(text.to_uppercase()));
    let h = Harness::standard(translator);

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    let links: Vec<&str> = response.places.iter().map(|p| p.link.as_str()).collect();
    let expected: Vec<String> = sample_listings().into_iter().map(|l| l.link).collect();
    assert_eq!(links, expected);
    for link in expected.iter().filter(|l| !l.is_empty()) {
        assert!(!h.translator.texts().contains(link));
    }
}

#[tokio::test]
async fn test_listings_keep_order_and_fall_back_individually() {
    let translator = FakeTranslator::new(|text, _| {
        if text == "을밀대" {
            Err(ProviderError::Translation("malformed response".to_string()))
        } else {
            Ok(format!("t:{text}"))
        }
    });
    let h = Harness::standard(translator);

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    let names: Vec<&str> = response.places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["t:봉피양 강남점", "을밀대", "t:진미평양냉면"]);
    assert_eq!(response.places[1].address, "t:서울특별시 강남구 역삼동 2");
}

#[tokio::test]
async fn test_empty_search_results() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("Seoul, Gangnam-gu"),
        Some(WeatherSnapshot::new(21.5, "Cloudy")),
        Some(Vec::new()),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert!(response.places.is_empty());
    assert!(response.message.starts_with("The current temperature in Seoul"));
}

#[tokio::test]
async fn test_search_failure_degrades_to_no_places() {
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("Seoul, Gangnam-gu"),
        Some(WeatherSnapshot::new(21.5, "Cloudy")),
        None,
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert!(response.places.is_empty());
    assert!(!response.message.is_empty());
}

#[tokio::test]
async fn test_places_truncated_to_limit() {
    let many: Vec<RawListing> = (0..8)
        .map(|i| listing(&format!("place {i}"), "addr", &format!("https://example.com/{i}")))
        .collect();
    let h = Harness::build(
        FakeTranslator::identity(),
        Some("Seoul, Gangnam-gu"),
        Some(WeatherSnapshot::new(21.5, "Cloudy")),
        Some(many),
    );

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("EN")))
        .await
        .unwrap();

    assert_eq!(response.places.len(), 5);
    assert_eq!(response.places[4].link, "https://example.com/4");
}

#[tokio::test]
async fn test_unknown_language_uses_native_template_and_translates() {
    let h = Harness::standard(FakeTranslator::new(|text, _| Ok(format!("de:{text}"))));

    let response = h
        .composer
        .handle(&request(Some("37.49"), Some("127.03"), Some("de")))
        .await
        .unwrap();

    assert_eq!(
        response.message,
        "de:Seoul, Gangnam-gu의 현재 온도는 21.5°C이며, 날씨는 de:Cloudy."
    );
    let langs: Vec<String> = h
        .translator
        .calls
        .lock()
        .unwrap()
        .iter()
        .map(|(_, l)| l.clone())
        .collect();
    assert!(langs.iter().all(|l| l == "DE"));
}

#[tokio::test]
async fn test_identical_requests_yield_identical_responses() {
    let h = Harness::standard(FakeTranslator::new(|text, lang| Ok(format!("{lang}:{text}"))));
    let req = request(Some("37.49"), Some("127.03"), Some("ZH"));

    let first = h.composer.handle(&req).await.unwrap();
    let second = h.composer.handle(&req).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failure_messages_are_localized() {
    let h = Harness::standard(FakeTranslator::identity());
    let en = request(None, None, Some("EN")).language();
    let ko = request(None, None, None).language();

    assert_eq!(
        h.composer.failure_message(&en, ComposeError::MissingLocation),
        "Location information is missing."
    );
    assert_eq!(
        h.composer.failure_message(&ko, ComposeError::WeatherUnavailable),
        "날씨 정보를 가져오는 데 실패했습니다."
    );
}

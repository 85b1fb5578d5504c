//! Integration tests for the OpenWeather client using wiremock.

use std::time::Duration;

use weather_core::{
    Coordinates, ForecastOptions, HourFormat, OpenWeatherProvider, ProviderError,
    WeatherProvider, aggregate, config::Endpoints,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn provider_for(server: &MockServer, api_key: Option<&str>) -> OpenWeatherProvider {
    let endpoints = Endpoints {
        api_base_url: format!("{}/data/2.5", server.uri()),
        geo_base_url: format!("{}/geo/1.0", server.uri()),
    };
    OpenWeatherProvider::new(api_key.map(str::to_owned), endpoints, Duration::from_secs(5))
        .expect("client must build")
}

fn london() -> Coordinates {
    Coordinates::new(51.5, -0.12).unwrap()
}

fn forecast_entry(
    dt: i64,
    temp: f64,
    max: f64,
    min: f64,
    main: &str,
    icon: &str,
) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": {
            "temp": temp, "feels_like": temp, "temp_min": min, "temp_max": max,
            "pressure": 1012, "humidity": 70
        },
        "weather": [{ "id": 500, "main": main, "description": main.to_lowercase(), "icon": icon }],
        "wind": { "speed": 3.0, "deg": 180 }
    })
}

#[tokio::test]
async fn current_weather_is_requested_in_metric() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lon": -0.12, "lat": 51.5 },
            "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
            "main": {
                "temp": 8.6, "feels_like": 6.2, "temp_min": 7.0, "temp_max": 9.9,
                "pressure": 1004, "humidity": 93
            },
            "visibility": 8000,
            "wind": { "speed": 5.0, "deg": 200 },
            "name": "London"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider_for(&server, Some("KEY")).current(london()).await.unwrap();

    assert_eq!(current.temperature, 9);
    assert_eq!(current.feels_like, 6);
    assert_eq!(current.wind_speed, 18);
    assert_eq!(current.visibility, 8.0);
    assert_eq!(current.condition, "Rain");
    assert_eq!(current.location, "London");
}

#[tokio::test]
async fn forecast_feeds_the_aggregator() {
    let server = MockServer::start().await;

    // 2024-01-15 00:00 UTC; the city sits at UTC+1.
    let base = 1_705_276_800;
    let list: Vec<_> = vec![
        forecast_entry(base + 9 * 3600, 4.0, 5.2, 2.4, "Rain", "10d"),
        forecast_entry(base + 12 * 3600, 6.0, 7.6, 3.1, "Clouds", "04d"),
        forecast_entry(base + 23 * 3600, 1.0, 1.5, -0.5, "Clear", "01n"),
    ];

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "cnt": list.len(),
            "list": list,
            "city": { "name": "London", "country": "GB", "timezone": 3600 }
        })))
        .mount(&server)
        .await;

    let series = provider_for(&server, Some("KEY")).forecast(london()).await.unwrap();
    let options = ForecastOptions {
        utc_offset: series.utc_offset,
        hour_format: HourFormat::TwentyFour,
    };
    let forecast = aggregate(&series.samples, &options);

    assert_eq!(forecast.hourly.len(), 3);
    assert_eq!(forecast.hourly[0].time, "10:00");
    assert_eq!(forecast.daily.len(), 2);
    assert_eq!(forecast.daily[0].date, "2024-01-15");
    assert_eq!((forecast.daily[0].high, forecast.daily[0].low), (8, 2));
    assert_eq!(forecast.daily[0].condition, "Rain");
    assert_eq!(forecast.daily[1].date, "2024-01-16");
    assert_eq!(forecast.daily[1].condition, "Clear");
}

#[tokio::test]
async fn search_maps_geocoding_hits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Portland"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "name": "Portland", "country": "US", "state": "Oregon",
                "lat": 45.52, "lon": -122.67
            },
            { "name": "Portland", "country": "AU", "lat": -38.34, "lon": 141.6 }
        ])))
        .mount(&server)
        .await;

    let hits = provider_for(&server, Some("KEY")).search("Portland").await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].display_name, "Portland, Oregon, US");
    assert_eq!(hits[1].display_name, "Portland, AU");
    assert_eq!(hits[1].state, None);
}

#[tokio::test]
async fn upstream_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"cod":401,"message":"Invalid API key."}"#),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("BAD")).forecast(london()).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("KEY")).current(london()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn missing_key_never_reaches_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    assert!(matches!(
        provider.current(london()).await,
        Err(ProviderError::MissingApiKey)
    ));
    assert!(matches!(
        provider.search("Oslo").await,
        Err(ProviderError::MissingApiKey)
    ));
}

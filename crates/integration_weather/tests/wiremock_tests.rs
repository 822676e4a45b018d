//! Integration tests for the forecast and geocoding clients using wiremock
//!
//! These tests verify request shape and response handling against a mock
//! HTTP server.

use chrono::NaiveDate;
use domain::GeoLocation;
use integration_weather::{
    ForecastClient, ForecastConfig, GeocodingClient, GeocodingConfig, GeocodingError,
    OpenWeatherGeocoder, VisualCrossingClient, WeatherError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const TIMELINE_PATH: &str = "/timeline/49.4875,8.466/2024-01-05/2024-01-07";

fn sample_timeline_response() -> serde_json::Value {
    serde_json::json!({
        "queryCost": 1,
        "latitude": 49.4875,
        "longitude": 8.466,
        "resolvedAddress": "49.4875,8.466",
        "timezone": "Europe/Berlin",
        "days": [
            {
                "datetime": "2024-01-05",
                "conditions": "Rain, Overcast",
                "temp": 41.0,
                "humidity": 91.2,
                "precipprob": 100.0,
                "precip": 0.21,
                "windspeed": 12.3,
                "cloudcover": 97.4,
                "tempmax": 44.1,
                "tempmin": 37.9,
                "description": "Cloudy skies throughout the day with rain.",
                "pressure": 1004.2,
                "visibility": 9.8,
                "uvindex": 1.0,
                "sunrise": "08:19:31",
                "sunset": "16:42:10"
            },
            {
                "datetime": "2024-01-06",
                "conditions": "Overcast",
                "temp": 35.6,
                "cloudcover": 88.0
            },
            {
                "datetime": "2024-01-07",
                "conditions": "Snow, Partially cloudy",
                "temp": 30.2,
                "cloudcover": 45.5
            }
        ]
    })
}

fn forecast_client(mock_server: &MockServer) -> VisualCrossingClient {
    let config = ForecastConfig {
        base_url: format!("{}/timeline/", mock_server.uri()),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    };
    VisualCrossingClient::new(&config).expect("Failed to create client")
}

fn geocoder(mock_server: &MockServer) -> OpenWeatherGeocoder {
    let config = GeocodingConfig {
        base_url: format!("{}/geo/1.0/direct", mock_server.uri()),
        api_key: Some("geo-key".to_string()),
        ..GeocodingConfig::default()
    };
    OpenWeatherGeocoder::new(&config).expect("Failed to create geocoder")
}

fn mannheim() -> GeoLocation {
    GeoLocation::new(49.4875, 8.466).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

mod forecast_tests {
    use super::*;

    #[tokio::test]
    async fn fetch_timeline_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("key", "test-key"))
            .and(query_param(
                "elements",
                "datetime,conditions,temp,humidity,precipprob,precip,windspeed,cloudcover,\
                 tempmax,tempmin,description,pressure,visibility,uvindex,sunrise,sunset",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_timeline_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = forecast_client(&mock_server);
        let days = client
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await
            .expect("Should fetch timeline");

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].datetime.as_deref(), Some("2024-01-05"));
        assert_eq!(days[0].conditions.as_deref(), Some("Rain, Overcast"));
        assert_eq!(days[0].sunrise.as_deref(), Some("08:19:31"));
        assert_eq!(days[1].humidity, None);
        assert_eq!(days[2].cloudcover, Some(45.5));
    }

    #[tokio::test]
    async fn fetch_timeline_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let result = forecast_client(&mock_server)
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await;
        assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn fetch_timeline_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = forecast_client(&mock_server)
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await;
        assert!(matches!(result, Err(WeatherError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn fetch_timeline_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = forecast_client(&mock_server)
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await;
        assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn fetch_timeline_bad_request_keeps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid location"))
            .mount(&mock_server)
            .await;

        let result = forecast_client(&mock_server)
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await;
        match result {
            Err(WeatherError::RequestFailed(msg)) => assert!(msg.contains("Invalid location")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_timeline_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = forecast_client(&mock_server)
            .fetch_timeline(&mannheim(), date(5), date(7))
            .await;
        assert!(matches!(result, Err(WeatherError::ParseError(_))));
    }
}

mod geocoding_tests {
    use super::*;

    fn sample_geocode_response() -> serde_json::Value {
        serde_json::json!([
            {
                "name": "Mannheim",
                "local_names": { "de": "Mannheim" },
                "lat": 49.4892913,
                "lon": 8.4673098,
                "country": "DE",
                "state": "Baden-Württemberg"
            },
            {
                "name": "Mannheim",
                "lat": 40.1659,
                "lon": -76.3952,
                "country": "US",
                "state": "Pennsylvania"
            }
        ])
    }

    #[tokio::test]
    async fn search_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Mannheim"))
            .and(query_param("limit", "8"))
            .and(query_param("appid", "geo-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocode_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let results = geocoder(&mock_server)
            .search("Mannheim", 8)
            .await
            .expect("Should geocode");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label(), "Mannheim, Baden-Württemberg, DE");
        assert_eq!(results[1].label(), "Mannheim, Pennsylvania, US");
    }

    #[tokio::test]
    async fn search_empty_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let results = geocoder(&mock_server).search("Atlantis", 8).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).search("Paris", 8).await;
        assert!(matches!(result, Err(GeocodingError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn search_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": 400 })),
            )
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).search("Paris", 8).await;
        assert!(matches!(result, Err(GeocodingError::ParseError(_))));
    }
}

//! Lookup clients against a local one-shot HTTP responder.
//!
//! No external network access: each test binds a loopback listener that
//! answers a single request with a canned response.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use pricewise_core::currency::{
    GeoLocator, MemoryPreferenceStore, PREFERENCE_KEY, PreferenceStore, RateSource,
    RefreshOutcome,
};
use pricewise_core::page::{MemoryDocument, NoopSessionCurrency, PageBinder, PricingSession};
use pricewise_core::{LookupError, RateTable};
use pricewise_remote::{ExchangeRateApi, IpGeoApi, LookupServices, build_client};
use pricewise_shared::config::ServicesConfig;
use pricewise_shared::{Currency, PageSelectors};

/// Serves `status` + `body` to the first connection and returns the base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}")
}

/// A loopback URL nothing listens on.
async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Accepts connections and never answers them.
async fn silent_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{addr}")
}

fn config(rates_url: String, geo_url: String) -> ServicesConfig {
    ServicesConfig {
        rates_url,
        geo_url,
        timeout_secs: 1,
    }
}

fn client() -> reqwest::Client {
    build_client(&ServicesConfig::default()).unwrap()
}

#[tokio::test]
async fn test_rates_success() {
    let url = serve_once(
        "200 OK",
        r#"{"result":"success","base_code":"AED","rates":{"AED":1,"EUR":0.25,"GBP":0.2141}}"#,
    )
    .await;
    let api = ExchangeRateApi::new(client(), url);

    let mut table = RateTable::identity();
    let outcome = table.refresh(&api).await;

    assert_eq!(outcome, RefreshOutcome::Live { currencies: 3 });
    assert_eq!(table.rate_for(Currency::Eur), dec!(0.25));
}

#[tokio::test]
async fn test_rates_http_error_status() {
    let url = serve_once("503 Service Unavailable", "{}").await;
    let api = ExchangeRateApi::new(client(), url);

    let err = api.fetch_rates(Currency::Aed).await.unwrap_err();
    assert!(matches!(err, LookupError::HttpStatus(503)));
}

#[tokio::test]
async fn test_rates_unreachable_falls_back_to_identity() {
    let api = ExchangeRateApi::new(client(), closed_url().await);

    let mut table = RateTable::from_rates([(Currency::Eur, dec!(0.25))]);
    let outcome = table.refresh(&api).await;

    assert_eq!(outcome, RefreshOutcome::Fallback);
    assert_eq!(table, RateTable::identity());
}

#[tokio::test]
async fn test_geo_success() {
    let url = serve_once("200 OK", r#"{"country_code":"GB","currency":"GBP"}"#).await;
    let api = IpGeoApi::new(client(), url);

    let location = api.locate().await.unwrap();
    assert_eq!(location.country_code, "GB");
}

#[tokio::test]
async fn test_geo_unreachable_is_network_error() {
    let api = IpGeoApi::new(client(), closed_url().await);
    assert!(matches!(api.locate().await, Err(LookupError::Network(_))));
}

#[tokio::test]
async fn test_silent_services_time_out() {
    let url = silent_url().await;
    let client = build_client(&config(url.clone(), url.clone())).unwrap();
    let rates = ExchangeRateApi::new(client.clone(), url.clone());
    let geo = IpGeoApi::new(client, url);

    let started = std::time::Instant::now();
    let err = rates.fetch_rates(Currency::Aed).await.unwrap_err();
    assert!(matches!(err, LookupError::Timeout), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));

    let mut table = RateTable::from_rates([(Currency::Eur, dec!(0.25))]);
    assert_eq!(table.refresh(&rates).await, RefreshOutcome::Fallback);
    assert_eq!(table, RateTable::identity());

    assert!(matches!(geo.locate().await, Err(LookupError::Timeout)));
}

#[tokio::test]
async fn test_full_load_over_http() {
    let rates_url = serve_once(
        "200 OK",
        r#"{"result":"success","base_code":"AED","rates":{"AED":1,"EUR":0.25}}"#,
    )
    .await;
    let geo_url = serve_once("200 OK", r#"{"country_code":"DE"}"#).await;
    let services = LookupServices::from_config(&config(rates_url, geo_url)).unwrap();

    let store = Arc::new(MemoryPreferenceStore::default());
    let doc = MemoryDocument::storefront(&PageSelectors::default(), 1, "1");
    let mut binder = PageBinder::new(
        doc,
        NoopSessionCurrency,
        store.clone(),
        PricingSession::new(dec!(2.50)),
    );

    let currency = binder.load(&services.rates, &services.geo).await;

    assert_eq!(currency, Currency::Eur);
    assert_eq!(store.get(PREFERENCE_KEY).unwrap().as_deref(), Some("EUR"));
}

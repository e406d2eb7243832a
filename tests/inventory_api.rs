//! End-to-end tests of the HTTP surface.

use std::time::{Duration, Instant};

use inventory_service::client::ClientError;

mod common;

#[tokio::test]
async fn test_health() {
    let service = common::start_service().await;

    let res = service
        .http()
        .get(format!("{}/health", service.url()))
        .send()
        .await
        .expect("service unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "Inventory Service is alive");

    assert_eq!(
        service.client().health().await.unwrap(),
        "Inventory Service is alive"
    );
    assert!(service.exporter.get_finished_spans().unwrap().is_empty());

    service.stop().await;
}

#[tokio::test]
async fn test_available_product() {
    let service = common::start_service().await;

    let start = Instant::now();
    let res = service
        .http()
        .get(format!("{}/checkAvailable/1", service.url()))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "Available product found in Inventory"
    );
    assert!(elapsed >= Duration::from_millis(66), "took {:?}", elapsed);
    assert_eq!(service.exporter.get_finished_spans().unwrap().len(), 1);

    service.stop().await;
}

#[tokio::test]
async fn test_unavailable_product() {
    let service = common::start_service().await;

    let start = Instant::now();
    let res = service
        .http()
        .get(format!("{}/checkAvailable/99", service.url()))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), 404);
    assert_eq!(
        res.text().await.unwrap(),
        "No available product found in Inventoty"
    );
    assert!(elapsed >= Duration::from_millis(77), "took {:?}", elapsed);

    service.stop().await;
}

#[tokio::test]
async fn test_client_maps_outcomes() {
    let service = common::start_service().await;
    let client = service.client();

    let available = client.check_available("1").await.unwrap();
    assert!(available.available);
    assert_eq!(available.message, "Available product found in Inventory");

    for id in ["2", "abc", ""] {
        let res = client.check_available(id).await.unwrap();
        assert!(!res.available, "product {id:?}");
        assert_eq!(res.message, "No available product found in Inventoty");
    }

    assert_eq!(service.exporter.get_finished_spans().unwrap().len(), 4);

    service.stop().await;
}

#[tokio::test]
async fn test_client_encodes_product_id_as_one_segment() {
    let service = common::start_service().await;
    let client = service.client();

    for id in ["1?x=2", "%31", "1/x"] {
        let res = client.check_available(id).await.unwrap();
        assert!(!res.available, "product {id:?}");
        assert_eq!(res.message, "No available product found in Inventoty");
    }

    let spans = service.exporter.get_finished_spans().unwrap();
    let ids: Vec<_> = spans
        .iter()
        .flat_map(|span| span.attributes.iter())
        .filter(|kv| kv.key.as_str() == "product.id")
        .map(|kv| kv.value.as_str().into_owned())
        .collect();
    assert_eq!(ids, ["1?x=2", "%31", "1/x"]);

    service.stop().await;
}

#[tokio::test]
async fn test_client_rejects_not_found_from_unknown_route() {
    let service = common::start_service().await;

    let client = inventory_service::InventoryClient::with_client(
        &format!("{}/nowhere", service.url()),
        service.http(),
    );
    match client.check_available("1").await {
        Err(ClientError::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected unexpected-status error, got {:?}", other),
    }
    assert!(service.exporter.get_finished_spans().unwrap().is_empty());

    service.stop().await;
}

#[tokio::test]
async fn test_client_reports_unexpected_status() {
    let service = common::start_service().await;

    // A path outside the service's routes.
    let client = inventory_service::InventoryClient::with_client(
        &format!("{}/nowhere", service.url()),
        service.http(),
    );
    match client.health().await {
        Err(ClientError::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected unexpected-status error, got {:?}", other),
    }

    service.stop().await;
}

#[tokio::test]
async fn test_concurrent_checks_do_not_serialize() {
    let service = common::start_service().await;
    let client = service.http();
    let concurrency = 20;

    let start = Instant::now();
    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        let url = format!("{}/checkAvailable/{}", service.url(), i % 2);
        tasks.push(tokio::spawn(async move {
            client.get(url).send().await.unwrap().status().as_u16()
        }));
    }

    let mut statuses = Vec::new();
    for task in tasks {
        statuses.push(task.await.unwrap());
    }
    let elapsed = start.elapsed();

    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), concurrency / 2);
    assert_eq!(statuses.iter().filter(|s| **s == 404).count(), concurrency / 2);
    // Sequential handling would need at least 20 * 66ms.
    assert!(elapsed < Duration::from_millis(1000), "took {:?}", elapsed);
    assert_eq!(
        service.exporter.get_finished_spans().unwrap().len(),
        concurrency
    );

    service.stop().await;
}

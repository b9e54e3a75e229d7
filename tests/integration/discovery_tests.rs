//! Manifest discovery against mock servers

use edgewarm::manifest::discover;
use edgewarm::probe::build_http_client;
use edgewarm::WarmError;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    build_http_client(Duration::from_secs(5)).expect("failed to build client")
}

async fn mount_manifest(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_variant_manifest() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/index.m3u8",
        "#EXTM3U\n#EXT-X-TARGETDURATION:4\n#EXTINF:4.0,\nseg1.ts\n#EXTINF:4.0,\nseg2.ts\n#EXTINF:4.0,\nseg3.ts\n#EXT-X-ENDLIST\n",
    )
    .await;

    let master = format!("{}/hls/index.m3u8", base);
    let discovery = discover(&test_client(), &master).await.unwrap();

    assert_eq!(
        discovery.urls,
        vec![
            master.clone(),
            format!("{}/hls/seg1.ts", base),
            format!("{}/hls/seg2.ts", base),
            format!("{}/hls/seg3.ts", base),
        ]
    );
    assert!(discovery.variants.is_empty());
}

#[tokio::test]
async fn test_multi_variant_manifest() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/master.m3u8",
        "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=2000000\n720p/index.m3u8\n#EXT-X-STREAM-INF:BANDWIDTH=5000000\n1080p/index.m3u8\n",
    )
    .await;
    mount_manifest(
        &server,
        "/hls/720p/index.m3u8",
        "#EXTM3U\n#EXTINF:4.0,\nseg1.ts\n#EXTINF:4.0,\nseg2.ts\n",
    )
    .await;
    mount_manifest(
        &server,
        "/hls/1080p/index.m3u8",
        "#EXTM3U\n#EXTINF:4.0,\nseg1.ts\n#EXTINF:4.0,\nseg2.ts\n",
    )
    .await;

    let master = format!("{}/hls/master.m3u8", base);
    let discovery = discover(&test_client(), &master).await.unwrap();

    // 1 master + 2 children + 4 segments
    assert_eq!(discovery.urls.len(), 7);
    assert_eq!(discovery.urls[0], master);
    assert!(discovery.urls.contains(&format!("{}/hls/720p/seg2.ts", base)));
    assert!(discovery.urls.contains(&format!("{}/hls/1080p/seg1.ts", base)));
    assert_eq!(discovery.variants, vec!["720p", "1080p"]);
}

#[tokio::test]
async fn test_discovery_is_deterministic() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/master.m3u8",
        "#EXTM3U\n720p/index.m3u8\n1080p/index.m3u8\n",
    )
    .await;
    mount_manifest(&server, "/hls/720p/index.m3u8", "#EXTM3U\nseg1.ts\n").await;
    mount_manifest(&server, "/hls/1080p/index.m3u8", "#EXTM3U\nseg1.ts\n").await;

    let master = format!("{}/hls/master.m3u8", base);
    let client = test_client();
    let first = discover(&client, &master).await.unwrap();
    let second = discover(&client, &master).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_duplicate_references_inserted_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/index.m3u8",
        "#EXTM3U\nseg1.ts\nseg2.ts\nseg1.ts\n",
    )
    .await;

    let master = format!("{}/hls/index.m3u8", base);
    let discovery = discover(&test_client(), &master).await.unwrap();

    assert_eq!(discovery.urls.len(), 3); // master + 2 unique segments
}

#[tokio::test]
async fn test_mixed_reference_styles_resolve() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/index.m3u8",
        "#EXTM3U\nseg1.ts\n/media/seg2.ts\nhttps://other.example.com/seg3.ts\n",
    )
    .await;

    let master = format!("{}/hls/index.m3u8", base);
    let discovery = discover(&test_client(), &master).await.unwrap();

    assert_eq!(
        discovery.urls,
        vec![
            master,
            format!("{}/hls/seg1.ts", base),
            format!("{}/media/seg2.ts", base),
            "https://other.example.com/seg3.ts".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failing_child_loses_only_its_segments() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_manifest(
        &server,
        "/hls/master.m3u8",
        "#EXTM3U\n720p/index.m3u8\n1080p/index.m3u8\n",
    )
    .await;
    mount_manifest(
        &server,
        "/hls/720p/index.m3u8",
        "#EXTM3U\nseg1.ts\nseg2.ts\n",
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/hls/1080p/index.m3u8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let master = format!("{}/hls/master.m3u8", base);
    let discovery = discover(&test_client(), &master).await.unwrap();

    // Master, both child URLs, and only the reachable child's segments
    assert_eq!(discovery.urls.len(), 5);
    assert!(discovery
        .urls
        .contains(&format!("{}/hls/1080p/index.m3u8", base)));
    assert_eq!(discovery.variants, vec!["720p", "1080p"]);
}

#[tokio::test]
async fn test_unreachable_master_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hls/master.m3u8"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let master = format!("{}/hls/master.m3u8", server.uri());
    let result = discover(&test_client(), &master).await;

    assert!(matches!(result, Err(WarmError::MasterFetch { .. })));
}

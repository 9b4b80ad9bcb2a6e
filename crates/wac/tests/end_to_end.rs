//! Decisions made by a configured engine against documents served over HTTP.

use std::sync::Arc;

use wac::config::{CacheSettings, WacConfig};
use wac::prelude::*;
use wac_test::{AclDocumentBuilder, Authorization, DocumentServer, GroupDocumentBuilder, TestPod};

const ALICE: &str = "https://alice.example/profile#me";
const BOB: &str = "https://bob.example/profile#me";

fn engine(config: WacConfig) -> AccessControlEngine {
    WacBuilder::new().config(config).build().unwrap()
}

#[tokio::test]
async fn test_http_decisions_with_inheritance_and_groups() {
    let server = DocumentServer::start().await.unwrap();
    server.put_turtle(
        "/.acl",
        AclDocumentBuilder::new()
            .with(
                Authorization::new("readers")
                    .default_for(server.url("/"))
                    .mode(AccessMode::Read)
                    .public(),
            )
            .with(
                Authorization::new("editors")
                    .default_for(server.url("/"))
                    .mode(AccessMode::Write)
                    .group(server.url("/groups#editors")),
            )
            .build(),
    );
    server.put_turtle(
        "/groups",
        GroupDocumentBuilder::new()
            .member("editors", ALICE)
            .build(),
    );

    let engine = engine(WacConfig::default());
    let notes = server.url("/notes/today");

    let read = engine.check_access(&notes, "GET", None, None).await.unwrap();
    assert!(read.as_str().ends_with("#readers"));

    let write = engine
        .check_access(&notes, "PUT", None, Some(ALICE))
        .await
        .unwrap();
    assert!(write.as_str().ends_with("#editors"));

    let err = engine
        .check_access(&notes, "PUT", None, Some(BOB))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized { .. }));

    let err = engine
        .check_access(&notes, "DELETE", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Unauthenticated { .. }));
}

#[tokio::test]
async fn test_cache_avoids_refetching_documents() {
    let server = DocumentServer::start().await.unwrap();
    server.put_turtle(
        "/.acl",
        AclDocumentBuilder::new()
            .with(
                Authorization::new("readers")
                    .default_for(server.url("/"))
                    .mode(AccessMode::Read)
                    .public(),
            )
            .build(),
    );

    let engine = engine(WacConfig::default());
    let doc = server.url("/doc");

    engine.check_access(&doc, "GET", None, None).await.unwrap();
    engine.check_access(&doc, "GET", None, None).await.unwrap();

    assert_eq!(server.request_count("/doc.acl"), 1);
    assert_eq!(server.request_count("/.acl"), 1);
}

#[tokio::test]
async fn test_disabled_cache_fetches_every_time() {
    let server = DocumentServer::start().await.unwrap();
    server.put_turtle(
        "/doc.acl",
        AclDocumentBuilder::new()
            .with(
                Authorization::new("readers")
                    .access_to(server.url("/doc"))
                    .mode(AccessMode::Read)
                    .public(),
            )
            .build(),
    );

    let config = WacConfig::builder()
        .cache(CacheSettings {
            enabled: false,
            ..CacheSettings::default()
        })
        .build();
    let engine = engine(config);
    let doc = server.url("/doc");

    engine.check_access(&doc, "GET", None, None).await.unwrap();
    engine.check_access(&doc, "GET", None, None).await.unwrap();

    assert_eq!(server.request_count("/doc.acl"), 2);
}

#[tokio::test]
async fn test_forbidden_acl_document_is_a_resolution_failure() {
    let server = DocumentServer::start().await.unwrap();
    server.put_status("/doc.acl", 403);

    let engine = engine(WacConfig::default());
    let err = engine
        .check_access(&server.url("/doc"), "GET", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::ResolutionFailure { .. }));
    assert_eq!(server.request_count("/.acl"), 0);
}

#[tokio::test]
async fn test_custom_provider_and_suffix() {
    let pod = TestPod::new("http://pod.example")
        .with_document(
            "/doc.meta",
            &AclDocumentBuilder::new()
                .with(
                    Authorization::new("owner")
                        .access_to("http://pod.example/doc")
                        .mode(AccessMode::Control)
                        .agent(ALICE),
                )
                .build(),
        )
        .unwrap();

    let mut config = WacConfig::default();
    config.acl.suffix = ".meta".to_string();

    let engine = WacBuilder::new()
        .config(config)
        .provider(pod.provider())
        .build()
        .unwrap();

    let granted = engine
        .check_access("http://pod.example/doc.meta", "PUT", None, Some(ALICE))
        .await
        .unwrap();
    assert_eq!(granted.as_str(), "http://pod.example/doc.meta#owner");

    let err = engine
        .check_access("http://pod.example/doc", "GET", None, Some(ALICE))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_custom_mapping() {
    let pod = TestPod::new("http://pod.example")
        .with_document(
            "/doc.acl",
            &AclDocumentBuilder::new()
                .with(
                    Authorization::new("public")
                        .access_to("http://pod.example/doc")
                        .mode(AccessMode::Read)
                        .public(),
                )
                .build(),
        )
        .unwrap();

    let engine = WacBuilder::new()
        .provider(pod.provider())
        .mapping(Arc::new(SuffixAclMapping::default()))
        .build()
        .unwrap();

    let decision = engine
        .decide("http://pod.example/doc", "GET", None, None)
        .await
        .unwrap();
    assert!(decision.is_granted());
}

// ABOUTME: Integration tests for the in-memory fixture engine.
// ABOUTME: Drives it through the same trait object the CLI uses.

use berth::engine::{Engine, EngineErrorKind, FixtureEngine, ImageOps, SystemOps};
use berth::types::{ContainerId, ImageId};

fn engine() -> Box<dyn Engine> {
    Box::new(FixtureEngine::sample())
}

#[tokio::test]
async fn reads_run_concurrently() {
    let engine = engine();

    let (images, containers, networks, df) = futures::try_join!(
        engine.list_images(),
        engine.list_containers(),
        engine.list_networks(),
        engine.disk_usage(),
    )
    .unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(containers.len(), 2);
    assert_eq!(networks[0].name, "bridge");
    assert_eq!(networks[0].containers[0].name, "web");
    assert_eq!(df.image_summary.total_count, images.len());
}

#[tokio::test]
async fn remove_container_by_id_prefix() {
    let engine = engine();

    engine
        .remove_container(&ContainerId::new("9e8d7c6b"))
        .await
        .unwrap();

    let names: Vec<String> = engine
        .list_containers()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["web"]);
}

#[tokio::test]
async fn remove_image_by_reference() {
    let engine = engine();

    engine
        .remove_image(&ImageId::new("nginx:latest"))
        .await
        .unwrap();

    let err = engine
        .remove_image(&ImageId::new("nginx:latest"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), EngineErrorKind::RequestFailed);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn stopping_a_stopped_container_is_not_modified() {
    let engine = engine();

    let err = engine
        .stop_container(&ContainerId::new("cache"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(304));
}

#[tokio::test]
async fn unknown_container_is_404() {
    let engine = engine();

    let err = engine
        .start_container(&ContainerId::new("ghost"))
        .await
        .unwrap_err();

    assert_eq!(
        err.engine_message().as_deref(),
        Some("No such container: ghost")
    );
}

#[tokio::test]
async fn empty_engine() {
    let empty = FixtureEngine::new(
        Vec::new(),
        Vec::new(),
        Vec::new(),
        berth::engine::mapping::snapshot(0, Vec::new(), Vec::new(), Vec::new(), Vec::new()),
    );

    assert!(empty.list_images().await.unwrap().is_empty());
    let df = empty.disk_usage().await.unwrap();
    assert_eq!(df.image_summary.reclaimable, 0);
    assert_eq!(df.volume_summary.total_count, 0);
}

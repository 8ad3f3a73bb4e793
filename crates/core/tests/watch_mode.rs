mod common;

use clientspec_core::ControllerProcessor;
use clientspec_core::watch::watch_project;
use common::write_files;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watch_regenerates_on_change() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write_files(
        &root,
        &[(
            "src/Ping.java",
            "@RestController class Ping { @GetMapping(\"/ping\") String ping() { return \"\"; } }",
        )],
    );

    let endpoints = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&endpoints);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(watch_project(
        root.clone(),
        ControllerProcessor::default(),
        cancel.clone(),
        move |report| seen.lock().unwrap().push(report.endpoints),
    ));

    // Wait for the initial run
    let mut waited = Duration::ZERO;
    while endpoints.lock().unwrap().is_empty() && waited < Duration::from_secs(10) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }
    assert_eq!(endpoints.lock().unwrap().as_slice(), &[1]);

    write_files(
        &root,
        &[(
            "src/Pong.java",
            "@RestController class Pong { @GetMapping(\"/pong\") String pong() { return \"\"; } }",
        )],
    );

    let mut waited = Duration::ZERO;
    while endpoints.lock().unwrap().len() < 2 && waited < Duration::from_secs(10) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        waited += Duration::from_millis(100);
    }

    cancel.cancel();
    task.await.unwrap().unwrap();

    let runs = endpoints.lock().unwrap().clone();
    assert_eq!(runs.first(), Some(&1));
    assert_eq!(runs.last(), Some(&2));
}

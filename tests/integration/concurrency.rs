//! A shared dispatcher gives the same answer no matter how often or from
//! how many tasks it is asked.

use crate::common::{dispatcher, fixtures};
use ows_dispatch::{RawRequest, Version};
use std::sync::Arc;

fn requests() -> Vec<RawRequest> {
    vec![
        RawRequest::from_query(fixtures::WMS_GET_MAP_111),
        RawRequest::from_query(fixtures::WMS_GET_MAP_130),
        RawRequest::from_query(fixtures::WFS_GET_FEATURE_KVP),
        RawRequest::from_query("SERVICE=WMS&REQUEST=GetMap&VERSION=1.1.1&WIDTH=-4&BGCOLOR=red"),
        RawRequest::from_xml(fixtures::WFS_GET_FEATURE),
        RawRequest::from_xml(fixtures::WFS_GET_FEATURE_TWO_ERRORS),
        RawRequest::from_xml(fixtures::WCS_GET_COVERAGE),
    ]
}

#[test]
fn test_dispatch_is_idempotent() {
    let dispatcher = dispatcher();
    for raw in requests() {
        let first = dispatcher.dispatch(&raw);
        for _ in 0..3 {
            assert_eq!(dispatcher.dispatch(&raw), first);
        }
    }
}

#[test]
fn test_clones_share_tables() {
    let dispatcher = dispatcher();
    let clone = dispatcher.clone();
    let raw = RawRequest::from_query(fixtures::WMS_GET_FEATURE_INFO);
    assert_eq!(dispatcher.dispatch(&raw), clone.dispatch(&raw));
    assert_eq!(dispatcher.parsers().len(), clone.parsers().len());
}

#[tokio::test]
async fn test_concurrent_tasks_match_sequential_results() {
    let dispatcher = Arc::new(dispatcher());
    let expected: Vec<_> = requests().iter().map(|raw| dispatcher.dispatch(raw)).collect();

    let mut handles = Vec::new();
    for round in 0..8 {
        let dispatcher = Arc::clone(&dispatcher);
        handles.push(tokio::spawn(async move {
            let mut raws = requests();
            // vary the interleaving between tasks
            let count = raws.len();
            raws.rotate_left(round % count);
            let results: Vec<_> = raws.iter().map(|raw| dispatcher.dispatch(raw)).collect();
            (round, results)
        }));
    }

    for handle in futures::future::join_all(handles).await {
        let (round, mut results) = handle.expect("task completes");
        let count = results.len();
        results.rotate_right(round % count);
        assert_eq!(results, expected);
    }
}

#[test]
fn test_threads_see_same_negotiated_versions() {
    let dispatcher = dispatcher();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            std::thread::spawn(move || {
                dispatcher
                    .dispatch(&RawRequest::from_xml(fixtures::WCS_GET_COVERAGE))
                    .map(|request| request.version)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(Version::new(1, 1, 1)));
    }
}

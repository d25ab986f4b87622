//! Capture, save, load and restore round trips

use panekeep_core::capture::{capture_tab, capture_workspace, list_workspaces};
use panekeep_core::host::{
    MemoryHost, MuxHost, PaneId, SpawnRequest, SplitDirection, SplitRequest, TabId,
};
use panekeep_core::layout::{ActivationConfig, ActivationGuard, RestoreTarget, Restorer};
use panekeep_core::models::{Rectangle, TabRecord};
use panekeep_core::store::{SnapshotKind, SnapshotPayload, SnapshotStore};
use tempfile::TempDir;

fn split(host: &mut MemoryHost, pane: &PaneId, direction: SplitDirection) -> PaneId {
    host.split(
        pane,
        &SplitRequest {
            direction,
            cwd: Some("/work".into()),
            domain: None,
            size_ratio: 0.5,
        },
    )
    .expect("split")
}

/// Builds an 80x48 tab: anchor split below, then the anchor split right.
fn three_pane_host() -> (MemoryHost, TabId) {
    let mut host = MemoryHost::new().with_tab_size(80, 48);
    let spawned = host
        .spawn_tab(&SpawnRequest {
            workspace: Some("dev".into()),
            cwd: Some("/home".into()),
            new_window: true,
            ..SpawnRequest::default()
        })
        .expect("spawn");
    split(&mut host, &spawned.pane, SplitDirection::Bottom);
    split(&mut host, &spawned.pane, SplitDirection::Right);
    host.set_tab_title(&spawned.pane, "editor").expect("title");
    (host, spawned.tab_id)
}

fn guard() -> ActivationGuard {
    ActivationGuard::new(ActivationConfig::immediate())
}

fn assert_close(a: &Rectangle, b: &Rectangle) {
    assert!(
        a.top.abs_diff(b.top) <= 1
            && a.left.abs_diff(b.left) <= 1
            && a.width.abs_diff(b.width) <= 1
            && a.height.abs_diff(b.height) <= 1,
        "{a} vs {b}"
    );
}

fn assert_same_layout(original: &TabRecord, restored: &TabRecord) {
    assert_eq!(original.panes.len(), restored.panes.len());
    for (a, b) in original.panes.iter().zip(&restored.panes) {
        assert_close(&a.rectangle, &b.rectangle);
        assert_eq!(a.working_directory, b.working_directory);
    }
    assert!(restored.tiling_report().expect("panes").is_tiled());
}

#[test]
fn captured_fixture_has_expected_geometry() {
    let (host, tab_id) = three_pane_host();
    let tab = capture_tab(&host, &tab_id).unwrap();

    let rects: Vec<Rectangle> = tab.panes.iter().map(|p| p.rectangle).collect();
    assert_eq!(
        rects,
        vec![
            Rectangle::new(0, 0, 39, 23),
            Rectangle::new(24, 0, 80, 24),
            Rectangle::new(0, 40, 40, 23),
        ]
    );
    assert_eq!(tab.title.as_deref(), Some("editor"));
    assert_eq!(tab.active_index(), Some(2));
    assert_eq!(tab.panes[0].working_directory, "file:///home");
    assert_eq!(tab.panes[1].working_directory, "file:///work");
}

#[test]
fn tab_round_trip_through_store() {
    let (host, tab_id) = three_pane_host();
    let original = capture_tab(&host, &tab_id).unwrap();

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save("editor", original.clone()).unwrap();
    let snapshot = store
        .load(SnapshotKind::Tab, "editor")
        .unwrap()
        .expect("snapshot exists");
    let SnapshotPayload::Tab(loaded) = snapshot.payload else {
        panic!("expected a tab snapshot");
    };
    assert_eq!(loaded, original);

    let mut fresh = MemoryHost::new().with_tab_size(80, 48);
    let report = Restorer::new(&mut fresh)
        .with_guard(guard())
        .restore_tab(&loaded, RestoreTarget::NewWindow { workspace: None })
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.panes_created, 2);

    let restored = capture_tab(&fresh, &report.tab_id.unwrap()).unwrap();
    assert_same_layout(&original, &restored);
    assert_eq!(restored.title.as_deref(), Some("editor"));
    assert_eq!(restored.active_index(), Some(2));
}

#[test]
fn restore_splits_bottom_before_right_here() {
    let (host, tab_id) = three_pane_host();
    let original = capture_tab(&host, &tab_id).unwrap();

    let mut fresh = MemoryHost::new().with_tab_size(80, 48);
    let report = Restorer::new(&mut fresh)
        .with_guard(guard())
        .restore_tab(&original, RestoreTarget::NewWindow { workspace: None })
        .unwrap();

    let directions: Vec<SplitDirection> = report.executed.iter().map(|i| i.direction).collect();
    assert_eq!(directions, vec![SplitDirection::Bottom, SplitDirection::Right]);
    assert!((report.executed[0].size_ratio - 23.0 / 47.0).abs() < 1e-9);
    assert!((report.executed[1].size_ratio - 39.0 / 79.0).abs() < 1e-9);
}

#[test]
fn workspace_round_trip() {
    let mut host = MemoryHost::new().with_tab_size(120, 40);
    let first = host
        .spawn_tab(&SpawnRequest {
            workspace: Some("dev".into()),
            new_window: true,
            ..SpawnRequest::default()
        })
        .unwrap();
    split(&mut host, &first.pane, SplitDirection::Right);
    let second = host
        .spawn_tab(&SpawnRequest {
            window: Some(first.window_id.clone()),
            ..SpawnRequest::default()
        })
        .unwrap();
    let below = split(&mut host, &second.pane, SplitDirection::Bottom);
    split(&mut host, &below, SplitDirection::Right);
    host.spawn_tab(&SpawnRequest {
        workspace: Some("other".into()),
        new_window: true,
        ..SpawnRequest::default()
    })
    .unwrap();

    assert_eq!(list_workspaces(&host).unwrap(), vec!["dev", "other"]);
    let original = capture_workspace(&host, "dev").unwrap();
    assert_eq!(original.windows.len(), 1);
    assert_eq!(original.tab_count(), 2);
    assert_eq!(original.pane_count(), 5);

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save("dev", original.clone()).unwrap();
    let Some(snapshot) = store.load(SnapshotKind::Workspace, "dev").unwrap() else {
        panic!("workspace snapshot missing");
    };
    let SnapshotPayload::Workspace(loaded) = snapshot.payload else {
        panic!("expected a workspace snapshot");
    };

    let mut fresh = MemoryHost::new().with_tab_size(120, 40);
    let report = Restorer::new(&mut fresh)
        .with_guard(guard())
        .restore_workspace(&loaded)
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.windows[0].pane_count(), 5);

    let restored = capture_workspace(&fresh, "dev").unwrap();
    assert_eq!(restored.windows.len(), 1);
    for (a, b) in original.windows[0].tabs.iter().zip(&restored.windows[0].tabs) {
        assert_same_layout(a, b);
    }
}

#[test]
fn restore_into_existing_pane() {
    let (host, tab_id) = three_pane_host();
    let original = capture_tab(&host, &tab_id).unwrap();

    let mut fresh = MemoryHost::new().with_tab_size(80, 48);
    let spawned = fresh.spawn_tab(&SpawnRequest::default()).unwrap();
    let report = Restorer::new(&mut fresh)
        .with_guard(guard())
        .restore_tab(&original, RestoreTarget::Pane(spawned.pane.clone()))
        .unwrap();
    assert!(report.tab_id.is_none());

    let restored = capture_tab(&fresh, &spawned.tab_id).unwrap();
    assert_eq!(restored.panes.len(), 3);
    assert!(restored.tiling_report().unwrap().is_tiled());
}

//! Partial restores: host faults must not abort the remaining work

use panekeep_core::host::{HostCall, MemoryHost, PaneId, TabId};
use panekeep_core::layout::{
    ActivationConfig, ActivationGuard, RestoreError, RestoreTarget, Restorer,
};
use panekeep_core::models::{PaneRecord, Rectangle, TabRecord, WindowRecord};

fn pane(id: &str, top: u32, left: u32, width: u32, height: u32) -> PaneRecord {
    PaneRecord::new(id, Rectangle::new(top, left, width, height), "file:///srv")
}

/// Anchor on the left; the right column split into top and bottom.
fn column_tab() -> TabRecord {
    TabRecord::new(
        "9",
        vec![
            pane("0", 0, 0, 39, 48),
            pane("1", 0, 40, 40, 23),
            pane("2", 24, 40, 40, 24),
        ],
    )
}

fn restorer(host: &mut MemoryHost) -> Restorer<'_, MemoryHost> {
    Restorer::new(host).with_guard(ActivationGuard::new(ActivationConfig::immediate()))
}

fn tab_panes(host: &MemoryHost, tab: &TabId) -> usize {
    host.panes_in_tab(tab).len()
}

// A fresh host numbers window, tab and pane 0, 1, 2; the first split
// creates pane 3.

#[test]
fn failed_activation_skips_only_that_subtree() {
    let mut host = MemoryHost::new().with_tab_size(80, 48);
    host.fail_activation_of(PaneId::new("3"));

    let report = restorer(&mut host)
        .restore_tab(&column_tab(), RestoreTarget::NewWindow { workspace: None })
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.panes_created, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].parent_record, 1);
    assert_eq!(report.skipped[0].targets, vec![2]);
    assert!(report.failed.is_empty());
    assert_eq!(tab_panes(&host, &report.tab_id.unwrap()), 2);
}

#[test]
fn failed_split_abandons_target_and_descendants() {
    let mut host = MemoryHost::new().with_tab_size(80, 48);
    host.fail_split_of(PaneId::new("2"));

    let report = restorer(&mut host)
        .restore_tab(&column_tab(), RestoreTarget::NewWindow { workspace: None })
        .unwrap();

    assert_eq!(report.panes_created, 0);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].instruction.target, 1);
    assert!(report.failed[0].reason.contains("cannot split"));
    assert_eq!(host.pane_count(), 1);
}

fn l_shaped_tab() -> TabRecord {
    TabRecord::new(
        "4",
        vec![
            pane("0", 0, 0, 40, 24),
            pane("1", 0, 41, 39, 24),
            pane("2", 25, 0, 80, 23),
        ],
    )
}

#[test]
fn each_anchor_split_fails_on_its_own() {
    let mut host = MemoryHost::new().with_tab_size(80, 48);
    host.fail_split_of(PaneId::new("2"));

    let report = restorer(&mut host)
        .restore_tab(&l_shaped_tab(), RestoreTarget::NewWindow { workspace: None })
        .unwrap();

    let targets: Vec<usize> = report.failed.iter().map(|f| f.instruction.target).collect();
    assert_eq!(targets, vec![1, 2]);
    assert!(report.skipped.is_empty());
}

#[test]
fn parent_is_activated_before_every_split() {
    let mut host = MemoryHost::new().with_tab_size(80, 48);
    let report = restorer(&mut host)
        .restore_tab(&l_shaped_tab(), RestoreTarget::NewWindow { workspace: None })
        .unwrap();
    assert!(report.is_complete());

    let activations = host
        .calls()
        .iter()
        .filter(|c| matches!(c, HostCall::Activate(p) if p.as_str() == "2"))
        .count();
    assert_eq!(activations, 2);
}

#[test]
fn spawn_failure_is_reported_per_tab() {
    let mut host = MemoryHost::new();
    host.fail_spawns(true);

    let err = restorer(&mut host)
        .restore_tab(&column_tab(), RestoreTarget::NewWindow { workspace: None })
        .unwrap_err();
    assert!(matches!(err, RestoreError::TabCreation(_)));

    let window = WindowRecord {
        workspace: "dev".into(),
        title: None,
        tabs: vec![column_tab(), column_tab()],
    };
    let report = restorer(&mut host).restore_window(&window, None).unwrap();
    assert!(report.tabs.is_empty());
    assert_eq!(report.failures.len(), 2);
}

#[test]
fn empty_records_are_rejected() {
    let mut host = MemoryHost::new();
    let err = restorer(&mut host)
        .restore_tab(
            &TabRecord::new("x", Vec::new()),
            RestoreTarget::NewWindow { workspace: None },
        )
        .unwrap_err();
    assert!(matches!(err, RestoreError::MissingDependency(_)));
    assert_eq!(host.pane_count(), 0);
}

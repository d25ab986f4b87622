//! Property tests for snapshot naming and persistence

use panekeep_core::store::{SnapshotKind, SnapshotPayload, SnapshotStore, decode_name, encode_name};
use proptest::prelude::*;
use tempfile::TempDir;

use super::layouts::{tab_of, tiling};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any name survives escaping.
    #[test]
    fn prop_name_escape_round_trip(name in any::<String>()) {
        prop_assert_eq!(decode_name(&encode_name(&name)), Some(name));
    }

    /// Escaped names are safe file stems.
    #[test]
    fn prop_escaped_names_are_portable(name in any::<String>()) {
        let stem = encode_name(&name);
        prop_assert!(stem
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'+')));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// A saved tab loads back unchanged under any name.
    #[test]
    fn prop_saved_tab_loads_back(rects in tiling(8), name in "[a-zA-Z0-9 ./:-]{1,24}") {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let tab = tab_of(&rects);

        store.save(&name, tab.clone()).unwrap();
        let loaded = store.load(SnapshotKind::Tab, &name).unwrap().unwrap();
        prop_assert_eq!(loaded.payload, SnapshotPayload::Tab(tab));

        let listed = store.list(SnapshotKind::Tab).unwrap();
        prop_assert_eq!(listed.len(), 1);
        prop_assert_eq!(&listed[0].name, &name);
    }
}

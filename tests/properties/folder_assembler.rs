//! Property tests for folder assembly and target overlays.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use kube_deploy::domain::entities::{FolderSpec, MergeFolder};
use kube_deploy::domain::services::FolderAssembler;
use kube_deploy::domain::value_objects::RenderEngine;
use kube_deploy::infrastructure::MemoryFs;

fn engine() -> impl Strategy<Value = RenderEngine> {
    prop::sample::select(RenderEngine::ALL.to_vec())
}

fn folder_specs() -> impl Strategy<Value = Vec<FolderSpec>> {
    prop::collection::vec(
        ("[a-z]{1,8}", engine(), prop::option::of(-50i64..50)),
        0..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(path, render_engine, order)| FolderSpec {
                path,
                render_engine,
                order,
                helm_chart: None,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Assembling the same declarations twice yields the same units.
    #[test]
    fn property_assemble_is_deterministic(specs in folder_specs(), conventions in any::<bool>()) {
        let fs = MemoryFs::new()
            .with_file("deploy/predeploy/a.yaml", "kind: ConfigMap")
            .with_file("deploy/postdeploy/b.yaml", "kind: Job");
        let assembler = FolderAssembler::new(&fs, Path::new("deploy"), None);

        let first = assembler.assemble(&specs, conventions);
        let second = assembler.assemble(&specs, conventions);
        prop_assert_eq!(&first, &second);

        if !specs.is_empty() {
            prop_assert_eq!(first.len(), specs.len());
            for (position, (unit, spec)) in first.iter().zip(&specs).enumerate() {
                prop_assert_eq!(&unit.path, &Path::new("deploy").join(&spec.path));
                prop_assert_eq!(unit.order, Some(spec.order.unwrap_or(position as i64)));
            }
        }
    }

    /// PROPERTY: An insteadOf overlay only touches the unit it names.
    #[test]
    fn property_overlay_preserves_unmatched_units(
        names in prop::collection::btree_set("[a-z]{1,8}", 1..6),
        pick in any::<prop::sample::Index>(),
        replacement in engine(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let specs: Vec<FolderSpec> = names
            .iter()
            .map(|name| FolderSpec { path: name.clone(), ..FolderSpec::default() })
            .collect();

        let fs = MemoryFs::new();
        let assembler = FolderAssembler::new(&fs, Path::new("deploy"), None);
        let base = assembler.assemble(&specs, false);

        let target = pick.get(&names).clone();
        let overlay = MergeFolder {
            instead_of: Some(target.clone()),
            path: target.clone(),
            render_engine: replacement,
            ..MergeFolder::default()
        };
        let merged = assembler.merge_overlays(base.clone(), &[overlay]).unwrap();

        prop_assert_eq!(merged.len(), base.len());
        let target_path = PathBuf::from("deploy").join(&target);
        for (before, after) in base.iter().zip(&merged) {
            prop_assert_eq!(&before.path, &after.path);
            prop_assert_eq!(before.order, after.order);
            if after.path == target_path {
                prop_assert_eq!(after.render_engine, replacement);
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    /// PROPERTY: An ordered overlay appends exactly one unit.
    #[test]
    fn property_ordered_overlay_appends(specs in folder_specs(), order in -50i64..50) {
        let fs = MemoryFs::new();
        let assembler = FolderAssembler::new(&fs, Path::new("deploy"), None);
        let base = assembler.assemble(&specs, false);

        let overlay = MergeFolder {
            path: "extra".to_string(),
            order: Some(order),
            ..MergeFolder::default()
        };
        let merged = assembler.merge_overlays(base.clone(), &[overlay]).unwrap();

        prop_assert_eq!(merged.len(), base.len() + 1);
        prop_assert_eq!(&merged[..base.len()], &base[..]);
        let appended = merged.last().unwrap();
        prop_assert_eq!(&appended.path, &PathBuf::from("deploy/extra"));
        prop_assert_eq!(appended.order, Some(order));
    }
}

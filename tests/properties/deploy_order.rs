//! Property tests for the deploy driver's dispatch order.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use kube_deploy::domain::entities::{DeployUnit, EffectiveConfig};
use kube_deploy::domain::ports::{Cluster, HelmRepo, SecretDecryptor};
use kube_deploy::infrastructure::MemoryFs;
use kube_deploy::{DeployOptions, DeployUseCase, KubeDeployResult};

#[derive(Default)]
struct RecordingCluster {
    applied_folders: RefCell<Vec<String>>,
}

impl Cluster for RecordingCluster {
    fn apply(&self, _manifest: &serde_json::Value) -> KubeDeployResult<()> {
        Ok(())
    }

    fn kubectl(&self, args: &[String]) -> KubeDeployResult<()> {
        if let Some(folder) = args.last() {
            self.applied_folders.borrow_mut().push(folder.clone());
        }
        Ok(())
    }

    fn helm(&self, _args: &[String], _dir: Option<&Path>) -> KubeDeployResult<()> {
        Ok(())
    }

    fn helm_repos(&self) -> KubeDeployResult<Vec<HelmRepo>> {
        Ok(Vec::new())
    }
}

struct NoSecrets;

impl SecretDecryptor for NoSecrets {
    fn decrypt(&self, _file: &Path, _keyring_dir: &Path, _key: &str) -> KubeDeployResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Folders are dispatched in non-decreasing order, ties in
    /// declaration order, each exactly once.
    #[test]
    fn property_dispatch_order_is_monotonic(
        orders in prop::collection::vec(prop::option::of(-20i64..20), 1..10),
    ) {
        let fs = MemoryFs::new();
        let units: Vec<DeployUnit> = orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let path = format!("deploy/unit{:02}", i);
                fs.insert(format!("{}/manifest.yaml", path), "kind: ConfigMap");
                let unit = DeployUnit::new(path);
                match order {
                    Some(order) => unit.with_order(*order),
                    None => unit,
                }
            })
            .collect();

        let mut plan = EffectiveConfig::default()
            .with_namespace("web")
            .with_units(units);
        plan.sort_units();

        let cluster = RecordingCluster::default();
        let use_case = DeployUseCase::new(&cluster, NoSecrets, &fs, DeployOptions::new());
        let report = use_case.run(&plan).unwrap();
        prop_assert!(report.is_complete());

        let dispatched = cluster.applied_folders.borrow().clone();
        prop_assert_eq!(dispatched.len(), orders.len());

        let keyed: Vec<(i64, usize)> = dispatched
            .iter()
            .map(|folder| {
                let index: usize = folder.trim_start_matches("deploy/unit").parse().unwrap();
                (orders[index].unwrap_or(0), index)
            })
            .collect();
        for pair in keyed.windows(2) {
            prop_assert!(pair[0] < pair[1], "out of order: {:?}", keyed);
        }

        let applied: Vec<PathBuf> = dispatched.iter().map(PathBuf::from).collect();
        prop_assert_eq!(report.applied, applied);
    }
}

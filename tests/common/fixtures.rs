//! Reusable config folder content.

/// Manifest using variables from the run environment
pub const CONFIG_MAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  namespace: ${NAMESPACE}
data:
  tag: "${IMAGE_TAG}"
  shell: "$HOME_UNSET_VAR"
"#;

pub const JOB: &str = r#"apiVersion: batch/v1
kind: Job
metadata:
  name: migrate
"#;

/// ejson file whose "ciphertext" is readable by the stub decryptor
pub const DB_SECRET: &str = r#"{
  "_public_key": "0000000000000000000000000000000000000000000000000000000000000000",
  "_name": "db",
  "data": {
    "password": "hunter2",
    "port": 5432
  }
}
"#;

/// ejson file without a `_name`
pub const NAMELESS_SECRET: &str = r#"{
  "_public_key": "0000000000000000000000000000000000000000000000000000000000000000",
  "data": { "token": "abc" }
}
"#;

/// Metadata with a default chart and a prod target overlay
pub const METADATA_WITH_TARGETS: &str = r#"namespace: web
releaseName: web
vars:
  IMAGE_TAG: "1.0.0"
helm:
  path: ./chart
targets:
  - name: prod
    namespace: web-prod
    vars:
      IMAGE_TAG: "2.0.0"
    mergeFolders:
      - insteadOf: postdeploy
        path: postdeploy
        renderEngine: kustomize
"#;

/// Metadata listing folders explicitly, one of which does not exist
pub const METADATA_WITH_GAP: &str = r#"Namespace: web
Folders:
  - Path: first
    Order: 1
  - Path: missing
    Order: 2
  - Path: third
    Order: 3
"#;

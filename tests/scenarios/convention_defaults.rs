//! Scenario: Config folder without metadata
//!
//! Journey: A service keeps manifests in the conventional folders and no
//! metadata file; the namespace comes from the command line.
//!
//! Success Criteria:
//! - Namespace is created before anything else
//! - Folders run in convention order with secrets created from ejson files
//! - Variables are expanded in the working copy, unknown ones left alone
//! - The source tree is never modified

use crate::common::*;

fn conventional_env() -> TestEnv {
    let env = TestEnv::new();
    env.write_project_file("deploy/predeploy/settings.yaml", CONFIG_MAP);
    env.write_project_file("deploy/secrets/db.ejson", DB_SECRET);
    env.write_project_file("deploy/postdeploy/job.yaml", JOB);
    env
}

#[test]
fn scenario_conventional_folders_deploy_in_order() {
    let env = conventional_env();

    let result = env.deploy_with_env(&["--namespace", "web"], &[("IMAGE_TAG", "from-env")]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());

    insta::assert_snapshot!(env.invocation_lines().join("\n"), @r"
    kubectl apply --wait -f -
    kubectl apply -R -f <wc>/deploy/predeploy
    ejson --keydir /opt/ejson/keys decrypt <wc>/deploy/secrets/db.ejson
    kubectl apply --wait -f -
    kubectl apply -R -f <wc>/deploy/postdeploy
    ");
}

#[test]
fn scenario_working_copy_is_interpolated() {
    let env = conventional_env();

    let result = env.deploy_with_env(&["--namespace", "web"], &[("IMAGE_TAG", "from-env")]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());

    let calls = env.invocations();
    let namespace = &calls[0];
    assert!(namespace.input.contains(r#""kind":"Namespace""#));
    assert!(namespace.input.contains(r#""name":"web""#));

    let predeploy = &calls[1];
    assert!(predeploy.input.contains("namespace: web"), "{}", predeploy.input);
    assert!(predeploy.input.contains(r#"tag: "from-env""#), "{}", predeploy.input);
    assert!(predeploy.input.contains(r#"shell: "$HOME_UNSET_VAR""#), "{}", predeploy.input);
}

#[test]
fn scenario_secret_is_created_and_source_kept() {
    let env = conventional_env();

    let result = env.deploy(&["--namespace", "web"]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());

    let calls = env.invocations();
    let secret = &calls[3];
    assert!(secret.input.contains(r#""kind":"Secret""#), "{}", secret.input);
    assert!(secret.input.contains(r#""type":"Opaque""#));
    assert!(secret.input.contains(r#""password":"aHVudGVyMg==""#));
    assert!(secret.input.contains(r#""port":"NTQzMg==""#));
    assert!(secret.input.contains(r#""namespace":"web""#));

    assert!(env.project_path("deploy/secrets/db.ejson").exists());
}

#[test]
fn scenario_invalid_secret_is_skipped_and_applied_as_file() {
    let env = TestEnv::new();
    env.write_project_file("deploy/secrets/nameless.ejson", NAMELESS_SECRET);

    let result = env.deploy(&["--namespace", "web"]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());
    assert!(result.stderr.contains("_name can not be blank"), "{}", result.stderr);

    assert_eq!(
        env.invocation_lines(),
        vec![
            "kubectl apply --wait -f -".to_string(),
            "kubectl apply -R -f <wc>/deploy/secrets".to_string(),
        ]
    );
}

#[test]
fn scenario_failed_apply_aborts_run() {
    let env = conventional_env();

    let result = env.deploy_with_env(&["--namespace", "web"], &[("STUB_KUBECTL_FAIL", "1")]);
    assert!(!result.success);
    assert_ne!(result.exit_code, 0);

    let output = result.combined_output();
    assert!(output.contains("deploy/predeploy"), "{}", output);
    assert!(output.contains("exit code 1"), "{}", output);

    // namespace plus the failing folder, nothing after it
    assert_eq!(env.invocations().len(), 2);
}

#[test]
fn scenario_missing_namespace_fails_before_cluster_calls() {
    let env = conventional_env();

    let result = env.deploy(&[]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("namespace can not be empty"),
        "{}",
        result.stderr
    );
    assert!(env.invocations().is_empty());
}

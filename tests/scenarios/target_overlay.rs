//! Scenario: Target overlay on top of conventional folders
//!
//! Journey: The metadata declares a default helm chart and a `prod` target
//! that swaps the postdeploy folder to kustomize and overrides variables.
//!
//! Success Criteria:
//! - Target namespace and vars win over the root ones
//! - helmvalues is released with the default chart and the plan's release name
//! - The overlaid folder keeps its position but changes render engine

use crate::common::*;

fn overlay_env() -> TestEnv {
    let env = TestEnv::new();
    env.write_project_file("deploy/metadata.yml", METADATA_WITH_TARGETS);
    env.write_project_file("deploy/predeploy/settings.yaml", CONFIG_MAP);
    env.write_project_file("deploy/helmvalues/values.yaml", "replicas: 2\n");
    env.write_project_file("deploy/postdeploy/job.yaml", JOB);
    env
}

#[test]
fn scenario_prod_target_overlays_postdeploy() {
    let env = overlay_env();

    let result = env.deploy(&["--target", "prod"]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());

    insta::assert_snapshot!(env.invocation_lines().join("\n"), @r"
    kubectl apply --wait -f -
    kubectl apply -R -f <wc>/deploy/predeploy
    helm upgrade --wait --install -n web-prod web ./chart -f <wc>/deploy/helmvalues/values.yaml
    kubectl apply -k <wc>/deploy/postdeploy
    ");

    let calls = env.invocations();
    assert!(calls[0].input.contains(r#""name":"web-prod""#));
    assert!(calls[1].input.contains(r#"tag: "2.0.0""#), "{}", calls[1].input);
}

#[test]
fn scenario_without_target_uses_root_config() {
    let env = overlay_env();

    let result = env.deploy(&[]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());

    let lines = env.invocation_lines();
    assert_eq!(
        lines[2],
        "helm upgrade --wait --install -n web web ./chart -f <wc>/deploy/helmvalues/values.yaml"
    );
    assert_eq!(lines[3], "kubectl apply -R -f <wc>/deploy/postdeploy");
    assert!(env.invocations()[1].input.contains(r#"tag: "1.0.0""#));
}

#[test]
fn scenario_target_from_environment() {
    let env = overlay_env();

    let result = env.deploy_with_env(&[], &[("KUBE_DEPLOY_TARGET", "prod")]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());
    assert!(env.invocation_lines()[2].contains("-n web-prod"));
}

#[test]
fn scenario_unknown_target_is_a_configuration_error() {
    let env = overlay_env();

    let result = env.deploy(&["--target", "staging"]);
    assert!(!result.success);
    assert!(
        result
            .stderr
            .contains("unable to find target staging in target list"),
        "{}",
        result.stderr
    );
    assert!(env.invocations().is_empty());
}

#[test]
fn scenario_unresolved_instead_of_names_the_path() {
    let env = TestEnv::new();
    env.write_project_file(
        "deploy/metadata.yml",
        "namespace: web\ntargets:\n  - name: prod\n    mergeFolders:\n      - insteadOf: cleanup\n        renderEngine: kustomize\n",
    );
    env.write_project_file("deploy/predeploy/settings.yaml", CONFIG_MAP);

    let result = env.deploy(&["--target", "prod"]);
    assert!(!result.success);
    assert!(
        result
            .stderr
            .contains("unable to find referenced path deploy/cleanup"),
        "{}",
        result.stderr
    );
    assert!(env.invocations().is_empty());
}

//! Scenario: Explicit folder list with a gap
//!
//! Journey: The metadata lists three folders but the second one was never
//! created in this repository.
//!
//! Success Criteria:
//! - Folders before the gap are applied
//! - The run stops at the missing folder and still exits successfully
//! - An existing but empty folder is skipped and the run goes on

use crate::common::*;

#[test]
fn scenario_run_stops_at_missing_folder() {
    let env = TestEnv::new();
    env.write_project_file("deploy/metadata.yml", METADATA_WITH_GAP);
    env.write_project_file("deploy/first/a.yaml", JOB);
    env.write_project_file("deploy/third/c.yaml", JOB);

    let result = env.deploy(&[]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());
    assert!(
        result.stderr.contains("folder deploy/missing not found"),
        "{}",
        result.stderr
    );

    assert_eq!(
        env.invocation_lines(),
        vec![
            "kubectl apply --wait -f -".to_string(),
            "kubectl apply -R -f <wc>/deploy/first".to_string(),
        ]
    );
}

#[test]
fn scenario_empty_folder_is_skipped_not_a_stop() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.project_path("deploy/predeploy")).unwrap();
    env.write_project_file("deploy/postdeploy/job.yaml", JOB);

    let result = env.deploy(&["--namespace", "web"]);
    assert!(result.success, "deploy failed:\n{}", result.combined_output());
    assert!(
        !result.stderr.contains("folder deploy/predeploy not found"),
        "{}",
        result.stderr
    );

    assert_eq!(
        env.invocation_lines(),
        vec![
            "kubectl apply --wait -f -".to_string(),
            "kubectl apply -R -f <wc>/deploy/postdeploy".to_string(),
        ]
    );
}

//! Test environment for driving the kube-deploy binary.
//!
//! Provides `TestEnv` - a temp project holding a config folder, a temp HOME,
//! and stub `kubectl`/`helm`/`ejson`/`ssh` scripts on `PATH` that append
//! every invocation to a log instead of touching a cluster.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a kube-deploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// One stub tool invocation from the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: String,
    pub args: Vec<String>,
    /// Anything the tool read on stdin or, for folder applies, the folder's files
    pub input: String,
}

impl Invocation {
    pub fn line(&self) -> String {
        format!("{} {}", self.tool, self.args.join(" "))
    }
}

/// `kubectl` stub: logs args, echoes stdin for `-f -` and file contents for
/// folder applies. `STUB_KUBECTL_FAIL` makes every folder apply fail.
const KUBECTL_STUB: &str = r#"#!/bin/sh
log="$STUB_LOG"
printf '>>> kubectl' >> "$log"
for arg in "$@"; do printf ' %s' "$arg" >> "$log"; done
printf '\n' >> "$log"
last=""
for arg in "$@"; do last="$arg"; done
if [ "$last" = "-" ]; then
  cat >> "$log"
  printf '\n' >> "$log"
  exit 0
fi
if [ -n "$STUB_KUBECTL_FAIL" ]; then
  echo "stub kubectl failure" >&2
  exit 1
fi
if [ -d "$last" ]; then
  find "$last" -type f | sort | while read -r f; do cat "$f" >> "$log"; done
fi
exit 0
"#;

/// `helm` stub: logs args; `repo list` prints an empty JSON list
const HELM_STUB: &str = r#"#!/bin/sh
log="$STUB_LOG"
printf '>>> helm' >> "$log"
for arg in "$@"; do printf ' %s' "$arg" >> "$log"; done
printf '\n' >> "$log"
if [ "$1" = "repo" ] && [ "$2" = "list" ]; then
  echo "[]"
fi
exit 0
"#;

/// `ejson` stub: "decrypts" by printing the file given as last argument
const EJSON_STUB: &str = r#"#!/bin/sh
log="$STUB_LOG"
printf '>>> ejson' >> "$log"
for arg in "$@"; do printf ' %s' "$arg" >> "$log"; done
printf '\n' >> "$log"
last=""
for arg in "$@"; do last="$arg"; done
cat "$last"
"#;

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory holding the config source (a git top-level)
    pub project_root: TempDir,
    /// Temporary directory for HOME
    pub home_dir: TempDir,
    /// Stub tools and their invocation log
    tools_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            project_root: TempDir::new().unwrap(),
            home_dir: TempDir::new().unwrap(),
            tools_dir: TempDir::new().unwrap(),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_kube-deploy")),
        };

        std::fs::create_dir_all(env.project_path(".git")).unwrap();
        std::fs::write(env.kubeconfig_path(), "apiVersion: v1\nkind: Config\n").unwrap();
        env.install_stub("kubectl", KUBECTL_STUB);
        env.install_stub("helm", HELM_STUB);
        env.install_stub("ejson", EJSON_STUB);
        env
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn kubeconfig_path(&self) -> PathBuf {
        self.home_dir.path().join("kubeconfig")
    }

    fn log_path(&self) -> PathBuf {
        self.tools_dir.path().join("invocations.log")
    }

    #[cfg(unix)]
    fn install_stub(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.tools_dir.path().join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(not(unix))]
    fn install_stub(&self, _name: &str, _script: &str) {}

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Run kube-deploy from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run kube-deploy with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let path = match std::env::var_os("PATH") {
            Some(existing) => {
                let mut paths = vec![self.tools_dir.path().to_path_buf()];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths).unwrap()
            }
            None => self.tools_dir.path().as_os_str().to_owned(),
        };

        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("PATH", path)
            .env("HOME", self.home_dir.path())
            .env("STUB_LOG", self.log_path())
            .env("RUST_LOG", "info");
        for var in [
            "KUBE_CONFIG",
            "KUBECONFIG",
            "KUBE_DEPLOY_CONFIG_FOLDER",
            "KUBE_DEPLOY_CONFIG_REPO",
            "KUBE_DEPLOY_TARGET",
            "KUBE_DEPLOY_METADATA_FILE",
            "KUBE_DEPLOY_GLOBAL_VARS",
            "EJSON_KEY",
            "EJSON_KEY_PATH",
            "EJSON_KEYDIR",
        ] {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute kube-deploy");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// `deploy` against `deploy/` with the test kubeconfig
    pub fn deploy(&self, extra: &[&str]) -> TestResult {
        self.deploy_with_env(extra, &[])
    }

    pub fn deploy_with_env(&self, extra: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let kubeconfig = self.kubeconfig_path();
        let mut args = vec![
            "deploy",
            "--config-folder",
            "deploy",
            "--kubeconfig",
            kubeconfig.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        self.run_with_env(&args, env_vars)
    }

    /// Parsed stub invocations, in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        let log = std::fs::read_to_string(self.log_path()).unwrap_or_default();
        let mut calls: Vec<Invocation> = Vec::new();

        for line in log.lines() {
            if let Some(call) = line.strip_prefix(">>> ") {
                let mut parts = call.split(' ').map(str::to_string);
                let tool = parts.next().unwrap_or_default();
                calls.push(Invocation {
                    tool,
                    args: parts.collect(),
                    input: String::new(),
                });
            } else if let Some(last) = calls.last_mut() {
                last.input.push_str(line);
                last.input.push('\n');
            }
        }
        calls
    }

    /// Invocation lines with the working copy prefix replaced by `<wc>`
    pub fn invocation_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|call| mask_working_copy(&call.line()))
            .collect()
    }
}

/// Replace the temporary working copy root (`/tmp/kube-deployXXXX`) by `<wc>`
pub fn mask_working_copy(line: &str) -> String {
    line.split(' ')
        .map(|part| match part.find("/deploy/") {
            Some(idx) if Path::new(part).is_absolute() => format!("<wc>{}", &part[idx..]),
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

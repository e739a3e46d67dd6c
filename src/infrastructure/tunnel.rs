//! SSH bastion tunnel
//!
//! Forwards the Kubernetes API through a bastion host with an `ssh -N -L`
//! child process. A background thread watches the child and logs an early
//! exit; the tunnel is torn down when the handle is dropped.

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::entities::Bastion;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// `ssh` arguments for `bastion`
pub fn ssh_args(bastion: &Bastion) -> Vec<String> {
    let destination = if bastion.user.is_empty() {
        bastion.host.clone()
    } else {
        format!("{}@{}", bastion.user, bastion.host)
    };

    let mut args = vec![
        "-N".to_string(),
        "-o".to_string(),
        "ExitOnForwardFailure=yes".to_string(),
        "-L".to_string(),
        format!(
            "{}:{}:{}",
            bastion.local_port,
            bastion.remote_host(),
            bastion.remote_port
        ),
    ];
    if !bastion.key_file.is_empty() {
        args.push("-i".to_string());
        args.push(bastion.key_file.clone());
    }
    args.push(destination);
    args
}

pub struct Tunnel {
    child: Arc<Mutex<Child>>,
    stopping: Arc<AtomicBool>,
    monitor: Option<JoinHandle<()>>,
}

impl Tunnel {
    /// Open a tunnel for an active bastion
    ///
    /// Returns `None` when the bastion is disabled or ssh cannot be started;
    /// the latter is logged and the run continues.
    pub fn open(bastion: &Bastion) -> Option<Self> {
        if !bastion.is_active() {
            info!("bastion ssh connection disabled");
            return None;
        }
        Self::spawn(Command::new("ssh").args(ssh_args(bastion)))
    }

    fn spawn(cmd: &mut Command) -> Option<Self> {
        cmd.stdin(Stdio::null());
        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!("error starting ssh tunnel: {}", err);
                return None;
            }
        };
        info!("ssh tunnel started (pid {})", child.id());

        let child = Arc::new(Mutex::new(child));
        let stopping = Arc::new(AtomicBool::new(false));
        let monitor = {
            let child = Arc::clone(&child);
            let stopping = Arc::clone(&stopping);
            thread::spawn(move || watch(child, stopping))
        };

        Some(Self {
            child,
            stopping,
            monitor: Some(monitor),
        })
    }

    pub fn stop(&mut self) {
        if self.stopping.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Ok(mut child) = self.child.lock() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
        if let Some(monitor) = self.monitor.take() {
            let _ = monitor.join();
        }
        debug!("ssh tunnel stopped");
    }
}

impl Drop for Tunnel {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch(child: Arc<Mutex<Child>>, stopping: Arc<AtomicBool>) {
    while !stopping.load(Ordering::SeqCst) {
        let status = match child.lock() {
            Ok(mut child) => child.try_wait(),
            Err(_) => return,
        };
        match status {
            Ok(Some(status)) => {
                if !stopping.load(Ordering::SeqCst) {
                    warn!("ssh tunnel exited early with {}", status);
                }
                return;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                warn!("unable to watch ssh tunnel: {}", err);
                return;
            }
        }
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use kube_deploy::domain::services::expand;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = expand(content, |name| Some(name.to_lowercase()));
        let _ = expand(content, |_| None);
    }
});

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

use kube_deploy::domain::entities::GlobalVars;
use kube_deploy::domain::services::parse_yaml;
use kube_deploy::RawMetadata;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Metadata parsing must reject bad input with an error, never a panic
        if let Ok(metadata) = parse_yaml::<RawMetadata>(Path::new("metadata.yml"), content) {
            let _ = metadata.base();
            for target in &metadata.targets {
                let _ = target.config();
            }
        }

        let _ = parse_yaml::<GlobalVars>(Path::new("global_vars.yml"), content);
    }
});

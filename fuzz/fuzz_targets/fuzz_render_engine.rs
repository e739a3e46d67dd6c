#![no_main]

use libfuzzer_sys::fuzz_target;

use kube_deploy::RenderEngine;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(engine) = content.parse::<RenderEngine>() {
            // Whatever parses must print back to a name that parses the same
            assert_eq!(engine.as_str().parse::<RenderEngine>(), Ok(engine));
        }
    }
});

#![no_main]

use keypad_gate::Instance;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes and call every export that survives validation
    if let Ok(instance) = Instance::instantiate(data) {
        for export in &instance.module().exports {
            let _ = instance.call(&export.name, 4);
        }
    }
});

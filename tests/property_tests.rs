//! Property-based tests for the keypad gate

mod common;

use common::{ScriptedHost, CODE};
use keypad_gate::module::Module;
use keypad_gate::stages::default_chain;
use keypad_gate::*;
use proptest::prelude::*;

// Property test: XOR decoding is its own inverse
proptest! {
    #[test]
    fn xor_is_an_involution(bytes in prop::collection::vec(any::<u8>(), 0..256), key in any::<u8>()) {
        let once = xor_decode(&bytes, key);
        prop_assert_eq!(xor_decode(&once, key), bytes.clone());

        let mut in_place = bytes;
        xor_in_place(&mut in_place, key);
        prop_assert_eq!(in_place, once);
    }
}

// Property test: the module decoder rejects garbage without panicking
proptest! {
    #[test]
    fn decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Module::decode(&bytes);
        let _ = Instance::instantiate(&bytes);
    }

    #[test]
    fn decoder_never_panics_past_the_header(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut bytes = b"\0asm\x01\0\0\0".to_vec();
        bytes.extend_from_slice(&body);
        if let Ok(instance) = Instance::instantiate(&bytes) {
            for export in &instance.module().exports {
                let _ = instance.call(&export.name, 4);
            }
        }
    }
}

// Property test: every stage accepts exactly its own digit over the whole i32 range
proptest! {
    #[test]
    fn stages_accept_only_their_digit(input in any::<i32>()) {
        let host = ScriptedHost::at(0);
        for (stage, &digit) in default_chain().iter().zip(CODE.iter()) {
            let accepted = stage.validator.evaluate(&host, input).unwrap_or(false);
            prop_assert_eq!(accepted, input == digit, "{} on {}", stage.id, input);
        }
    }
}

// Property test: a wrong press on any resetting stage past the first lands on stage 1
proptest! {
    #[test]
    fn wrong_press_resets(depth in 1usize..7, wrong in 1i32..=9) {
        prop_assume!(depth != 4);
        prop_assume!(wrong != CODE[depth]);

        let mut gate = Gate::new(ScriptedHost::at(1_000), &GateConfig::default());
        gate.boot();
        for (i, &digit) in CODE[..depth].iter().enumerate() {
            if i == 4 {
                gate.host_mut().advance(2);
            }
            gate.handle(digit);
        }
        prop_assert_eq!(gate.handle(wrong), Hook::FIRST);
        prop_assert_eq!(gate.first_success(), None);
    }
}

// Property test: any press sequence leaves the hook in a state it could legally reach
proptest! {
    #[test]
    fn arbitrary_presses_stay_in_bounds(presses in prop::collection::vec((1i32..=9, 0u64..3), 0..32)) {
        let mut gate = Gate::new(ScriptedHost::at(1_000), &GateConfig::default());
        gate.boot();
        let observer = gate.observer();
        for (press, pause) in presses {
            gate.host_mut().advance(pause);
            let hook = gate.handle(press);
            prop_assert_eq!(hook, observer.load());
            prop_assert!(hook != Hook::Disarmed);
            if hook == Hook::Terminal {
                prop_assert_eq!(gate.host().notices.len(), 1);
            } else {
                prop_assert!(gate.host().notices.is_empty());
            }
        }
    }
}

use std::{env, fs, path::Path};

// Bakes the BLAKE3 digest of the breakpoint probe into the crate so the guard
// can compare it against the live rendering at runtime.
fn main() {
    let probe = Path::new("src").join("probe.rs");
    println!("cargo:rerun-if-changed={}", probe.display());

    let source = fs::read(&probe)
        .unwrap_or_else(|e| panic!("reading {}: {e}", probe.display()));
    let digest = blake3::hash(&source);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out = Path::new(&out_dir).join("probe_digest.rs");
    let body = format!(
        "/// BLAKE3 digest of `src/probe.rs` captured at build time.\n\
         pub const PROBE_DIGEST: [u8; 32] = {:?};\n",
        digest.as_bytes()
    );
    fs::write(&out, body).unwrap_or_else(|e| panic!("writing {}: {e}", out.display()));
}

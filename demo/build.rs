use std::{env, fs, path::PathBuf};

fn main() {
    let memory = if env::var_os("CARGO_FEATURE_TINY_RAM").is_some() {
        "memory/tiny-ram.x"
    } else {
        "memory/lm3s6965.x"
    };

    // `link.x` of cortex-m-rt does `INCLUDE memory.x`
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::copy(memory, out.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=memory");
    println!("cargo:rerun-if-changed=build.rs");
}

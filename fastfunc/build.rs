use std::env;

fn main() {
    let target = env::var("TARGET").unwrap();

    // Hosted targets map `.data` without execute permission
    if env::var_os("CARGO_FEATURE_CODE_IN_RAM").is_some() && !target.contains("-none") {
        println!(
            "cargo:warning=`code-in-ram` is enabled for the hosted target `{target}`: \
             `#[fast_func]` functions land in non-executable memory and must not be called"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}

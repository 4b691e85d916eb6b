// Builds the wasm bundle with wasm-pack and stages static/ into dist/.
use std::process::Command;
use std::{env, fs, path::Path};

use fs_extra::dir::CopyOptions;

#[path = "build/wasm_pack.rs"]
mod wasm_pack;

fn main() {
    println!("cargo:rerun-if-changed=static");
    println!("cargo:rerun-if-env-changed={}", wasm_pack::OPT_IN_VAR);

    let target = env::var("TARGET").unwrap_or_default();
    let opt_in = env::var(wasm_pack::OPT_IN_VAR).ok();
    if wasm_pack::should_run(&target, opt_in.as_deref()) {
        let out = env::var("OUT_DIR").unwrap_or_else(|_| "target".into());
        let target_dir = Path::new(&out).join("wasm-pack");
        // The child must not recurse into this branch.
        let status = Command::new("wasm-pack")
            .args(wasm_pack::args(&target_dir.to_string_lossy()))
            .env_remove(wasm_pack::OPT_IN_VAR)
            .env("CARGO_TARGET_DIR", &target_dir)
            .status();

        match status {
            Ok(st) if !st.success() => println!("cargo:warning=wasm-pack build failed"),
            Ok(_) => {}
            Err(_) => println!("cargo:warning=wasm-pack not installed, skipping"),
        }
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    if let Err(err) = fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create dist/: {err}");
        return;
    }

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions::new().content_only(true).overwrite(true);
        if let Err(err) = fs_extra::dir::copy(static_dir, out_dir, &options) {
            println!("cargo:warning=copying static/ failed: {err}");
        }
    }
}

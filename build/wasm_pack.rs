// When build.rs may shell out to wasm-pack, and how.

/// Opt-in switch for the nested `wasm-pack` build.
pub const OPT_IN_VAR: &str = "SITE_FX_WASM_PACK";

/// The nested build runs only for wasm32 and only when asked for. An
/// outer `cargo build` holds the package lock, so an unconditional
/// nested build would wait on it forever.
pub fn should_run(target: &str, opt_in: Option<&str>) -> bool {
    target.starts_with("wasm32-") && matches!(opt_in, Some(v) if v == "1" || v == "true")
}

/// Arguments for the nested `wasm-pack` call. `target_dir` keeps its
/// artifacts and lock apart from the outer build's.
pub fn args(target_dir: &str) -> Vec<String> {
    ["build", "--release", "--target", "web", "--", "--target-dir", target_dir]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// File: crates/perfchart-core/build.rs
// Summary: Links the Windows system libraries Skia needs for font and registry lookups.

fn main() {
    // RegOpenKeyExW and friends, pulled in by Skia's font manager
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        println!("cargo:rustc-link-lib=advapi32");
    }
}

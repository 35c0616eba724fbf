// build.rs: sets `cfg(has_sparse_files)` when building for a Unix family
// target. Seeking past the end of a file there leaves a hole, which the
// sparse output writer relies on; other targets get plain writes.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let family = std::env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    if family.split(',').any(|f| f == "unix") {
        println!("cargo:rustc-cfg=has_sparse_files");
    }
}

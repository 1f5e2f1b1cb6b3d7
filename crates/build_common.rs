// Shared build-script helper: renders a crate's README.md into OUT_DIR so
// lib.rs can embed it as crate-level rustdoc.
//
// Include from a crate's build.rs with: include!("../build_common.rs");
// The including file must import std::env, std::fs, and std::path::Path.

/// Copy README.md to `OUT_DIR/README_GENERATED.md`, rewriting source links
/// (`src/foo.rs`) into module links rustdoc can resolve.
fn render_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(readme).unwrap_or_default();

    let rendered = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(Path::new(&out_dir).join("README_GENERATED.md"), rendered).unwrap();
}

//! CLI entry point for generating foreign-language bindings.

fn main() {
    uniffi::uniffi_bindgen_main();
}

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the test logger exactly once per process. Harmless to call
/// from every test; safe under `cargo test`'s parallel harness.
pub fn init() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

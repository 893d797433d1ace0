use std::sync::Once;

use tracing_wasm::WASMLayerConfigBuilder;

use crate::config::LogLevel;

static INIT: Once = Once::new();

/// Routes panics and `tracing` events to the browser console. Only the first
/// call on a page takes effect.
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let config = WASMLayerConfigBuilder::new()
            .set_max_level(level.as_tracing())
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}

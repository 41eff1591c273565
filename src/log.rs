//! Verbosity-gated stderr diagnostics.
//!
//! The crate has no need for structured log records or multiple sinks: a
//! single global level plus a gated `eprintln!` is all the codec and CLI
//! ever want. 0 = silent, 1 = errors, 2 = results, 3 = progress, 4 = verbose.

use std::sync::atomic::{AtomicI32, Ordering};

/// Global notification level, set once by the CLI from its `-v`/`-q` flags.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(1);

/// Sets the global notification level.
pub fn set_display_level(level: i32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Returns the current global notification level.
pub fn display_level() -> i32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Writes `msg` to stderr if the current notification level is `>= level`.
#[inline]
pub fn display(level: i32, msg: &str) {
    if display_level() >= level {
        eprint!("{}", msg);
    }
}

/// Like [`display`] but formats its arguments, mirroring the `DISPLAYLEVEL`
/// macro idiom: `log_at!(3, "wrote {} faces\n", n_face)`.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        $crate::log::display($level, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_gates_output() {
        set_display_level(2);
        assert_eq!(display_level(), 2);
        set_display_level(1);
    }
}

//! Shared switches read by the print hook.

use std::sync::atomic::{AtomicBool, Ordering};

/// Settings owned by the host application.
///
/// `override_print` decides whether [`Logger::print`](crate::Logger::print)
/// redirects into the verbose log path or writes straight to the output stream.
#[derive(Debug, Default)]
pub struct LogsSettings {
    override_print: AtomicBool,
}

impl LogsSettings {
    pub fn new(override_print: bool) -> Self {
        Self {
            override_print: AtomicBool::new(override_print),
        }
    }

    pub fn override_print(&self) -> bool {
        self.override_print.load(Ordering::SeqCst)
    }

    pub fn set_override_print(&self, value: bool) {
        self.override_print.store(value, Ordering::SeqCst);
    }
}

//! Console log output.
//!
//! Drains both log streams of a `Shared` block into any `fmt::Write` sink:
//! the UART on the device, stdout on the host simulator. Runs from the main
//! loop, never from an interrupt.
//!
//! Line format: `[at_ms] LEVEL: message\n`

use core::fmt::Write;

use crate::logging::LogEntry;
use crate::shared::Shared;

/// Write one entry as a console line.
pub fn write_log_entry(out: &mut dyn Write, entry: &LogEntry) -> core::fmt::Result {
    write!(
        out,
        "[{:8}] {}: {}\n",
        entry.at_ms,
        entry.level.label(),
        entry.text()
    )
}

/// Drain everything pending, interrupt stream first.
///
/// Dropped-message counters are reported (and cleared) once non-zero.
/// Returns the number of entries written.
pub fn drain_logs(shared: &Shared, out: &mut dyn Write) -> usize {
    let mut written = 0;

    while let Some(entry) = shared.isr_log.drain() {
        let _ = write_log_entry(out, &entry);
        written += 1;
    }

    while let Some(entry) = shared.task_log.drain() {
        let _ = write_log_entry(out, &entry);
        written += 1;
    }

    let isr_dropped = shared.isr_log.dropped();
    let task_dropped = shared.task_log.dropped();
    if isr_dropped > 0 || task_dropped > 0 {
        let _ = write!(out, "[WARN] Dropped: ISR={}, TASK={}\n", isr_dropped, task_dropped);
        shared.isr_log.reset_dropped();
        shared.task_log.reset_dropped();
    }

    written
}

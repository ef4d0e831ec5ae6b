use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Bar currently drawn at the bottom of the terminal, if any.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    pub fn start(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.blue} {msg} [{bar:32.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▆▁");

        bar.set_style(style);
        bar.set_message("Sweeping ports");
        bar.enable_steady_tick(Duration::from_millis(100));

        *ACTIVE_BAR.lock().unwrap_or_else(PoisonError::into_inner) = Some(bar.clone());
        Self { bar }
    }

    /// Handle for the sweep's progress callback.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.bar.set_message(msg.into());
    }

    pub fn finish(self) {
        ACTIVE_BAR
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.bar.finish_and_clear();
    }
}

/// Log sink that prints above an active progress bar instead of through it.
pub struct TerminalWriter;

impl Write for TerminalWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let active = ACTIVE_BAR.lock().unwrap_or_else(PoisonError::into_inner);
        match active.as_ref() {
            Some(bar) => {
                let msg = String::from_utf8_lossy(buf);
                bar.println(msg.trim_end());
            }
            None => std::io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}

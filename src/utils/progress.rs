//! Progress reporting wrapper around [indicatif]

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar sized for `len` units of work.
pub fn get_progressbar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{prefix} {wide_bar} {pos:>9}/{len:9} [{elapsed_precise}] eta: {eta}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

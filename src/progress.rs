//! Progress bars for per-item loops
//!
//! Bars draw on stderr and stay hidden when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg:<16} [{bar:40}] {pos}/{len} ({elapsed})";

/// Creates a bar of `len` steps labelled `message`
pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template(TEMPLATE)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar.set_message(message);
    bar
}

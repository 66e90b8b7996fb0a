//! Progress bar for a checking run

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Bar template; falls back to the indicatif default if it is rejected
const TEMPLATE: &str =
    "{msg} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})";

/// Create a visible progress bar for `total` candidates
pub fn checking_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);

    if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar.set_message("Checking proxies");
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// A bar that draws nothing, for tests and non-interactive use
pub fn hidden_bar() -> ProgressBar {
    ProgressBar::hidden()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_counts() {
        let bar = hidden_bar();
        bar.set_length(3);
        bar.inc(1);
        bar.inc(1);
        assert_eq!(bar.position(), 2);
        assert_eq!(bar.length(), Some(3));
    }

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::default_bar().template(TEMPLATE).is_ok());
    }
}

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Bar ticking once per pipeline stage; hidden when progress output is off.
pub fn stage_bar(stages: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(stages);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

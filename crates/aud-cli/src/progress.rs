use std::sync::Arc;

use aud_client::ProgressSink;
use aud_core::UploadProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Byte progress bar for uploads, drawn on stderr so stdout stays parseable.
pub struct Progress {
    bar: ProgressBar,
}

fn bar_template() -> &'static str {
    match std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
    {
        Some(cols) if cols >= 100 => "{bar:40.cyan/blue} {bytes}/{total_bytes} {percent}% {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn upload(message: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
        };
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Feed the bar from upload progress events.
    #[must_use]
    pub fn sink(&self) -> ProgressSink {
        let bar = self.bar.clone();
        Arc::new(move |progress: UploadProgress| {
            if bar.length() != Some(progress.total) {
                bar.set_length(progress.total);
            }
            bar.set_position(progress.loaded);
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use aud_core::UploadProgress;
    use pretty_assertions::assert_eq;

    use super::Progress;

    #[test]
    fn sink_tracks_loaded_and_total() {
        let progress = Progress::upload("test", true);
        let sink = progress.sink();

        sink(UploadProgress::new(10, 40));
        assert_eq!(progress.bar.length(), Some(40));
        assert_eq!(progress.bar.position(), 10);

        sink(UploadProgress::new(40, 40));
        assert_eq!(progress.bar.position(), 40);
        progress.finish();
    }
}

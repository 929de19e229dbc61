//! Terminal binding for playback events

use pariszik_core::{ContentId, MediaItem};
use pariszik_playback::{format_duration, ErrorKind, PlayerUi, Volume};
use std::io::Write;
use std::time::Duration;

/// Writes one line per UI callback
pub struct ConsoleUi<W: Write> {
    out: W,
}

impl<W: Write> ConsoleUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %err, "Failed to write UI line");
        }
    }
}

impl<W: Write> PlayerUi for ConsoleUi<W> {
    fn on_play_state_changed(&mut self, is_playing: bool) {
        self.line(format_args!("{}", if is_playing { "▶ playing" } else { "⏸ paused" }));
    }

    fn on_track_changed(&mut self, item: &MediaItem) {
        self.line(format_args!("♪ {} - {} [{}]", item.title, item.artist, item.id));
    }

    fn on_progress(&mut self, position: Duration, duration: Option<Duration>) {
        let total = duration.map_or_else(|| "--:--".to_string(), format_duration);
        self.line(format_args!("  {} / {}", format_duration(position), total));
    }

    fn on_volume_changed(&mut self, volume: f32, muted: bool) {
        let mut state = Volume::new(volume);
        if muted {
            state.mute();
        }
        self.line(format_args!(
            "  volume {:.0}% ({:?})",
            volume * 100.0,
            state.indicator()
        ));
    }

    fn on_favorite_changed(&mut self, id: &ContentId, is_favorite: bool) {
        let mark = if is_favorite { "♥" } else { "♡" };
        self.line(format_args!("{} {}", mark, id));
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        self.line(format_args!("! {:?} error: {}", kind, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pariszik_playback::PlaybackEvent;

    fn render(events: &[PlaybackEvent]) -> String {
        let mut ui = ConsoleUi::new(Vec::new());
        for event in events {
            event.dispatch(&mut ui);
        }
        String::from_utf8(ui.into_inner()).unwrap()
    }

    #[test]
    fn renders_progress_and_state() {
        let output = render(&[
            PlaybackEvent::PlayStateChanged { is_playing: true },
            PlaybackEvent::Progress {
                position: Duration::from_secs(65),
                duration: Some(Duration::from_secs(200)),
            },
            PlaybackEvent::Progress {
                position: Duration::from_secs(5),
                duration: None,
            },
        ]);

        assert_eq!(output, "▶ playing\n  1:05 / 3:20\n  0:05 / --:--\n");
    }

    #[test]
    fn renders_muted_volume() {
        let output = render(&[PlaybackEvent::VolumeChanged {
            volume: 0.8,
            muted: true,
        }]);
        assert_eq!(output, "  volume 80% (Muted)\n");
    }
}

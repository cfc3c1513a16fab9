// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless `OrdoPlay` transport host.
//!
//! Drives a transport panel against an in-memory timeline at 60 ticks per
//! second and replays a fixed script of key chords, logging what the panel
//! would draw. Pass a RON options file as the first argument to override
//! shortcuts or timescales.

use ordoplay_transport::{
    LabelSupport, PanelOptions, PanelSettings, PanelView, ProgressStyles, SequenceTimeline,
    TimelineAdapter, TransportPanel,
};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TICK: f64 = 1.0 / 60.0;
const TICKS: usize = 600;

/// Key chords pressed at given ticks
const SCRIPT: &[(usize, &str)] = &[
    (0, "space"),
    (60, "b"),
    (150, "n"),
    (300, "option+up"),
    (360, "2"),
    (420, "shift+space"),
    (450, "shift+option+left"),
    (480, "1"),
    (540, "shift+x"),
    (570, "return"),
];

/// View that logs state changes instead of drawing them
#[derive(Default)]
struct LogView {
    last_time: f64,
}

impl PanelView for LogView {
    fn on_play_state_changed(&mut self, is_playing: bool) {
        tracing::info!("{}", if is_playing { "Playing" } else { "Paused" });
    }

    fn on_range_changed(&mut self, loop_in: Option<f64>, loop_out: Option<f64>, showing: bool) {
        tracing::info!("Range {loop_in:?}..{loop_out:?} (shown: {showing})");
    }

    fn on_time_changed(&mut self, time: f64) {
        if (time - self.last_time).abs() >= 0.5 || time < self.last_time {
            tracing::info!("t = {time:.2}");
            self.last_time = time;
        }
    }

    fn on_timescale_changed(&mut self, timescale: f64) {
        tracing::info!("Timescale {timescale}x");
    }

    fn on_labels_changed(&mut self, labels: &LabelSupport) {
        match labels {
            LabelSupport::Unsupported => tracing::info!("Labels unsupported by this timeline"),
            LabelSupport::Available(labels) => {
                for label in labels {
                    tracing::info!("Label '{}' at {}", label.name, label.time);
                }
            }
        }
    }

    fn on_redraw(&mut self, styles: &ProgressStyles) {
        if let Some(band) = styles.band {
            tracing::debug!("Band {:.1}% wide at {:.1}%", band.width, band.start);
        }
    }
}

fn load_options() -> PanelOptions {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return PanelOptions::default();
    };
    match PanelOptions::load(&path) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("Failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ordoplay_transport=debug,ordoplay_transport_demo=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrdoPlay transport demo v{}", env!("CARGO_PKG_VERSION"));

    let settings = PanelSettings::from_options(&load_options());
    let timeline = SequenceTimeline::new(4.0)
        .with_label("anticipation", 0.5)
        .with_label("impact", 2.0)
        .with_label("settle", 3.25);
    let mut panel = TransportPanel::new(timeline, LogView::default(), settings);

    let mut script = SCRIPT.iter().peekable();
    for tick in 0..TICKS {
        while let Some((_, chord)) = script.next_if(|(at, _)| *at == tick) {
            match panel.handle_chord_str(chord) {
                Ok(Some(command)) => tracing::info!("[{chord}] -> {command}"),
                Ok(None) => tracing::warn!("[{chord}] is not bound"),
                Err(e) => tracing::warn!("[{chord}] failed: {e}"),
            }
        }

        panel.controller_mut().timeline_mut().advance(TICK);
        panel.tick();
    }

    let timeline = panel.teardown();
    tracing::info!("Finished at t = {:.2}", timeline.time());
}

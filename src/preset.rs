//! Built-in Entrainment Presets
//!
//! Curated base/beat frequency pairs for common session goals. The engine
//! only consumes the numeric fields; name and description are display data.

use serde::Serialize;

use crate::engine::renderer::SessionParams;

/// One catalog entry: a named base/beat pair with a suggested duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    /// Carrier frequency for the left ear, in Hz
    pub base_hz: f64,
    /// Perceived beat frequency, in Hz
    pub beat_hz: f64,
    /// Suggested session length in minutes
    pub duration_mins: u32,
    pub description: &'static str,
}

impl Preset {
    /// Build session parameters from this preset
    ///
    /// Catalog durations are minutes; the session duration is seconds.
    pub fn session_params(&self, volume: f32, sample_rate: u32) -> SessionParams {
        SessionParams {
            base_hz: self.base_hz,
            beat_hz: self.beat_hz,
            duration_secs: self.duration_mins as f64 * 60.0,
            volume,
            sample_rate,
        }
    }
}

/// The built-in preset catalog
///
/// The obe and unity entries describe frequency transitions (6 toward 15Hz,
/// theta plus a 40Hz gamma layer) but carry a single static beat; dynamic
/// sweeps are out of scope.
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "deep-sleep",
        name: "Deep Sleep",
        base_hz: 180.0,
        beat_hz: 2.0,
        duration_mins: 30,
        description: "Delta waves 0.5-2.5 Hz, physical regeneration.",
    },
    Preset {
        id: "yoga-nidra",
        name: "Yoga Nidra",
        base_hz: 200.0,
        beat_hz: 5.0,
        duration_mins: 25,
        description: "Theta waves 4-6 Hz, body asleep, mind awake.",
    },
    Preset {
        id: "lucid-dreaming",
        name: "Lucid Dreaming",
        base_hz: 210.0,
        beat_hz: 8.0,
        duration_mins: 30,
        description: "6-14 Hz range, REM phase, conscious dreaming.",
    },
    Preset {
        id: "obe",
        name: "Out-of-Body Experience",
        base_hz: 190.0,
        beat_hz: 6.0,
        duration_mins: 35,
        description: "6 Hz moving toward 15 Hz, trance state (static 6 Hz).",
    },
    Preset {
        id: "unity",
        name: "Deep Unity Meditation",
        base_hz: 160.0,
        beat_hz: 6.0,
        duration_mins: 40,
        description: "4-7 Hz with a 40 Hz gamma layer (static theta).",
    },
    Preset {
        id: "flow",
        name: "Flow / Creativity",
        base_hz: 220.0,
        beat_hz: 12.0,
        duration_mins: 20,
        description: "10-14 Hz (alpha + beta), creative concentration.",
    },
    Preset {
        id: "focus",
        name: "Focus / Study",
        base_hz: 220.0,
        beat_hz: 16.0,
        duration_mins: 25,
        description: "14-18 Hz (mid-beta), cognitive focus.",
    },
    Preset {
        id: "relax",
        name: "Relaxation / Anxiety Relief",
        base_hz: 200.0,
        beat_hz: 7.0,
        duration_mins: 20,
        description: "6-8 Hz (theta/alpha), calming down.",
    },
    Preset {
        id: "energy",
        name: "Energy / Activation",
        base_hz: 240.0,
        beat_hz: 20.0,
        duration_mins: 15,
        description: "18-30 Hz (high beta/gamma), motivation and arousal.",
    },
];

/// Look up a preset by its id
pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

/// All built-in presets, in catalog order
pub fn all() -> &'static [Preset] {
    PRESETS
}

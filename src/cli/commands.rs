//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use log::info;

use crate::cli::SideArg;
use crate::engine::io::{export_session, write_wav};
use crate::engine::renderer::{render_test_tone, SessionParams};
use crate::error::{EntrainError, Result};
use crate::preset;

/// List the built-in presets as a table or JSON.
pub fn list_presets(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(preset::all())?);
        return Ok(());
    }

    println!(
        "{:<16} {:<28} {:>8} {:>8} {:>6}",
        "ID", "NAME", "BASE Hz", "BEAT Hz", "MIN"
    );
    println!("{:-<70}", "");
    for preset in preset::all() {
        println!(
            "{:<16} {:<28} {:>8} {:>8} {:>6}",
            preset.id, preset.name, preset.base_hz, preset.beat_hz, preset.duration_mins
        );
        println!("{:<16} {}", "", preset.description);
    }

    Ok(())
}

/// Render a session and export it into the output directory.
pub fn export(
    preset_id: Option<&str>,
    base: Option<f64>,
    beat: Option<f64>,
    duration_mins: Option<f64>,
    volume: f32,
    sample_rate: u32,
    output_dir: &Path,
) -> Result<()> {
    let params = resolve_params(preset_id, base, beat, duration_mins, volume, sample_rate)?;

    info!(
        "Exporting session: base {}Hz, beat {}Hz, {}s",
        params.base_hz, params.beat_hz, params.duration_secs
    );

    let path = export_session(&params, output_dir)?;
    println!("Exported: {}", path.display());

    Ok(())
}

/// Export the one-sided routing test tone.
pub fn channel_test(side: SideArg, sample_rate: u32, output: Option<PathBuf>) -> Result<()> {
    let buffer = render_test_tone(side.to_side(), sample_rate)?;
    let path =
        output.unwrap_or_else(|| PathBuf::from(format!("channel_test_{}.wav", side.name())));

    write_wav(&buffer, &path)?;
    println!(
        "Wrote {} channel test tone: {}",
        side.name(),
        path.display()
    );

    Ok(())
}

/// Build session parameters from a preset id or the custom frequency trio.
fn resolve_params(
    preset_id: Option<&str>,
    base: Option<f64>,
    beat: Option<f64>,
    duration_mins: Option<f64>,
    volume: f32,
    sample_rate: u32,
) -> Result<SessionParams> {
    if let Some(id) = preset_id {
        let preset = preset::find(id).ok_or_else(|| EntrainError::UnknownPreset {
            id: id.to_string(),
        })?;
        return Ok(preset.session_params(volume, sample_rate));
    }

    match (base, beat, duration_mins) {
        (Some(base_hz), Some(beat_hz), Some(mins)) => Ok(SessionParams {
            base_hz,
            beat_hz,
            duration_secs: mins * 60.0,
            volume,
            sample_rate,
        }),
        _ => Err(EntrainError::InvalidParameter {
            field: "preset",
            reason: "pass --preset <id>, or all of --base, --beat and --duration".to_string(),
        }),
    }
}

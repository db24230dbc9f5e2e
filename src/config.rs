use crate::sim::{Preset, PRESETS};
use anyhow::{bail, Result};
use clap::Parser;

#[derive(Parser, Debug)]
pub(crate) struct Args {
    /// reaction regime: spots, spirals or waves
    #[arg(long, default_value = "spots")]
    pub(crate) preset: String,

    /// requested grid width (clamped to the canvas)
    #[arg(long, default_value_t = 640)]
    pub(crate) width: usize,

    /// requested grid height (clamped to the canvas)
    #[arg(long, default_value_t = 480)]
    pub(crate) height: usize,

    /// RNG seed for the initial condition
    #[arg(long, default_value_t = 0xC0FFEE)]
    pub(crate) seed: u64,

    /// sweeps simulated per rendered frame
    #[arg(long, default_value_t = 8)]
    pub(crate) sweeps: u32,

    /// frame cap in frames per second
    #[arg(long, default_value_t = 30)]
    pub(crate) fps: u32,
}

pub(crate) fn find_preset(name: &str) -> Result<Preset> {
    for preset in PRESETS {
        if preset.name.eq_ignore_ascii_case(name) {
            return Ok(*preset);
        }
    }
    bail!("unknown preset {:?} (try spots, spirals or waves)", name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(find_preset("spots").unwrap().name, "spots");
        assert_eq!(find_preset("SPIRALS").unwrap().name, "spirals");
        assert!(find_preset("plasma").is_err());
    }
}

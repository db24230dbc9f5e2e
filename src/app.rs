use crate::color::{colorize, PixelBackend};
use crate::config::{find_preset, Args};
use crate::input::{poll_actions, Action};
use crate::render::{TermCanvas, Terminal};
use crate::sim::{Preset, Sim};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

const BACKGROUND: u32 = 0x33_3333;

pub(crate) fn run(args: Args) -> Result<()> {
    let preset = find_preset(&args.preset)?;
    let mut term = Terminal::begin()?;
    let result = event_loop(&mut term, preset, &args);
    // restore the terminal even when the loop errors out
    let restored = term.end();
    result.and(restored)
}

fn build_sim(preset: Preset, args: &Args, canvas: &TermCanvas, seed: u64) -> Result<Sim> {
    let (cw, ch) = canvas.size();
    // the grid never exceeds the canvas; center what fits
    let w = args.width.min(cw).max(2);
    let h = args.height.min(ch).max(2);
    let left = cw.saturating_sub(w) / 2;
    let top = ch.saturating_sub(h) / 2;
    Sim::new(preset, w, h, left, top, seed)
}

fn event_loop(term: &mut Terminal, preset: Preset, args: &Args) -> Result<()> {
    let mut canvas = TermCanvas::new(term.cols, term.rows);
    canvas.fill(BACKGROUND);
    let mut sim = build_sim(preset, args, &canvas, args.seed)?;
    let mut reseed_rng = StdRng::seed_from_u64(args.seed);

    let frame_dt = Duration::from_millis(1000 / args.fps.clamp(1, 240) as u64);
    let mut paused = false;
    let mut sweeps_done: u64 = 0;
    let mut fps = 0.0f32;
    let mut frames: u32 = 0;
    let mut fps_timer = Instant::now();
    let mut last_present = Instant::now();

    loop {
        if term.resize_if_needed()? {
            canvas = TermCanvas::new(term.cols, term.rows);
            canvas.fill(BACKGROUND);
            sim = build_sim(preset, args, &canvas, reseed_rng.gen())?;
            sweeps_done = 0;
        }

        for action in poll_actions(frame_dt)? {
            match action {
                Action::Quit => return Ok(()),
                Action::TogglePause => paused = !paused,
                Action::Reseed => {
                    sim.reseed(reseed_rng.gen());
                    sweeps_done = 0;
                }
            }
        }

        if !paused {
            sim.run_burst(args.sweeps);
            sweeps_done += args.sweeps as u64;
        }

        colorize(&sim, &mut canvas);

        let (w, h) = sim.grid().dimensions();
        let hud = format!(
            "reactdiff  preset:{}  grid:{}x{}  sweeps:{}  paused:{}  fps:{:>5.1}  q quit  space pause  r reseed",
            sim.preset_name(),
            w,
            h,
            sweeps_done,
            if paused { "yes" } else { "no" },
            fps
        );
        term.present(&canvas, &hud)?;

        frames += 1;
        if fps_timer.elapsed() >= Duration::from_millis(500) {
            fps = frames as f32 / fps_timer.elapsed().as_secs_f32();
            fps_timer = Instant::now();
            frames = 0;
        }

        let elapsed = last_present.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }
        last_present = Instant::now();
    }
}

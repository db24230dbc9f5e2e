use crate::fixed::Fix;
use crate::grid::{Cell, Grid};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::mem;

/// Scaled diffusion and reaction coefficients.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Params {
    pub(crate) da: Fix,
    pub(crate) db: Fix,
    pub(crate) feed: Fix,
    pub(crate) kill: Fix,
}

/// Initial-condition band, sampled uniformly in [lo, hi).
/// lo == hi pins the channel to that exact value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Band {
    pub(crate) lo: Fix,
    pub(crate) hi: Fix,
}

#[derive(Clone, Copy)]
pub(crate) struct Preset {
    pub(crate) name: &'static str,
    pub(crate) params: Params,
    pub(crate) a_band: Band,
    pub(crate) b_band: Band,
    pub(crate) patch: bool,
}

/// Known Gray-Scott regimes. The feed/kill pair picks the qualitative
/// behavior; the seed bands match what each regime wants to start from.
pub(crate) const PRESETS: &[Preset] = &[
    Preset {
        name: "spots",
        params: Params {
            da: Fix::ONE,
            db: Fix::ratio(1, 2),
            feed: Fix::ratio(55, 1000),
            kill: Fix::ratio(62, 1000),
        },
        a_band: Band {
            lo: Fix::MAX_CELL,
            hi: Fix::MAX_CELL,
        },
        b_band: Band {
            lo: Fix::ZERO,
            hi: Fix::ZERO,
        },
        patch: true,
    },
    Preset {
        name: "spirals",
        params: Params {
            da: Fix::ONE,
            db: Fix::ratio(1, 2),
            feed: Fix::ratio(10, 1000),
            kill: Fix::ratio(36, 1000),
        },
        a_band: Band {
            lo: Fix::ZERO,
            hi: Fix::ratio(78, 100),
        },
        b_band: Band {
            lo: Fix::ZERO,
            hi: Fix::ratio(20, 100),
        },
        patch: true,
    },
    Preset {
        name: "waves",
        params: Params {
            da: Fix::ONE,
            db: Fix::ratio(1, 2),
            feed: Fix::ratio(11, 1000),
            kill: Fix::ratio(35, 1000),
        },
        a_band: Band {
            lo: Fix::ZERO,
            hi: Fix::ratio(84, 100),
        },
        b_band: Band {
            lo: Fix::ZERO,
            hi: Fix::ratio(18, 100),
        },
        patch: true,
    },
];

/// Side of the centered symmetry-breaking square, clamped to the grid.
const PATCH_SIDE: usize = 100;

/// The simulation: the grid plus the scratch buffers the in-place sweep
/// rotates through.
pub(crate) struct Sim {
    grid: Grid,
    pub(crate) params: Params,
    preset: Preset,
    /// Placement of the grid's top-left corner on the canvas.
    pub(crate) left: usize,
    pub(crate) top: usize,
    prev_row: Vec<Cell>,
    cur_row: Vec<Cell>,
    first_row: Vec<Cell>,
}

impl Sim {
    pub(crate) fn new(
        preset: Preset,
        w: usize,
        h: usize,
        left: usize,
        top: usize,
        seed: u64,
    ) -> Result<Self> {
        let grid = Grid::new(w, h)?;
        let mut sim = Self {
            grid,
            params: preset.params,
            preset,
            left,
            top,
            prev_row: vec![Cell::default(); w],
            cur_row: vec![Cell::default(); w],
            first_row: vec![Cell::default(); w],
        };
        sim.reseed(seed);
        Ok(sim)
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn preset_name(&self) -> &'static str {
        self.preset.name
    }

    /// Refill the grid from the preset's bands, then stamp the centered
    /// perturbation patch with the opposite extremes. Same seed, same
    /// grid, always.
    pub(crate) fn reseed(&mut self, seed: u64) {
        let (w, h) = self.grid.dimensions();
        let mut rng = StdRng::seed_from_u64(seed);
        for y in 0..h {
            for x in 0..w {
                let a = sample(&mut rng, self.preset.a_band);
                let b = sample(&mut rng, self.preset.b_band);
                self.grid.set(x, y, Cell { a, b });
            }
        }
        if self.preset.patch {
            let side = PATCH_SIDE.min(w).min(h);
            let x0 = (w - side) / 2;
            let y0 = (h - side) / 2;
            for y in y0..y0 + side {
                for x in x0..x0 + side {
                    self.grid.set(
                        x,
                        y,
                        Cell {
                            a: Fix::ZERO,
                            b: Fix::MAX_CELL,
                        },
                    );
                }
            }
        }
    }

    /// A frame advances the simulation by a fixed burst of sweeps before
    /// a single colorize pass.
    pub(crate) fn run_burst(&mut self, sweeps: u32) {
        for _ in 0..sweeps {
            self.sweep();
        }
    }

    /// Advance the whole grid one time step, in place.
    ///
    /// Writes go straight into the array the neighbor reads come from, so
    /// by the time (x, y) is computed the row above and the cell to the
    /// left already hold this sweep's values, and the wrap targets of the
    /// last row and last column were overwritten at the start of the
    /// pass. Every Laplacian must see pre-sweep values; the rotating row
    /// buffers, the prev_left cell and the first-row snapshot supply
    /// them.
    pub(crate) fn sweep(&mut self) {
        let (w, h) = self.grid.dimensions();
        self.first_row.copy_from_slice(self.grid.row(0));
        for y in 0..h {
            // the current row's pre-sweep copy becomes the next row's
            // "row above"; swap roles instead of copying twice
            mem::swap(&mut self.prev_row, &mut self.cur_row);
            self.cur_row.copy_from_slice(self.grid.row(y));
            // left wrap target of x == 0, still live here
            let mut prev_left = self.cur_row[w - 1];
            for x in 0..w {
                let center = self.cur_row[x];
                let n = self.neighbors(x, y, prev_left);
                let lap = laplacian(&n, center);
                let abb = center.a.mul(center.b).mul(center.b);
                let a = center.a + self.params.da.mul(lap.a) - abb
                    + self.params.feed.mul(Fix::ONE - center.a);
                let b = center.b + self.params.db.mul(lap.b) + abb
                    - (self.params.kill + self.params.feed).mul(center.b);
                prev_left = center;
                self.grid.set(
                    x,
                    y,
                    Cell {
                        a: a.clamp_cell(),
                        b: b.clamp_cell(),
                    },
                );
            }
        }
    }

    /// Pre-sweep values of the eight toroidal neighbors of (x, y):
    /// [above-left, above, above-right, left, right, below-left, below,
    /// below-right].
    fn neighbors(&self, x: usize, y: usize, prev_left: Cell) -> [Cell; 8] {
        let (w, h) = self.grid.dimensions();
        let xl = if x == 0 { w - 1 } else { x - 1 };
        let xr = if x == w - 1 { 0 } else { x + 1 };

        let above = |col: usize| {
            if y == 0 {
                // the last row is untouched while the first row sweeps
                self.grid.get(col, h - 1)
            } else {
                self.prev_row[col]
            }
        };
        let below = |col: usize| {
            if y == h - 1 {
                // row 0 was overwritten at the start of the pass
                self.first_row[col]
            } else {
                self.grid.get(col, y + 1)
            }
        };
        let right = if x == w - 1 {
            // wraps onto this row's first cell, already overwritten
            self.cur_row[0]
        } else {
            self.grid.get(x + 1, y)
        };

        [
            above(xl),
            above(x),
            above(xr),
            prev_left,
            right,
            below(xl),
            below(x),
            below(xr),
        ]
    }
}

fn sample(rng: &mut StdRng, band: Band) -> Fix {
    if band.hi.0 > band.lo.0 {
        Fix(rng.gen_range(band.lo.0..band.hi.0))
    } else {
        band.lo
    }
}

/// Discrete Laplacian over the eight neighbors: corners weigh 1/20, axis
/// neighbors 1/5, the center -1. The weights sum to zero.
fn laplacian(n: &[Cell; 8], center: Cell) -> Cell {
    let a = n[0].a.div(20) + n[1].a.div(5) + n[2].a.div(20)
        + n[3].a.div(5) + n[4].a.div(5)
        + n[5].a.div(20) + n[6].a.div(5) + n[7].a.div(20)
        - center.a;
    let b = n[0].b.div(20) + n[1].b.div(5) + n[2].b.div(20)
        + n[3].b.div(5) + n[4].b.div(5)
        + n[5].b.div(20) + n[6].b.div(5) + n[7].b.div(20)
        - center.b;
    Cell { a, b }
}

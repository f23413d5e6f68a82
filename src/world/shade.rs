//! Shadow-casting visibility table
//!
//! Precomputes, for every relative blocker position around the observer,
//! which farther cells that blocker shades and by how much. Only the first
//! octant (x >= y >= 0) is scanned directly; the remaining seven octants
//! come from symmetry passes, so the table is exactly mirror-consistent.
//! Built once at startup, immutable and freely shareable afterwards.

use thiserror::Error;

use crate::config::OPACITY_EPSILON;

use super::map::Map;

/// Table-builder configuration errors. These abort startup; the runtime
/// passes over the finished table cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShadeError {
    /// A seed on the vertical axis has no defined cast slope.
    #[error("shade seed ({x}, {y}) lies on the vertical axis")]
    ZeroColumnSeed { x: i32, y: i32 },
    /// Seeds must satisfy x >= y >= 0; the symmetry passes supply the rest.
    #[error("shade seed ({x}, {y}) is outside the first octant")]
    SeedOutsideOctant { x: i32, y: i32 },
}

/// One shading contribution: the cell at (x, y) relative to the observer
/// loses `value` of its visibility when the owning caster blocks vision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Darkener {
    pub x: i32,
    pub y: i32,
    pub value: f32,
}

/// A candidate blocker position and every cell it shades.
#[derive(Debug, Clone)]
pub struct Caster {
    pub x: i32,
    pub y: i32,
    pub darkeners: Vec<Darkener>,
}

/// Inclusive bounds of the table scan, one cell past the visible
/// half-window on each axis.
#[derive(Debug, Clone, Copy)]
pub struct ScanBounds {
    pub max_col: i32,
    pub max_row: i32,
}

/// The symmetry passes that complete a first-octant scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPass {
    /// Swap x and y across the x = y diagonal.
    Diagonal,
    /// Reflect across the y = 0 axis.
    Axis,
    /// Negate x.
    Horizontal,
    /// Negate y.
    Vertical,
}

impl MirrorPass {
    fn reflect(self, d: Darkener) -> Darkener {
        match self {
            MirrorPass::Diagonal => Darkener {
                x: d.y,
                y: d.x,
                value: d.value,
            },
            MirrorPass::Axis | MirrorPass::Vertical => Darkener {
                x: d.x,
                y: -d.y,
                value: d.value,
            },
            MirrorPass::Horizontal => Darkener {
                x: -d.x,
                y: d.y,
                value: d.value,
            },
        }
    }

    /// Darkeners on the pass's own mirror line are already present in the
    /// direct scan and must not be duplicated.
    fn on_mirror_line(self, d: &Darkener) -> bool {
        match self {
            MirrorPass::Diagonal => d.x == d.y,
            MirrorPass::Axis => d.y == 0,
            MirrorPass::Horizontal | MirrorPass::Vertical => false,
        }
    }
}

/// Reflect a darkener list through one symmetry pass.
///
/// Pure: returns a fresh list. Anything the reflection carries outside the
/// scan bounds is dropped, the same rule the direct scan honors (the view
/// window is wider than it is tall, so the diagonal pass can push a cell
/// past the row bound).
fn mirror_darkeners(list: &[Darkener], pass: MirrorPass, bounds: ScanBounds) -> Vec<Darkener> {
    list.iter()
        .filter(|d| !pass.on_mirror_line(d))
        .map(|d| pass.reflect(*d))
        .filter(|d| d.x.abs() <= bounds.max_col && d.y.abs() <= bounds.max_row)
        .collect()
}

/// The precomputed occlusion table.
#[derive(Debug, Clone)]
pub struct ShadeMatrix {
    casters: Vec<Caster>,
}

impl ShadeMatrix {
    /// Build the default table for a view window reaching `half_cols`
    /// tiles to each side and `half_rows` above and below, scanning one
    /// cell past each extent so the falloff fringe is covered.
    pub fn new(half_cols: i32, half_rows: i32) -> Result<Self, ShadeError> {
        let seeds = first_octant_seeds(half_cols, half_rows);
        Self::from_seeds(
            &seeds,
            ScanBounds {
                max_col: half_cols + 1,
                max_row: half_rows + 1,
            },
        )
    }

    /// Build a table from explicit first-octant seeds.
    pub fn from_seeds(seeds: &[(i32, i32)], bounds: ScanBounds) -> Result<Self, ShadeError> {
        let mut casters: Vec<Caster> = Vec::new();

        for &(sx, sy) in seeds {
            if sx == 0 {
                return Err(ShadeError::ZeroColumnSeed { x: sx, y: sy });
            }
            if sy < 0 || sy > sx {
                return Err(ShadeError::SeedOutsideOctant { x: sx, y: sy });
            }

            let mut darkeners = scan_octant(sx, sy, bounds);

            // A seed on the horizontal axis shades symmetrically above
            // and below its own ray.
            if sy == 0 {
                let below = mirror_darkeners(&darkeners, MirrorPass::Axis, bounds);
                darkeners.extend(below);
            }

            // A seed on the diagonal shades symmetrically across it.
            if sx == sy {
                let across = mirror_darkeners(&darkeners, MirrorPass::Diagonal, bounds);
                darkeners.extend(across);
            }

            // An off-diagonal seed also stands for its diagonal twin.
            let twin = (sx != sy).then(|| Caster {
                x: sy,
                y: sx,
                darkeners: mirror_darkeners(&darkeners, MirrorPass::Diagonal, bounds),
            });

            casters.push(Caster {
                x: sx,
                y: sy,
                darkeners,
            });
            casters.extend(twin);
        }

        // Complete the left half-plane, then the upper one.
        let mirrored: Vec<Caster> = casters
            .iter()
            .filter(|c| c.x != 0)
            .map(|c| Caster {
                x: -c.x,
                y: c.y,
                darkeners: mirror_darkeners(&c.darkeners, MirrorPass::Horizontal, bounds),
            })
            .collect();
        casters.extend(mirrored);

        let mirrored: Vec<Caster> = casters
            .iter()
            .filter(|c| c.y != 0)
            .map(|c| Caster {
                x: c.x,
                y: -c.y,
                darkeners: mirror_darkeners(&c.darkeners, MirrorPass::Vertical, bounds),
            })
            .collect();
        casters.extend(mirrored);

        Ok(Self { casters })
    }

    pub fn casters(&self) -> &[Caster] {
        &self.casters
    }

    /// Occlusion pass: every caster whose translated cell blocks vision
    /// darkens the cells behind it. Subtraction clamps at zero, so
    /// overlapping shadows from different blockers never push a cell
    /// negative and the iteration order is immaterial.
    pub fn apply(&self, map: &mut Map, observer_col: i32, observer_row: i32) {
        for caster in &self.casters {
            let occlusion = match map.get(observer_col + caster.x, observer_row + caster.y) {
                Some(cell) => cell.occlusion,
                None => continue,
            };
            if occlusion <= OPACITY_EPSILON {
                continue;
            }

            for d in &caster.darkeners {
                let cell = match map.get_mut(observer_col + d.x, observer_row + d.y) {
                    Some(cell) => cell,
                    None => continue,
                };
                if cell.target_opacity < OPACITY_EPSILON {
                    continue;
                }
                cell.target_opacity = (cell.target_opacity - d.value * occlusion).max(0.0);
            }
        }
    }
}

/// First-octant seed offsets: every column out to the view half-width,
/// each with rows from the horizontal axis up to the diagonal, capped at
/// the view half-height.
fn first_octant_seeds(half_cols: i32, half_rows: i32) -> Vec<(i32, i32)> {
    let mut seeds = Vec::new();
    for x in 1..=half_cols {
        for y in 0..=x.min(half_rows) {
            seeds.push((x, y));
        }
    }
    seeds
}

/// Direct scan of the first-octant triangle behind a seed blocker at
/// (sx, sy). The blocker subtends the slope band [sy - 0.5, sy + 0.5] / sx
/// as seen from the origin.
fn scan_octant(sx: i32, sy: i32, bounds: ScanBounds) -> Vec<Darkener> {
    let near = (sy as f32 - 0.5) / sx as f32;
    let far = (sy as f32 + 0.5) / sx as f32;

    let mut out = Vec::new();
    for row in 0..=bounds.max_row {
        for col in row..=bounds.max_col {
            if never_shaded(sx, sy, col, row) {
                continue;
            }
            if let Some(value) = shade_portion(near, far, col, row) {
                out.push(Darkener { x: col, y: row, value });
            }
        }
    }
    out
}

/// Cells the scan can never shade: the observer's own cell, the seed
/// itself, and anything nearer than the seed along the cast axis.
fn never_shaded(sx: i32, sy: i32, col: i32, row: i32) -> bool {
    (col == 0 && row == 0) || (col == sx && row == sy) || col < sx
}

/// Overlap of the shadow band with one cell's vertical extent at its
/// column. Full cover is 1.0; partial cover loses the uncovered fraction
/// at each edge; no overlap contributes nothing.
fn shade_portion(near: f32, far: f32, col: i32, row: i32) -> Option<f32> {
    let cell_top = row as f32 - 0.5;
    let cell_bottom = row as f32 + 0.5;
    let shadow_top = col as f32 * near;
    let shadow_bottom = col as f32 * far;

    if cell_top >= shadow_top && cell_bottom <= shadow_bottom {
        return Some(1.0);
    }

    let mut portion = 1.0;
    let mut covered = false;
    if cell_top > shadow_top && cell_top < shadow_bottom {
        portion -= 1.0 - (shadow_bottom - cell_top);
        covered = true;
    }
    if cell_bottom < shadow_bottom && cell_bottom > shadow_top {
        portion -= 1.0 - (cell_bottom - shadow_top);
        covered = true;
    }
    covered.then_some(portion)
}

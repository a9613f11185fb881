//! Decorative particles: a slow drifting backdrop plus a short burst wherever
//! food gets eaten. None of this feeds back into the game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Grid, Position};

const CELL_PIXELS: f32 = 20.0;
const CELLS_PER_AMBIENT: usize = 24;
const BURST_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Ambient,
    Burst,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub lifetime: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Grid cell the particle currently sits in
    pub fn cell(&self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

pub struct ParticleField {
    grid: Grid,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, rng: StdRng) -> Self {
        let mut field = Self {
            grid,
            particles: Vec::new(),
            rng,
        };
        let ambient = (grid.cell_count() / CELLS_PER_AMBIENT).max(1);
        for _ in 0..ambient {
            let particle = field.ambient_particle();
            field.particles.push(particle);
        }
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Scatter a burst of sparks from the centre of `cell`
    pub fn burst(&mut self, cell: Position) {
        let (cx, cy) = (cell.x as f32 + 0.5, cell.y as f32 + 0.5);
        for _ in 0..BURST_SIZE {
            let particle = Particle {
                x: cx,
                y: cy,
                vx: (self.rng.gen::<f32>() - 0.5) * 4.0 / CELL_PIXELS,
                vy: (self.rng.gen::<f32>() - 0.5) * 4.0 / CELL_PIXELS,
                lifetime: self.rng.gen_range(20..50),
                kind: ParticleKind::Burst,
            };
            self.particles.push(particle);
        }
    }

    /// Advance every particle by one frame
    pub fn update(&mut self) {
        let (width, height) = (self.grid.width as f32, self.grid.height as f32);

        for i in 0..self.particles.len() {
            let particle = &mut self.particles[i];
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.lifetime = particle.lifetime.saturating_sub(1);

            if particle.kind == ParticleKind::Ambient {
                if particle.x < 0.0 || particle.x > width {
                    particle.vx = -particle.vx;
                }
                if particle.y < 0.0 || particle.y > height {
                    particle.vy = -particle.vy;
                }
                if particle.lifetime == 0 {
                    self.particles[i] = self.ambient_particle();
                }
            }
        }

        self.particles
            .retain(|p| p.kind == ParticleKind::Ambient || p.lifetime > 0);
    }

    fn ambient_particle(&mut self) -> Particle {
        Particle {
            x: self.rng.gen::<f32>() * self.grid.width as f32,
            y: self.rng.gen::<f32>() * self.grid.height as f32,
            vx: (self.rng.gen::<f32>() - 0.5) * 0.5 / CELL_PIXELS,
            vy: (self.rng.gen::<f32>() - 0.5) * 0.5 / CELL_PIXELS,
            lifetime: self.rng.gen_range(100..400),
            kind: ParticleKind::Ambient,
        }
    }
}

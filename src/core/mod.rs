use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config,
    types::{ColorId, Star, StarSnapshot, Vec2},
};

/// Perspective factor applied to planar coordinates and size: 1.0 at the
/// viewer, shrinking toward 1/3 at maximum depth.
pub fn perspective_scale(depth: f32) -> f32 {
    config::FOCAL_LENGTH / (config::FOCAL_LENGTH + depth)
}

/// Stars fade in as they approach: 0.0 at maximum depth, 1.0 at the viewer.
pub fn opacity_for_depth(depth: f32) -> f32 {
    ((config::MAX_DEPTH - depth) / config::MAX_DEPTH).clamp(0.0, 1.0)
}

pub struct Field {
    stars: Vec<Star>,
    origin: Vec2,
    extent: Vec2,
    pointer: Vec2,
    rng: StdRng,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_rng(width, height, StdRng::from_entropy())
    }

    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::from_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn from_rng(width: f32, height: f32, rng: StdRng) -> Self {
        let mut field = Self {
            stars: Vec::with_capacity(config::STAR_COUNT),
            origin: Vec2::new(width / 2.0, height / 2.0),
            extent: Vec2::new(width, height),
            pointer: Vec2::ZERO,
            rng,
        };
        field.spawn_stars();
        field
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// One animation tick: every star approaches the viewer, stars that
    /// reach depth 0 respawn at maximum depth with a fresh planar position.
    /// The pool size never changes.
    pub fn advance(&mut self) {
        for i in 0..self.stars.len() {
            let step = self.stars[i].speed * config::GLOBAL_SPEED * config::DEPTH_STEP;
            self.stars[i].depth -= step;
            if self.stars[i].depth <= 0.0 {
                let pos = self.sample_planar();
                let star = &mut self.stars[i];
                star.pos = pos;
                star.depth = config::MAX_DEPTH;
            }
        }
    }

    pub fn snapshot(&self, out: &mut Vec<StarSnapshot>) {
        out.clear();
        let parallax = self.pointer * config::PARALLAX_STRENGTH;
        for star in &self.stars {
            let scale = perspective_scale(star.depth);
            let prev_depth =
                star.depth + star.speed * config::GLOBAL_SPEED * config::DEPTH_STEP;
            let prev_scale = perspective_scale(prev_depth);
            out.push(StarSnapshot {
                screen: self.origin + star.pos * scale + parallax,
                prev_screen: self.origin + star.pos * prev_scale + parallax,
                radius: star.size * scale,
                opacity: opacity_for_depth(star.depth),
                depth: star.depth,
                color: star.color,
            });
        }
    }

    /// Recenter the projection; star state is left untouched since the pool
    /// recycles quickly enough to absorb the change.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.extent = Vec2::new(width, height);
        self.origin = Vec2::new(width / 2.0, height / 2.0);
    }

    /// Normalized pointer offset relative to the projection origin. Left
    /// unclamped: magnitudes beyond 1 near the edges are a cosmetic effect.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if self.origin.x > 0.0 && self.origin.y > 0.0 {
            self.pointer = Vec2::new(
                (x - self.origin.x) / self.origin.x,
                (y - self.origin.y) / self.origin.y,
            );
        }
    }

    fn spawn_stars(&mut self) {
        for _ in 0..config::STAR_COUNT {
            let star = self.sample_star();
            self.stars.push(star);
        }
    }

    fn sample_star(&mut self) -> Star {
        let pos = self.sample_planar();
        Star {
            pos,
            depth: self.rng.gen_range(0.0..config::MAX_DEPTH),
            size: self.rng.gen_range(0.0..config::SIZE_MAX),
            color: self.sample_color(),
            speed: self.rng.gen_range(config::SPEED_MIN..config::SPEED_MAX),
        }
    }

    fn sample_planar(&mut self) -> Vec2 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let max_radius = self.extent.x.max(self.extent.y);
        let radius = if max_radius > 0.0 {
            self.rng.gen_range(0.0..max_radius)
        } else {
            0.0
        };
        Vec2::new(angle.cos() * radius, angle.sin() * radius)
    }

    fn sample_color(&mut self) -> ColorId {
        ColorId::PALETTE[self.rng.gen_range(0..ColorId::PALETTE.len())]
    }
}

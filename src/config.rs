pub const RENDER_HZ: f32 = 30.0;

pub const STAR_COUNT: usize = 800;
pub const MAX_DEPTH: f32 = 2000.0;
pub const FOCAL_LENGTH: f32 = 1000.0;

pub const GLOBAL_SPEED: f32 = 0.5;
pub const DEPTH_STEP: f32 = 5.0;

pub const SIZE_MAX: f32 = 2.0;
pub const SPEED_MIN: f32 = 0.2;
pub const SPEED_MAX: f32 = 0.7;

pub const PARALLAX_STRENGTH: f32 = 50.0;

pub const GLOW_DEPTH: f32 = 500.0;
pub const GLOW_RADIUS_SCALE: f32 = 3.0;
pub const STREAK_DEPTH: f32 = 200.0;

pub const TRAIL_FADE: f32 = 0.3;

pub const NEBULA_COUNT: usize = 3;
pub const NEBULA_TIME_SCALE: f32 = 0.1;
pub const NEBULA_DRIFT: f32 = 0.5;
pub const NEBULA_RADIUS: f32 = 0.45;
pub const NEBULA_RADIUS_SWING: f32 = 0.15;
pub const NEBULA_ALPHA_VIOLET: f32 = 0.03;
pub const NEBULA_ALPHA_PINK: f32 = 0.02;

pub const BACKGROUND_RGB: (u8, u8, u8) = (10, 0, 20);

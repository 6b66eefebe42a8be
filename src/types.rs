use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    Purple,
    Pink,
    Violet,
    Blue,
    White,
}

impl ColorId {
    pub const PALETTE: [ColorId; 5] = [
        ColorId::Purple,
        ColorId::Pink,
        ColorId::Violet,
        ColorId::Blue,
        ColorId::White,
    ];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorId::Purple => (168, 85, 247),
            ColorId::Pink => (236, 72, 153),
            ColorId::Violet => (147, 51, 234),
            ColorId::Blue => (59, 130, 246),
            ColorId::White => (255, 255, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub depth: f32,
    pub size: f32,
    pub color: ColorId,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct StarSnapshot {
    pub screen: Vec2,
    pub prev_screen: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub depth: f32,
    pub color: ColorId,
}

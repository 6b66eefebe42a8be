use crate::{
    config,
    types::{ColorId, StarSnapshot, Vec2},
};

// Terminal cells are roughly twice as tall as they are wide, so circular
// shapes are drawn with a half-height footprint.
const CELL_ASPECT: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub intensity: f32,
    pub color: ColorId,
}

const EMPTY_CELL: RenderCell = RenderCell {
    intensity: 0.0,
    color: ColorId::White,
};

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, EMPTY_CELL);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = EMPTY_CELL;
        }
    }

    /// The translucent overlay that produces fading trails: every cell keeps
    /// the given fraction of its intensity.
    pub fn fade(&mut self, keep: f32) {
        for cell in &mut self.cells {
            cell.intensity *= keep;
            if cell.intensity < 0.004 {
                *cell = EMPTY_CELL;
            }
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn deposit(&mut self, x: i32, y: i32, intensity: f32, color: ColorId) {
        if intensity <= 0.0 || x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32
        {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if intensity >= cell.intensity {
            cell.color = color;
        }
        cell.intensity = (cell.intensity + intensity).min(1.0);
    }
}

pub fn draw(snapshot: &[StarSnapshot], elapsed: f32, viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.fade(1.0 - config::TRAIL_FADE);
    }

    for star in snapshot {
        draw_star(star, viewport, frame);
    }

    draw_nebula(elapsed, viewport, frame);
}

fn on_surface(pos: Vec2, viewport: Viewport) -> bool {
    pos.x >= 0.0 && pos.x <= viewport.width as f32 && pos.y >= 0.0 && pos.y <= viewport.height as f32
}

fn draw_star(star: &StarSnapshot, viewport: Viewport, frame: &mut FrameBuffer) {
    // Off-surface stars are skipped entirely; their state already advanced.
    if !on_surface(star.screen, viewport) {
        return;
    }

    fill_disc(frame, star.screen, star.radius, star.opacity, star.color);

    if star.depth < config::GLOW_DEPTH {
        let glow_radius = star.radius.max(0.5) * config::GLOW_RADIUS_SCALE;
        draw_glow(frame, star.screen, glow_radius, star.opacity * 0.5, star.color);
    }

    if star.depth < config::STREAK_DEPTH {
        draw_streak(
            frame,
            star.prev_screen,
            star.screen,
            star.opacity * 0.5,
            star.color,
        );
    }
}

fn fill_disc(frame: &mut FrameBuffer, center: Vec2, radius: f32, intensity: f32, color: ColorId) {
    if radius < 0.5 {
        frame.deposit(
            center.x.round() as i32,
            center.y.round() as i32,
            intensity,
            color,
        );
        return;
    }

    let rx = radius;
    let ry = (radius * CELL_ASPECT).max(0.5);
    let x0 = (center.x - rx).floor() as i32;
    let x1 = (center.x + rx).ceil() as i32;
    let y0 = (center.y - ry).floor() as i32;
    let y1 = (center.y + ry).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as f32 - center.x) / rx;
            let dy = (y as f32 - center.y) / ry;
            if dx * dx + dy * dy <= 1.0 {
                frame.deposit(x, y, intensity, color);
            }
        }
    }
}

/// Soft radial falloff, fading linearly to transparent at the rim.
fn draw_glow(frame: &mut FrameBuffer, center: Vec2, radius: f32, intensity: f32, color: ColorId) {
    if radius <= 0.0 || intensity <= 0.0 {
        return;
    }

    let rx = radius.max(0.5);
    let ry = (radius * CELL_ASPECT).max(0.5);
    let x0 = (center.x - rx).floor() as i32;
    let x1 = (center.x + rx).ceil() as i32;
    let y0 = (center.y - ry).floor() as i32;
    let y1 = (center.y + ry).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as f32 - center.x) / rx;
            let dy = (y as f32 - center.y) / ry;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < 1.0 {
                frame.deposit(x, y, intensity * (1.0 - dist), color);
            }
        }
    }
}

fn draw_streak(frame: &mut FrameBuffer, from: Vec2, to: Vec2, intensity: f32, color: ColorId) {
    let delta = to - from;
    let steps = delta.length().ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let p = from + delta * t;
        frame.deposit(p.x.round() as i32, p.y.round() as i32, intensity, color);
    }
}

fn draw_nebula(elapsed: f32, viewport: Viewport, frame: &mut FrameBuffer) {
    let half_w = viewport.width as f32 / 2.0;
    let half_h = viewport.height as f32 / 2.0;
    if half_w <= 0.0 || half_h <= 0.0 {
        return;
    }

    let t = elapsed * config::NEBULA_TIME_SCALE;
    for i in 0..config::NEBULA_COUNT {
        let phase = i as f32;
        let center = Vec2::new(
            half_w + (t + phase).sin() * half_w * config::NEBULA_DRIFT,
            half_h + (t + phase * 1.5).cos() * half_h * config::NEBULA_DRIFT,
        );
        let swing = (t * 2.0 + phase).sin() * config::NEBULA_RADIUS_SWING;
        let radius = half_w.max(half_h) * (config::NEBULA_RADIUS + swing);
        let (color, alpha) = if i % 2 == 0 {
            (ColorId::Violet, config::NEBULA_ALPHA_VIOLET)
        } else {
            (ColorId::Pink, config::NEBULA_ALPHA_PINK)
        };
        draw_glow(frame, center, radius, alpha, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_star(depth: f32, screen: Vec2, radius: f32) -> StarSnapshot {
        StarSnapshot {
            screen,
            prev_screen: Vec2::new(screen.x + 5.0, screen.y),
            radius,
            opacity: 1.0,
            depth,
            color: ColorId::Purple,
        }
    }

    mod framebuffer {
        use super::*;

        mod new {
            use super::*;

            #[test]
            fn creates_with_correct_dimensions() {
                let fb = FrameBuffer::new(80, 24);
                assert_eq!(fb.width(), 80);
                assert_eq!(fb.height(), 24);
            }

            #[test]
            fn zero_dimensions_creates_empty_buffer() {
                let fb = FrameBuffer::new(0, 0);
                assert_eq!(fb.width(), 0);
                assert_eq!(fb.height(), 0);
            }
        }

        mod resize {
            use super::*;

            #[test]
            fn changes_dimensions() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.resize(20, 15);
                assert_eq!(fb.width(), 20);
                assert_eq!(fb.height(), 15);
            }

            #[test]
            fn clears_cells_on_resize() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(5, 5, 1.0, ColorId::Pink);
                fb.resize(10, 10);
                assert_eq!(fb.get(5, 5).intensity, 0.0);
            }
        }

        mod deposit {
            use super::*;

            #[test]
            fn accumulates_intensity() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(3, 3, 0.25, ColorId::Blue);
                fb.deposit(3, 3, 0.25, ColorId::Blue);
                assert!((fb.get(3, 3).intensity - 0.5).abs() < 1e-6);
            }

            #[test]
            fn saturates_at_one() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(3, 3, 0.8, ColorId::Blue);
                fb.deposit(3, 3, 0.8, ColorId::Blue);
                assert_eq!(fb.get(3, 3).intensity, 1.0);
            }

            #[test]
            fn strongest_contributor_owns_the_color() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(3, 3, 0.6, ColorId::Blue);
                fb.deposit(3, 3, 0.1, ColorId::Pink);
                assert_eq!(fb.get(3, 3).color, ColorId::Blue);
                fb.deposit(3, 3, 0.9, ColorId::White);
                assert_eq!(fb.get(3, 3).color, ColorId::White);
            }

            #[test]
            fn out_of_bounds_is_ignored() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(-1, 5, 1.0, ColorId::Blue);
                fb.deposit(5, 100, 1.0, ColorId::Blue);
                // Should not panic
            }
        }

        mod fade {
            use super::*;

            #[test]
            fn scales_intensity_down() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(3, 3, 1.0, ColorId::Blue);
                fb.fade(0.7);
                assert!((fb.get(3, 3).intensity - 0.7).abs() < 1e-6);
            }

            #[test]
            fn dim_cells_are_reclaimed() {
                let mut fb = FrameBuffer::new(10, 10);
                fb.deposit(3, 3, 0.01, ColorId::Pink);
                fb.fade(0.1);
                assert_eq!(fb.get(3, 3).intensity, 0.0);
                assert_eq!(fb.get(3, 3).color, ColorId::White);
            }
        }
    }

    mod draw_star_fn {
        use super::*;

        #[test]
        fn lights_the_center_cell() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            let mut fb = FrameBuffer::new(80, 24);
            let star = snapshot_star(1000.0, Vec2::new(40.0, 12.0), 0.4);
            draw_star(&star, viewport, &mut fb);
            assert!(fb.get(40, 12).intensity > 0.0);
            assert_eq!(fb.get(40, 12).color, ColorId::Purple);
        }

        #[test]
        fn off_surface_star_draws_nothing() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            let mut fb = FrameBuffer::new(80, 24);
            let star = snapshot_star(100.0, Vec2::new(-5.0, 12.0), 2.0);
            draw_star(&star, viewport, &mut fb);
            for y in 0..24 {
                for x in 0..80 {
                    assert_eq!(fb.get(x, y).intensity, 0.0);
                }
            }
        }

        #[test]
        fn glow_appears_only_below_threshold() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            // Tiny disc: only the glow can reach the neighboring cell.
            let mut near = FrameBuffer::new(80, 24);
            draw_star(
                &snapshot_star(config::GLOW_DEPTH - 1.0, Vec2::new(40.0, 12.0), 0.4),
                viewport,
                &mut near,
            );
            assert!(near.get(41, 12).intensity > 0.0);

            let mut far = FrameBuffer::new(80, 24);
            draw_star(
                &snapshot_star(config::GLOW_DEPTH + 1.0, Vec2::new(40.0, 12.0), 0.4),
                viewport,
                &mut far,
            );
            assert_eq!(far.get(41, 12).intensity, 0.0);
        }

        #[test]
        fn streak_appears_only_below_threshold() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            // prev_screen sits 5 cells to the right; the far end of the
            // streak is outside any glow footprint.
            let mut near = FrameBuffer::new(80, 24);
            draw_star(
                &snapshot_star(config::STREAK_DEPTH - 1.0, Vec2::new(40.0, 12.0), 0.4),
                viewport,
                &mut near,
            );
            assert!(near.get(45, 12).intensity > 0.0);

            let mut far = FrameBuffer::new(80, 24);
            draw_star(
                &snapshot_star(config::STREAK_DEPTH + 1.0, Vec2::new(40.0, 12.0), 0.4),
                viewport,
                &mut far,
            );
            assert_eq!(far.get(45, 12).intensity, 0.0);
        }

        #[test]
        fn streak_is_clipped_at_the_surface_edge() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            let mut fb = FrameBuffer::new(80, 24);
            let star = StarSnapshot {
                screen: Vec2::new(78.0, 12.0),
                prev_screen: Vec2::new(95.0, 12.0),
                radius: 0.4,
                opacity: 1.0,
                depth: 100.0,
                color: ColorId::Blue,
            };
            draw_star(&star, viewport, &mut fb);
            assert!(fb.get(79, 12).intensity > 0.0);
            // Cells beyond the edge were simply dropped, no panic.
        }
    }

    mod draw_fn {
        use super::*;

        #[test]
        fn resizes_frame_to_viewport() {
            let viewport = Viewport {
                width: 60,
                height: 20,
            };
            let mut fb = FrameBuffer::new(10, 10);
            draw(&[], 0.0, viewport, &mut fb);
            assert_eq!(fb.width(), 60);
            assert_eq!(fb.height(), 20);
        }

        #[test]
        fn previous_frame_fades_instead_of_clearing() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            let mut fb = FrameBuffer::new(80, 24);
            fb.deposit(10, 10, 1.0, ColorId::Blue);
            draw(&[], 0.0, viewport, &mut fb);
            let kept = fb.get(10, 10).intensity;
            assert!(kept > 0.0);
            assert!((kept - (1.0 - config::TRAIL_FADE)).abs() < 0.1);
        }

        #[test]
        fn nebula_tints_the_surface() {
            let viewport = Viewport {
                width: 80,
                height: 24,
            };
            let mut fb = FrameBuffer::new(80, 24);
            draw(&[], 0.0, viewport, &mut fb);
            let mut lit = 0;
            for y in 0..24 {
                for x in 0..80 {
                    if fb.get(x, y).intensity > 0.0 {
                        lit += 1;
                    }
                }
            }
            assert!(lit > 0);
        }

        #[test]
        fn zero_viewport_draws_nothing() {
            let viewport = Viewport {
                width: 0,
                height: 0,
            };
            let mut fb = FrameBuffer::new(0, 0);
            let star = snapshot_star(100.0, Vec2::new(0.0, 0.0), 1.0);
            draw(&[star], 1.0, viewport, &mut fb);
            // Should not panic
        }
    }
}

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    config,
    core::Field,
    render,
    types::{ColorId, StarSnapshot},
};

const GLYPH_RAMP: [char; 7] = [' ', '·', ':', '+', '*', '#', '@'];

pub fn run() -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut field = Field::new(size.width as f32, size.height as f32);
    let mut snapshot: Vec<StarSnapshot> = Vec::with_capacity(config::STAR_COUNT);
    let mut framebuf = render::FrameBuffer::new(size.width, size.height);

    let started = std::time::Instant::now();
    let mut last_frame = std::time::Instant::now();
    let frame_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);

    loop {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        shutdown_terminal(&mut terminal)?;
                        return Ok(());
                    }
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => {
                    field.set_pointer(mouse.column as f32, mouse.row as f32);
                }
                CrosstermEvent::Resize(width, height) => {
                    field.resize(width as f32, height as f32);
                }
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame_interval {
            field.advance();
            field.snapshot(&mut snapshot);
            let elapsed = started.elapsed().as_secs_f32();

            terminal.draw(|frame| {
                let area = frame.size();
                if area.width == 0 || area.height == 0 {
                    return;
                }
                render::draw(
                    &snapshot,
                    elapsed,
                    render::Viewport {
                        width: area.width,
                        height: area.height,
                    },
                    &mut framebuf,
                );

                let lines: Vec<Line> = (0..framebuf.height())
                    .map(|y| {
                        let mut spans: Vec<Span> = Vec::with_capacity(framebuf.width() as usize);
                        for x in 0..framebuf.width() {
                            let cell = framebuf.get(x, y);
                            spans.push(Span::styled(
                                glyph_for(cell.intensity).to_string(),
                                Style::default()
                                    .fg(color_for(cell.color, cell.intensity))
                                    .bg(background()),
                            ));
                        }
                        Line::from(spans)
                    })
                    .collect();

                frame.render_widget(Paragraph::new(lines), area);
            })?;

            last_frame = std::time::Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn glyph_for(intensity: f32) -> char {
    let last = (GLYPH_RAMP.len() - 1) as f32;
    let idx = (intensity.clamp(0.0, 1.0) * last).round() as usize;
    GLYPH_RAMP[idx]
}

fn background() -> Color {
    let (r, g, b) = config::BACKGROUND_RGB;
    Color::Rgb(r, g, b)
}

/// Palette color composited against the background by intensity, the
/// terminal stand-in for per-frame alpha on a canvas.
fn color_for(color: ColorId, intensity: f32) -> Color {
    let (r, g, b) = color.rgb();
    let (br, bg, bb) = config::BACKGROUND_RGB;
    let t = intensity.clamp(0.0, 1.0);
    let mix = |back: u8, front: u8| (back as f32 + (front as f32 - back as f32) * t) as u8;
    Color::Rgb(mix(br, r), mix(bg, g), mix(bb, b))
}

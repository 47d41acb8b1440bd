//=========================================================================
// Renderer
//=========================================================================
//
// Pure function from race state to pixels. Nothing here mutates the race.
//
// Layer order (back to front):
//   backdrop (sky, grass, road, lane markers)
//   ├─ Start      → title overlay only
//   ├─ Countdown  → countdown digit / "GO!" only
//   └─ otherwise  → finish line, player (+ flame), AI cars, obstacle,
//                   HUD, and the Won/Lost overlay when the race is over
//
// `render_to` draws onto any embedded-graphics target; `render` produces
// an owned RGBA frame for headless use and tests.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod canvas;

//=== Public API ==========================================================

pub use canvas::{Canvas, Scaled};

//=== External Dependencies ===============================================

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;

//=== Internal Dependencies ===============================================

use crate::core::race::track::{CAR_HEIGHT, CAR_WIDTH, OBSTACLE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::core::race::{Phase, RaceState};

//=== Palette =============================================================

pub mod palette {
    use embedded_graphics::pixelcolor::Rgb888;

    pub const SKY: Rgb888 = Rgb888::new(135, 206, 235);
    pub const GRASS: Rgb888 = Rgb888::new(34, 139, 34);
    pub const ROAD: Rgb888 = Rgb888::new(64, 64, 64);
    pub const MARKING: Rgb888 = Rgb888::new(255, 255, 255);
    pub const TEXT: Rgb888 = Rgb888::new(0, 0, 0);

    pub const PLAYER: Rgb888 = Rgb888::new(255, 0, 0);
    pub const LEAD_CAR: Rgb888 = Rgb888::new(0, 0, 255);
    pub const TRAILING_CAR: Rgb888 = Rgb888::new(255, 255, 0);
    pub const WINDSHIELD: Rgb888 = Rgb888::new(0, 255, 255);
    pub const WHEEL: Rgb888 = Rgb888::new(0, 0, 0);
    pub const OBSTACLE: Rgb888 = Rgb888::new(0, 0, 0);

    pub const FLAME_OUTER: Rgb888 = Rgb888::new(255, 200, 0);
    pub const FLAME_INNER: Rgb888 = Rgb888::new(255, 255, 0);
}

//=== Layout ==============================================================

const HORIZON_Y: i32 = 200;
const ROAD_X: i32 = 150;
const ROAD_WIDTH: u32 = 200;

const MARKER_X: i32 = 245;
const MARKER_SIZE: Size = Size::new(10, 20);
const MARKER_SPACING: usize = 40;

const FINISH_LINE_HEIGHT: u32 = 10;

//=== Frame ===============================================================

/// Owned RGBA8 image of one rendered race state.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    /// Blank (fully transparent) frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(at..at + 3)?;
        Some(Rgb888::new(px[0], px[1], px[2]))
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.rgba, self.width, self.height)
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

//=== Entry Points ========================================================

/// Renders `race` into a new 500×600 frame.
pub fn render(race: &RaceState) -> Frame {
    let mut frame = Frame::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    if let Err(e) = render_to(race, &mut frame.canvas()) {
        match e {}
    }
    frame
}

/// Draws `race` onto `target`, overwriting the whole 500×600 area.
pub fn render_to<D>(race: &RaceState, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_backdrop(target)?;

    match race.phase() {
        Phase::Start => draw_title(target),
        Phase::Countdown { remaining } => draw_countdown(target, remaining),
        Phase::Racing | Phase::Finishing | Phase::Won | Phase::Lost => {
            draw_track_objects(race, target)?;
            draw_hud(race, target)?;
            draw_result(race, target)
        }
    }
}

//=== Layers ==============================================================

fn draw_backdrop<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let horizon = HORIZON_Y as u32;
    target.fill_solid(&Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, horizon)), palette::SKY)?;
    target.fill_solid(
        &Rectangle::new(Point::new(0, HORIZON_Y), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - horizon)),
        palette::GRASS,
    )?;
    target.fill_solid(
        &Rectangle::new(Point::new(ROAD_X, 0), Size::new(ROAD_WIDTH, SCREEN_HEIGHT)),
        palette::ROAD,
    )?;

    for y in (0..SCREEN_HEIGHT as i32).step_by(MARKER_SPACING) {
        target.fill_solid(&Rectangle::new(Point::new(MARKER_X, y), MARKER_SIZE), palette::MARKING)?;
    }
    Ok(())
}

fn draw_title<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_big_text(target, "CAR RACING GAME", Point::new(95, 260), 2)?;
    draw_text(target, "Press ENTER to Start", Point::new(150, 300), &FONT_10X20)
}

fn draw_countdown<D>(target: &mut D, remaining: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let label = if remaining > 0 {
        remaining.to_string()
    } else {
        String::from("GO!")
    };
    draw_big_text(target, &label, Point::new(200, 320), 4)
}

fn draw_track_objects<D>(race: &RaceState, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.fill_solid(
        &Rectangle::new(
            Point::new(ROAD_X, race.finish_line_y()),
            Size::new(ROAD_WIDTH, FINISH_LINE_HEIGHT),
        ),
        palette::MARKING,
    )?;

    let player = race.player_hitbox();
    draw_car(target, Point::new(player.x, player.y), palette::PLAYER)?;
    if race.is_boosting() {
        draw_flame(target, Point::new(player.x, player.y))?;
    }

    let [lead, trailer] = race.ai_cars();
    draw_car(target, Point::new(lead.lane().x(), lead.y()), palette::LEAD_CAR)?;
    draw_car(target, Point::new(trailer.lane().x(), trailer.y()), palette::TRAILING_CAR)?;

    let obstacle = race.obstacle();
    target.fill_solid(
        &Rectangle::new(
            Point::new(obstacle.lane().x(), obstacle.y()),
            Size::new(OBSTACLE_SIZE as u32, OBSTACLE_SIZE as u32),
        ),
        palette::OBSTACLE,
    )
}

fn draw_hud<D>(race: &RaceState, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_text(target, &format!("Score: {}", race.score()), Point::new(20, 30), &FONT_9X18_BOLD)?;
    draw_text(target, &format!("Speed: {:.1}", race.speed()), Point::new(20, 50), &FONT_9X18_BOLD)?;
    draw_text(target, &format!("Level: {}", race.level()), Point::new(20, 70), &FONT_9X18_BOLD)
}

fn draw_result<D>(race: &RaceState, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    match race.phase() {
        Phase::Lost => {
            draw_big_text(target, "GAME OVER", Point::new(140, 280), 2)?;
            draw_text(target, "Press R to Restart", Point::new(160, 310), &FONT_10X20)
        }
        Phase::Won => {
            draw_big_text(target, "RACE FINISHED!", Point::new(115, 260), 2)?;
            draw_text(target, &format!("Score: {}", race.score()), Point::new(190, 300), &FONT_10X20)?;
            draw_text(target, &format!("Level Reached: {}", race.level()), Point::new(160, 330), &FONT_10X20)?;
            draw_text(target, "Press R to Race Again", Point::new(140, 360), &FONT_10X20)
        }
        _ => Ok(()),
    }
}

//=== Sprites =============================================================

fn draw_car<D>(target: &mut D, at: Point, body: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let size = Size::new(CAR_WIDTH as u32, CAR_HEIGHT as u32);
    RoundedRectangle::with_equal_corners(Rectangle::new(at, size), Size::new(6, 6))
        .into_styled(PrimitiveStyle::with_fill(body))
        .draw(target)?;

    target.fill_solid(
        &Rectangle::new(at + Point::new(10, 14), Size::new(20, 10)),
        palette::WINDSHIELD,
    )?;

    let wheel = PrimitiveStyle::with_fill(palette::WHEEL);
    for offset in [(-4, 8), (36, 8), (-4, 40), (36, 40)] {
        Ellipse::new(at + Point::from(offset), Size::new(8, 12))
            .into_styled(wheel)
            .draw(target)?;
    }
    Ok(())
}

fn draw_flame<D>(target: &mut D, car: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Ellipse::new(car + Point::new(14, 62), Size::new(12, 16))
        .into_styled(PrimitiveStyle::with_fill(palette::FLAME_OUTER))
        .draw(target)?;
    Ellipse::new(car + Point::new(17, 66), Size::new(6, 10))
        .into_styled(PrimitiveStyle::with_fill(palette::FLAME_INNER))
        .draw(target)
}

//=== Text ================================================================

/// Draws text with its baseline starting at `at`.
fn draw_text<D>(target: &mut D, text: &str, at: Point, font: &MonoFont<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Text::new(text, at, MonoTextStyle::new(font, palette::TEXT)).draw(target)?;
    Ok(())
}

/// Draws `FONT_10X20` text magnified by `scale`, baseline at `at`.
fn draw_big_text<D>(target: &mut D, text: &str, at: Point, scale: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut scaled = Scaled::new(target, at, scale);
    draw_text(&mut scaled, text, Point::zero(), &FONT_10X20)
}

//=========================================================================
// Unit Tests
//=========================================================================

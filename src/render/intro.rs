use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::style::Color;

/// Size of the sparkle box, in terminal cells
pub const INTRO_WIDTH: u16 = 40;
pub const INTRO_HEIGHT: u16 = 12;

/// Frames of sparkles before the title shows up and keys are accepted
const TITLE_DELAY_FRAMES: u32 = 30;

/// Title animation: random dots fill a box from two opposite corners
pub struct IntroScreen {
    pixels: Vec<Option<Color>>,
    frame: u32,
    rng: StdRng,
}

impl IntroScreen {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pixels: vec![None; INTRO_WIDTH as usize * INTRO_HEIGHT as usize],
            frame: 0,
            rng,
        }
    }

    /// Advance the animation by one frame
    pub fn tick(&mut self) {
        let x = self.rng.gen_range(0..INTRO_WIDTH);
        let y = self.rng.gen_range(0..INTRO_HEIGHT);
        let near = Color::Rgb(0, self.rng.gen_range(0..12), self.rng.gen_range(0..120));
        let far = Color::Rgb(0, self.rng.gen_range(0..12), self.rng.gen_range(0..70));

        self.set(x, y, near);
        self.set(INTRO_WIDTH - 1 - x, INTRO_HEIGHT - 1 - y, far);

        if self.frame <= TITLE_DELAY_FRAMES {
            self.frame += 1;
        }
    }

    /// Whether the title is up and a key press should start the game
    pub fn title_visible(&self) -> bool {
        self.frame > TITLE_DELAY_FRAMES
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if x >= INTRO_WIDTH || y >= INTRO_HEIGHT {
            return None;
        }
        self.pixels[y as usize * INTRO_WIDTH as usize + x as usize]
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    fn set(&mut self, x: u16, y: u16, color: Color) {
        self.pixels[y as usize * INTRO_WIDTH as usize + x as usize] = Some(color);
    }
}

impl Default for IntroScreen {
    fn default() -> Self {
        Self::new()
    }
}

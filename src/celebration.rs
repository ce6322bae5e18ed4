use rand::Rng;

pub const HEART_COUNT: usize = 14;
const HEART: char = '♥';

/// A heart drifting upward from the burst origin
#[derive(Debug, Clone)]
pub struct HeartParticle {
    pub origin_x: f64,
    pub origin_y: f64,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl HeartParticle {
    fn new<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            x,
            y,
            // horizontal spread and upward travel, in cells
            dx: rng.gen_range(-8.0..8.0),
            dy: -4.0 - rng.gen_range(0.0..7.0),
            symbol: HEART,
            color_index: rng.gen_range(0..5),
            age: 0.0,
            max_age: rng.gen_range(1.2..2.1),
        }
    }

    /// Fraction of the particle's life already spent
    pub fn life(&self) -> f64 {
        (self.age / self.max_age).clamp(0.0, 1.0)
    }

    fn update(&mut self, dt: f64) -> bool {
        self.age += dt;
        let t = self.life();
        // ease out: fast at first, settling near the end
        let eased = 1.0 - (1.0 - t).powi(2);
        self.x = self.origin_x + self.dx * eased;
        self.y = self.origin_y + self.dy * eased;
        self.age < self.max_age
    }
}

/// Floating hearts burst shown when a workout completes
#[derive(Debug, Default)]
pub struct Celebration {
    pub particles: Vec<HeartParticle>,
    pub is_active: bool,
    pub area_width: f64,
    pub area_height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst from the middle of a `width` x `height` area
    pub fn start(&mut self, width: u16, height: u16) {
        self.start_at(width, height, width as f64 / 2.0, height as f64 / 2.0);
    }

    pub fn start_at(&mut self, width: u16, height: u16, x: f64, y: f64) {
        let mut rng = rand::thread_rng();

        self.area_width = width as f64;
        self.area_height = height as f64;
        self.particles = (0..HEART_COUNT)
            .map(|_| HeartParticle::new(x, y, &mut rng))
            .collect();
        self.is_active = true;
    }

    /// Step the animation by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        let (w, h) = (self.area_width, self.area_height);
        self.particles.retain_mut(|particle| {
            let alive = particle.update(dt);
            let on_screen =
                particle.x >= 0.0 && particle.y >= 0.0 && particle.x < w && particle.y < h;
            alive && on_screen
        });

        if self.particles.is_empty() {
            self.is_active = false;
        }
    }

    pub fn stop(&mut self) {
        self.particles.clear();
        self.is_active = false;
    }
}

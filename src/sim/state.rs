//! Game state and core simulation types
//!
//! One `GameState` owns every entity, the scoreboard and the active mode.
//! The entity collections are sized once at construction and never grow.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::config::{GameConfig, GemLink};
use crate::consts::*;
use crate::error::GameError;
use crate::platform::Backend;
use crate::renderer::atlas;

/// Top-level screen. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen (initial)
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// All lives lost
    GameOver,
    /// Every brick destroyed
    Win,
}

/// Two-option menu cursor shared by every menu-like screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuOption {
    /// Play, resume or restart depending on the screen
    #[default]
    Play,
    Exit,
}

impl MenuOption {
    pub fn toggle(self) -> Self {
        match self {
            MenuOption::Play => MenuOption::Exit,
            MenuOption::Exit => MenuOption::Play,
        }
    }
}

/// Brick rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColor {
    Green,
    Purple,
    Yellow,
    Grey,
    Red,
}

impl BrickColor {
    /// Every row in layout order (top first)
    pub const ALL: [BrickColor; BRICK_LAYERS] = [
        BrickColor::Green,
        BrickColor::Purple,
        BrickColor::Yellow,
        BrickColor::Grey,
        BrickColor::Red,
    ];

    /// Row index from the top of the field
    pub fn row(self) -> usize {
        match self {
            BrickColor::Green => 0,
            BrickColor::Purple => 1,
            BrickColor::Yellow => 2,
            BrickColor::Grey => 3,
            BrickColor::Red => 4,
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            BrickColor::Green => atlas::BRICK_GREEN,
            BrickColor::Purple => atlas::BRICK_PURPLE,
            BrickColor::Yellow => atlas::BRICK_YELLOW,
            BrickColor::Grey => atlas::BRICK_GREY,
            BrickColor::Red => atlas::BRICK_RED,
        }
    }
}

/// One colour row of bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickRow {
    pub color: BrickColor,
    pub bricks: Vec<Entity>,
}

impl BrickRow {
    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}

/// A collectible hidden behind a brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub entity: Entity,
    pub link: GemLink,
}

/// Something that happened during a frame (for logging and the HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the left or right edge
    WallBounce,
    /// Ball reflected off the top edge
    CeilingBounce,
    PaddleBounce,
    /// Ball reached the bottom edge
    BallLost { lives_left: u8 },
    BrickDestroyed { color: BrickColor, index: usize },
    /// The brick hiding this gem is gone; it starts falling
    GemReleased { gem: usize },
    GemCollected { gem: usize },
    /// Gem fell out of the field without being caught
    GemLost { gem: usize },
    ModeChanged { from: GameMode, to: GameMode },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Current screen
    pub mode: GameMode,
    pub menu_option: MenuOption,
    pub paddle: Entity,
    pub ball: Entity,
    /// Ball has been launched and moves under its own velocity
    pub served: bool,
    /// One row per `BrickColor`, in layout order
    pub bricks: Vec<BrickRow>,
    pub gems: Vec<Gem>,
    pub score: u32,
    pub lives: u8,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

/// The brick grid has to fit inside the field, and a ball resting on the
/// paddle has to sit below the lowest row.
fn check_field_fits(
    config: &GameConfig,
    brick: Vec2,
    paddle: Vec2,
    ball: Vec2,
) -> Result<(), GameError> {
    let grid_width = BRICKS_PER_LAYER as f32 * brick.x;
    if grid_width > config.field_width {
        return Err(GameError::Config(format!(
            "field width {} is narrower than the brick grid ({})",
            config.field_width, grid_width
        )));
    }
    if paddle.x > config.field_width {
        return Err(GameError::Config(format!(
            "field width {} is narrower than the paddle ({})",
            config.field_width, paddle.x
        )));
    }

    let grid_bottom = BRICK_LAYERS as f32 * brick.y;
    let paddle_top = config.field_height - config.paddle_bottom_offset;
    let rest_top = paddle_top - (ball.y + BALL_REST_GAP);
    if rest_top < grid_bottom {
        return Err(GameError::Config(format!(
            "paddle at y={} leaves no room below the brick grid (bottom {})",
            paddle_top, grid_bottom
        )));
    }
    Ok(())
}

impl GameState {
    /// Create every entity through the backend and lay out the field.
    ///
    /// Any asset that fails to load aborts construction.
    pub fn new<B: Backend + ?Sized>(config: GameConfig, backend: &mut B) -> Result<Self, GameError> {
        config.validate()?;

        let paddle = Entity::initialize(backend, atlas::PADDLE, true)?;
        let ball = Entity::initialize(backend, atlas::BALL, true)?;

        let mut bricks = Vec::with_capacity(BRICK_LAYERS);
        for color in BrickColor::ALL {
            let row = (0..BRICKS_PER_LAYER)
                .map(|_| Entity::initialize(backend, color.asset(), true))
                .collect::<Result<Vec<_>, _>>()?;
            bricks.push(BrickRow { color, bricks: row });
        }

        let brick_size = bricks[0].bricks[0].size();
        check_field_fits(&config, brick_size, paddle.size(), ball.size())?;

        // Gems are squares as tall as a brick
        let gem_side = brick_size.y;
        let mut gems = Vec::with_capacity(config.gems.len());
        for link in &config.gems {
            let mut entity = Entity::initialize(backend, atlas::GEM, true)?;
            entity.sprite.size = Vec2::splat(gem_side);
            gems.push(Gem { entity, link: *link });
        }

        let mut state = Self {
            lives: config.starting_lives,
            config,
            mode: GameMode::Menu,
            menu_option: MenuOption::Play,
            paddle,
            ball,
            served: false,
            bricks,
            gems,
            score: 0,
            events: Vec::new(),
        };
        state.layout();

        log::info!(
            "Game initialized: {} bricks, {} gems, {} lives",
            state.total_bricks(),
            state.gems.len(),
            state.lives
        );

        Ok(state)
    }

    /// Place every entity at its starting position
    fn layout(&mut self) {
        for row in &mut self.bricks {
            let y = row.color.row() as f32;
            for (i, brick) in row.bricks.iter_mut().enumerate() {
                let size = brick.size();
                brick.set_pos(Vec2::new(i as f32 * size.x, y * size.y));
                brick.set_velocity(Vec2::ZERO);
            }
        }

        for gem in &mut self.gems {
            gem.entity.set_pos(gem.link.spawn);
            gem.entity.set_velocity(Vec2::ZERO);
        }

        let paddle_size = self.paddle.size();
        self.paddle.set_pos(Vec2::new(
            self.config.field_width / 2.0 - paddle_size.x / 2.0,
            self.config.field_height - self.config.paddle_bottom_offset,
        ));
        self.paddle.set_velocity(Vec2::ZERO);

        self.reset_ball();
    }

    /// Put everything back to a fresh round and start playing
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        for brick in self.bricks.iter_mut().flat_map(|row| row.bricks.iter_mut()) {
            brick.show();
        }
        for gem in &mut self.gems {
            gem.entity.show();
        }
        self.layout();
        self.menu_option = MenuOption::Play;
        log::info!("Game restarted");
        self.set_mode(GameMode::Playing);
    }

    /// Switch screens. The only place `mode` changes.
    pub fn set_mode(&mut self, mode: GameMode) {
        let from = self.mode;
        if from == mode {
            return;
        }
        if from == GameMode::Playing {
            // Key releases are ignored off the playing screen
            self.paddle.set_velocity(Vec2::ZERO);
        }
        self.mode = mode;
        log::info!("Mode {:?} -> {:?}", from, mode);
        self.events.push(GameEvent::ModeChanged { from, to: mode });
    }

    /// Where the ball sits before it is served: centred just above the paddle
    pub fn ball_rest_position(&self) -> Vec2 {
        let paddle = self.paddle.bounds();
        let ball_size = self.ball.size();
        Vec2::new(
            paddle.left() + paddle.size.x / 2.0 - ball_size.x / 2.0,
            paddle.top() - (ball_size.y + BALL_REST_GAP),
        )
    }

    /// Stop the ball on the paddle and wait for the next serve
    pub fn reset_ball(&mut self) {
        self.served = false;
        self.ball.set_velocity(Vec2::ZERO);
        let rest = self.ball_rest_position();
        self.ball.set_pos(rest);
    }

    /// Launch the ball. Ignored while it is already in flight.
    pub fn serve(&mut self) {
        if self.served {
            return;
        }
        self.served = true;
        self.ball.set_velocity(self.config.serve_velocity);
        log::debug!("Ball served with velocity {:?}", self.config.serve_velocity);
    }

    pub fn brick(&self, color: BrickColor, index: usize) -> &Entity {
        &self.bricks[color.row()].bricks[index]
    }

    pub fn brick_mut(&mut self, color: BrickColor, index: usize) -> &mut Entity {
        &mut self.bricks[color.row()].bricks[index]
    }

    pub fn total_bricks(&self) -> usize {
        self.bricks.iter().map(|row| row.bricks.len()).sum()
    }

    /// Bricks still standing across every row
    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().map(BrickRow::visible_count).sum()
    }

    /// A gem falls once the brick hiding it is gone
    pub fn gem_released(&self, gem: usize) -> bool {
        let link = self.gems[gem].link;
        !self.brick(link.layer, link.brick).visible
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

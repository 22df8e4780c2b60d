//! Piece spawner - picks the next shape and places it at the spawn origin.
//!
//! New pieces start on row 0, horizontally centered:
//! `col = field_width / 2 - shape_cols / 2` (integer division).

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::rng::{ShapeBag, SimpleRng};
use crate::shape::{random_shape, shape_of, Shape};
use crate::types::ShapeKind;

/// How the next kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Independent uniform draw every spawn (repeats allowed)
    #[default]
    Uniform,
    /// Shuffled 7-bag: each kind once per seven spawns
    Bag,
}

impl SpawnPolicy {
    /// Parse from `"uniform"` or `"bag"` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "random" => Some(SpawnPolicy::Uniform),
            "bag" | "7bag" | "7-bag" => Some(SpawnPolicy::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Uniform => "uniform",
            SpawnPolicy::Bag => "bag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSpawner {
    rng: SimpleRng,
    bag: ShapeBag,
    policy: SpawnPolicy,
    field_width: u8,
}

impl PieceSpawner {
    pub fn new(seed: u32, policy: SpawnPolicy, field_width: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            bag: ShapeBag::new(),
            policy,
            field_width,
        }
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// RNG state; seeding a new spawner with it continues the same stream
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Draw the next kind and its canonical shape
    pub fn draw(&mut self) -> (ShapeKind, Shape) {
        match self.policy {
            SpawnPolicy::Uniform => random_shape(&mut self.rng),
            SpawnPolicy::Bag => {
                let kind = self.bag.draw(&mut self.rng);
                (kind, shape_of(kind))
            }
        }
    }

    /// Spawn column for a shape
    pub fn spawn_col(&self, shape: &Shape) -> i8 {
        (self.field_width / 2) as i8 - (shape.cols() / 2) as i8
    }

    /// Draw a new hold-eligible piece at the spawn origin
    pub fn spawn(&mut self) -> Piece {
        let (kind, shape) = self.draw();
        self.spawn_shape(kind, shape, true)
    }

    /// Place a given shape at the spawn origin (used when swapping from hold)
    pub fn spawn_shape(&self, kind: ShapeKind, shape: Shape, hold_eligible: bool) -> Piece {
        Piece {
            kind,
            shape,
            col: self.spawn_col(&shape),
            row: 0,
            hold_eligible,
        }
    }
}

//! Player configuration: search limits, material weights and their TOML form.
//!
//! Everything here is fixed at construction and never changes for the
//! lifetime of a player.
//!
//! ```toml
//! material = "signed"
//!
//! [search]
//! depth = 4
//! delay_ms = 500
//! seed = 42
//!
//! [figure_values]
//! queen = 180
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::time_control::TIME_THRESHOLD_MS;
use crate::types::PieceKind;

pub const DEFAULT_DEPTH: u32 = 5;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Search limits for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSearchConfig")]
pub struct SearchConfig {
    depth: u32,
    delay_ms: u64,
    seed: u64,
    time_threshold_ms: u64,
}

impl SearchConfig {
    /// Create a validated config. A depth of zero would reduce the search to
    /// a single static evaluation and is rejected.
    pub fn new(depth: u32, delay_ms: u64, seed: u64) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::NonPositiveDepth(0));
        }
        Ok(Self {
            depth,
            delay_ms,
            seed,
            time_threshold_ms: TIME_THRESHOLD_MS,
        })
    }

    /// Override the remaining-time threshold below which search stops descending.
    pub fn with_time_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.time_threshold_ms = threshold_ms;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_threshold_ms(&self) -> u64 {
        self.time_threshold_ms
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            delay_ms: DEFAULT_DELAY_MS,
            seed: rand::random(),
            time_threshold_ms: TIME_THRESHOLD_MS,
        }
    }
}

/// Unvalidated `[search]` table as it appears in a config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSearchConfig {
    #[serde(default = "default_depth")]
    depth: i64,
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,
    seed: Option<u64>,
    #[serde(default = "default_time_threshold_ms")]
    time_threshold_ms: u64,
}

fn default_depth() -> i64 {
    DEFAULT_DEPTH as i64
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_time_threshold_ms() -> u64 {
    TIME_THRESHOLD_MS
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        if raw.depth <= 0 {
            return Err(ConfigError::NonPositiveDepth(raw.depth));
        }
        let depth =
            u32::try_from(raw.depth).map_err(|_| ConfigError::DepthOutOfRange(raw.depth))?;
        let seed = raw.seed.unwrap_or_else(rand::random);
        Ok(Self::new(depth, raw.delay_ms, seed)?.with_time_threshold_ms(raw.time_threshold_ms))
    }
}

/// Material weight per piece kind.
///
/// Kings carry no material weight by default since they can never be traded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureValues {
    pawn: u32,
    knight: u32,
    bishop: u32,
    rook: u32,
    queen: u32,
    king: u32,
}

impl FigureValues {
    pub fn new(pawn: u32, knight: u32, bishop: u32, rook: u32, queen: u32, king: u32) -> Self {
        Self {
            pawn,
            knight,
            bishop,
            rook,
            queen,
            king,
        }
    }

    /// Returns a copy with the weight for `kind` replaced.
    pub fn with(mut self, kind: PieceKind, value: u32) -> Self {
        *self.slot_mut(kind) = value;
        self
    }

    #[inline]
    pub fn get(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }

    fn slot_mut(&mut self, kind: PieceKind) -> &mut u32 {
        match kind {
            PieceKind::Pawn => &mut self.pawn,
            PieceKind::Knight => &mut self.knight,
            PieceKind::Bishop => &mut self.bishop,
            PieceKind::Rook => &mut self.rook,
            PieceKind::Queen => &mut self.queen,
            PieceKind::King => &mut self.king,
        }
    }
}

impl Default for FigureValues {
    fn default() -> Self {
        Self::new(10, 50, 30, 60, 200, 0)
    }
}

/// How material is folded into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialBalance {
    /// Own material minus opponent material.
    #[default]
    Signed,
    /// Sum of all material regardless of owner.
    ///
    /// Known defective: captures never change the score in the capturer's
    /// favor, only the total shrinks. Kept for comparing against old games.
    Unsigned,
}

/// Complete player configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub figure_values: FigureValues,
    #[serde(default)]
    pub material: MaterialBalance,
}

impl PlayerConfig {
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            figure_values: FigureValues::default(),
            material: MaterialBalance::default(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

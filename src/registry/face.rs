//! Block Faces
//!
//! Names the six faces of a block and the catalog keys that can texture each
//! one, from the most specific key to `all`.

use std::fmt;

/// Catalog key binding one texture to every face
pub const ALL_FACES_KEY: &str = "all";

/// The six faces a renderer samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockFace {
    Top,
    Bottom,
    North, // -Z
    South, // +Z
    East,  // +X
    West,  // -X
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Top,
        BlockFace::Bottom,
        BlockFace::North,
        BlockFace::South,
        BlockFace::East,
        BlockFace::West,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BlockFace::Top => "top",
            BlockFace::Bottom => "bottom",
            BlockFace::North => "north",
            BlockFace::South => "south",
            BlockFace::East => "east",
            BlockFace::West => "west",
        }
    }

    /// Catalog keys that can supply this face, most specific first.
    /// `front` is the south face.
    pub fn lookup_keys(&self) -> &'static [&'static str] {
        match self {
            BlockFace::Top => &["top", ALL_FACES_KEY],
            BlockFace::Bottom => &["bottom", ALL_FACES_KEY],
            BlockFace::North => &["north", "side", ALL_FACES_KEY],
            BlockFace::South => &["south", "front", "side", ALL_FACES_KEY],
            BlockFace::East => &["east", "side", ALL_FACES_KEY],
            BlockFace::West => &["west", "side", ALL_FACES_KEY],
        }
    }
}

impl fmt::Display for BlockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

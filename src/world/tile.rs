//! Tile catalog
//!
//! Tile kinds with their solidity and vision-blocking factors. A tile-set
//! file may reskin or retune any kind; the resolved catalog is consulted
//! once per cell at map load and by the renderer each frame.

use serde::{Deserialize, Serialize};

/// Kinds of tiles in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Path,
    Water,
    Tree,
    Wall,
    Pillar,
    Window,
    DoorClosed,
    DoorOpen,
}

impl TileKind {
    /// Every kind, in declaration order.
    pub const ALL: [TileKind; 9] = [
        TileKind::Grass,
        TileKind::Path,
        TileKind::Water,
        TileKind::Tree,
        TileKind::Wall,
        TileKind::Pillar,
        TileKind::Window,
        TileKind::DoorClosed,
        TileKind::DoorOpen,
    ];

    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            TileKind::Water
                | TileKind::Tree
                | TileKind::Wall
                | TileKind::Pillar
                | TileKind::Window
                | TileKind::DoorClosed
        )
    }

    /// How strongly the tile blocks vision, 0.0 clear to 1.0 opaque.
    /// Trees and windows are partial occluders; water blocks movement
    /// but not sight.
    pub fn occlusion(&self) -> f32 {
        match self {
            TileKind::Wall => 1.0,
            TileKind::DoorClosed => 1.0,
            TileKind::Pillar => 0.75,
            TileKind::Tree => 0.55,
            TileKind::Window => 0.35,
            _ => 0.0,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            TileKind::Grass => ',',
            TileKind::Path => '.',
            TileKind::Water => '~',
            TileKind::Tree => 'T',
            TileKind::Wall => '#',
            TileKind::Pillar => 'o',
            TileKind::Window => '=',
            TileKind::DoorClosed => '+',
            TileKind::DoorOpen => '/',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileKind::Grass => (70, 110, 55),
            TileKind::Path => (140, 125, 95),
            TileKind::Water => (70, 110, 170),
            TileKind::Tree => (40, 85, 40),
            TileKind::Wall => (130, 110, 90),
            TileKind::Pillar => (160, 150, 135),
            TileKind::Window => (150, 190, 210),
            TileKind::DoorClosed => (139, 90, 43),
            TileKind::DoorOpen => (139, 90, 43),
        }
    }

    pub fn bg_color(&self) -> (u8, u8, u8) {
        match self {
            TileKind::Grass => (18, 26, 14),
            TileKind::Path => (30, 27, 18),
            TileKind::Water => (12, 20, 38),
            TileKind::Tree => (14, 22, 12),
            TileKind::Wall => (40, 35, 30),
            TileKind::Pillar => (28, 26, 22),
            TileKind::Window => (30, 36, 42),
            TileKind::DoorClosed => (30, 25, 20),
            TileKind::DoorOpen => (20, 18, 15),
        }
    }
}

/// One catalog entry, as stored in a tile-set file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDef {
    pub kind: TileKind,
    pub glyph: char,
    pub fg: (u8, u8, u8),
    pub bg: (u8, u8, u8),
    pub solid: bool,
    pub occlusion: f32,
}

impl TileDef {
    /// The built-in definition of a kind.
    pub fn base(kind: TileKind) -> Self {
        Self {
            kind,
            glyph: kind.glyph(),
            fg: kind.fg_color(),
            bg: kind.bg_color(),
            solid: kind.is_solid(),
            occlusion: kind.occlusion(),
        }
    }
}

/// Resolved tile catalog, one definition per kind.
#[derive(Debug, Clone)]
pub struct TileSet {
    defs: Vec<TileDef>,
}

impl TileSet {
    /// Replace built-in definitions with entries from a tile-set file.
    /// Kinds the file does not mention keep their defaults; occlusion is
    /// clamped into [0, 1] on the way in.
    pub fn with_overrides(overrides: Vec<TileDef>) -> Self {
        let mut set = Self::default();
        for mut def in overrides {
            def.occlusion = def.occlusion.clamp(0.0, 1.0);
            let kind = def.kind;
            set.defs[kind as usize] = def;
        }
        set
    }

    pub fn get(&self, kind: TileKind) -> &TileDef {
        &self.defs[kind as usize]
    }

    /// The kind a map-file glyph stands for.
    pub fn kind_for_glyph(&self, glyph: char) -> Option<TileKind> {
        self.defs.iter().find(|d| d.glyph == glyph).map(|d| d.kind)
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self {
            defs: TileKind::ALL.iter().map(|&k| TileDef::base(k)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_every_kind() {
        let set = TileSet::default();
        for kind in TileKind::ALL {
            assert_eq!(set.get(kind).kind, kind);
        }
    }

    #[test]
    fn test_override_replaces_only_named_kinds() {
        let set = TileSet::with_overrides(vec![TileDef {
            kind: TileKind::Window,
            glyph: 'w',
            fg: (200, 200, 200),
            bg: (0, 0, 0),
            solid: true,
            occlusion: 0.5,
        }]);
        assert_eq!(set.get(TileKind::Window).glyph, 'w');
        assert_eq!(set.get(TileKind::Window).occlusion, 0.5);
        assert_eq!(set.get(TileKind::Wall), &TileDef::base(TileKind::Wall));
    }

    #[test]
    fn test_override_occlusion_is_clamped() {
        let set = TileSet::with_overrides(vec![TileDef {
            kind: TileKind::Tree,
            glyph: 'T',
            fg: (0, 0, 0),
            bg: (0, 0, 0),
            solid: true,
            occlusion: 3.5,
        }]);
        assert_eq!(set.get(TileKind::Tree).occlusion, 1.0);
    }

    #[test]
    fn test_glyph_lookup() {
        let set = TileSet::default();
        assert_eq!(set.kind_for_glyph('#'), Some(TileKind::Wall));
        assert_eq!(set.kind_for_glyph(','), Some(TileKind::Grass));
        assert_eq!(set.kind_for_glyph('?'), None);
    }
}

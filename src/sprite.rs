/// Sprite-sheet geometry and asset identity for the flip animation.
/// The sheets live on a content host; only their identity and landing-face
/// grouping matter here, never their pixel content.

/// Columns per sheet.
pub const COLS: usize = 8;
/// Rows per sheet.
pub const ROWS: usize = 32;
/// Width of one frame cell in pixels.
pub const FRAME_WIDTH: i32 = 512;
/// Height of one frame cell in pixels.
pub const FRAME_HEIGHT: i32 = 500;
/// Total frames on a sheet.
pub const TOTAL_FRAMES: usize = COLS * ROWS;
/// Frame at which the flip is visually settled (short of the full sheet).
pub const TARGET_FRAME: usize = 252;
/// Logical playback rate. Used only for duration math, not for scheduling.
pub const TARGET_FPS: f64 = 45.0;

/// Content host for sheets and face icons.
const ASSET_BASE: &str = "https://images.dahood.vip";

/// Pixel offset of one frame cell within a sheet.
///
/// Offsets are negative: they are background-position values that shift
/// the sheet so the wanted cell lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePosition {
    pub x: i32,
    pub y: i32,
}

impl FramePosition {
    /// CSS-style background offset, e.g. `"-3072px -7500px"`.
    pub fn offset_string(&self) -> String {
        format!("{}px {}px", self.x, self.y)
    }
}

/// Precomputed frame-index → sheet-offset lookup. Built once at startup.
pub struct FrameTable {
    positions: Vec<FramePosition>,
}

impl FrameTable {
    /// Walk the grid row-major: frame i sits at column i % COLS,
    /// row i / COLS.
    pub fn build() -> Self {
        let mut positions = Vec::with_capacity(TOTAL_FRAMES);
        for frame in 0..TOTAL_FRAMES {
            let col = (frame % COLS) as i32;
            let row = (frame / COLS) as i32;
            positions.push(FramePosition {
                x: -(col * FRAME_WIDTH),
                y: -(row * FRAME_HEIGHT),
            });
        }
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Offset for a frame, or None past the end of the sheet.
    pub fn get(&self, frame: usize) -> Option<FramePosition> {
        self.positions.get(frame).copied()
    }

    /// Offset of the settle frame.
    pub fn target(&self) -> FramePosition {
        self.positions[TARGET_FRAME]
    }
}

/// Landing face of a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Heads,
    Tails,
}

impl Face {
    pub fn other(self) -> Self {
        match self {
            Face::Heads => Face::Tails,
            Face::Tails => Face::Heads,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Face::Heads => "heads",
            Face::Tails => "tails",
        }
    }

    /// Badge icon shown next to each avatar.
    pub fn icon_url(self) -> &'static str {
        match self {
            Face::Heads => "https://images.dahood.vip/heads.png",
            Face::Tails => "https://images.dahood.vip/tails.png",
        }
    }
}

/// One of the four pre-rendered flip sheets. The name encodes the face the
/// coin starts on and the face it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSheet {
    HeadsLandHeads,
    TailsLandHeads,
    HeadsLandTails,
    TailsLandTails,
}

impl SpriteSheet {
    pub const ALL: [SpriteSheet; 4] = [
        Self::HeadsLandHeads,
        Self::TailsLandHeads,
        Self::HeadsLandTails,
        Self::TailsLandTails,
    ];

    /// Sheets whose animation ends on heads.
    pub const LANDING_HEADS: [SpriteSheet; 2] = [Self::HeadsLandHeads, Self::TailsLandHeads];
    /// Sheets whose animation ends on tails.
    pub const LANDING_TAILS: [SpriteSheet; 2] = [Self::HeadsLandTails, Self::TailsLandTails];

    pub fn url(self) -> String {
        let name = match self {
            Self::HeadsLandHeads => "peak_heads_land_heads.png",
            Self::TailsLandHeads => "peak_tails_land_heads.png",
            Self::HeadsLandTails => "peak_heads_land_tails.png",
            Self::TailsLandTails => "peak_tails_land_tails.png",
        };
        format!("{ASSET_BASE}/{name}")
    }

    /// Uniform draw over all four sheets.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// Landing face by set membership. The sets are closed and disjoint, so
    /// a sheet in neither set would be a defect; callers treat None as
    /// "no winner" rather than an error.
    pub fn landing_face(self) -> Option<Face> {
        if Self::LANDING_HEADS.contains(&self) {
            Some(Face::Heads)
        } else if Self::LANDING_TAILS.contains(&self) {
            Some(Face::Tails)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_table_matches_grid() {
        let table = FrameTable::build();
        assert_eq!(table.len(), 256);
        for frame in 0..TOTAL_FRAMES {
            let pos = table.get(frame).unwrap();
            assert_eq!(pos.x, -((frame % 8) as i32 * 512));
            assert_eq!(pos.y, -((frame / 8) as i32 * 500));
        }
    }

    #[test]
    fn frame_126_offset() {
        let table = FrameTable::build();
        let pos = table.get(126).unwrap();
        assert_eq!(pos, FramePosition { x: -3072, y: -7500 });
    }

    #[test]
    fn target_frame_in_bounds() {
        let table = FrameTable::build();
        assert_eq!(table.target(), table.get(TARGET_FRAME).unwrap());
        assert!(table.get(TOTAL_FRAMES).is_none());
    }

    #[test]
    fn offset_string_format() {
        let pos = FramePosition { x: -3072, y: -7500 };
        assert_eq!(pos.offset_string(), "-3072px -7500px");
        let origin = FramePosition { x: 0, y: 0 };
        assert_eq!(origin.offset_string(), "0px 0px");
    }

    #[test]
    fn sheets_partition_into_landing_sets() {
        for sheet in SpriteSheet::ALL {
            let in_heads = SpriteSheet::LANDING_HEADS.contains(&sheet);
            let in_tails = SpriteSheet::LANDING_TAILS.contains(&sheet);
            assert!(in_heads != in_tails, "{sheet:?} must be in exactly one set");
        }
    }

    #[test]
    fn landing_face_follows_set() {
        for sheet in SpriteSheet::LANDING_HEADS {
            assert_eq!(sheet.landing_face(), Some(Face::Heads));
        }
        for sheet in SpriteSheet::LANDING_TAILS {
            assert_eq!(sheet.landing_face(), Some(Face::Tails));
        }
    }
}

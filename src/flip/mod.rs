pub mod driver;
pub mod outcome;

use instant::Instant;

use crate::sprite::{Face, FramePosition, FrameTable, SpriteSheet};

use self::driver::{AnimationDriver, DriverStep};
use self::outcome::{FlipOutcome, Player};

/// Everything the rendering shell needs to draw one frame of the card.
#[derive(Debug, Clone)]
pub struct FlipSnapshot {
    pub sheet_url: String,
    pub offset: FramePosition,
    pub offset_string: String,
    pub is_animating: bool,
    pub winner: Option<Player>,
    pub player1_side: Face,
    pub player2_side: Face,
}

/// Owns all flip state: the precomputed frame table, the RNG, the current
/// outcome, the visible offset, and the in-flight run (which doubles as
/// the re-entrancy guard).
pub struct FlipController {
    table: FrameTable,
    rng: fastrand::Rng,
    outcome: FlipOutcome,
    driver: Option<AnimationDriver>,
    offset: FramePosition,
    winner: Option<Player>,
}

impl FlipController {
    /// One-time setup: build the frame table and draw an initial outcome
    /// so the idle card shows a sheet before the first flip.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_rng(mut rng: fastrand::Rng) -> Self {
        let outcome = FlipOutcome::draw(&mut rng);
        Self {
            table: FrameTable::build(),
            rng,
            outcome,
            driver: None,
            offset: FramePosition { x: 0, y: 0 },
            winner: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_some()
    }

    /// Start a flip at `now`: redraw sides and sheet, clear the previous
    /// winner, begin the run. Ignored while a run is in flight or if the
    /// frame table is empty.
    pub fn start(&mut self, now: Instant) {
        if self.driver.is_some() {
            log::debug!("flip requested mid-run, ignored");
            return;
        }
        if self.table.is_empty() {
            log::debug!("flip requested before frame table init, ignored");
            return;
        }

        self.outcome = FlipOutcome::draw(&mut self.rng);
        self.winner = None;
        self.driver = Some(AnimationDriver::start_at(now));
        log::info!(
            "flip started: p1={} p2={} sheet={:?}",
            self.outcome.player1_side.label(),
            self.outcome.player2_side.label(),
            self.outcome.sheet,
        );
    }

    /// Advance the animation to `now`. Call once per displayed frame; a
    /// no-op while idle. On settle, snaps to the target frame and binds
    /// the winner.
    pub fn tick(&mut self, now: Instant) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        match driver.tick(now, &self.table) {
            DriverStep::Frame(pos) => self.offset = pos,
            DriverStep::Hold => {}
            DriverStep::Settled(pos) => {
                self.offset = pos;
                self.driver = None;
                self.winner = self.outcome.winner();
                log::info!(
                    "flip settled on {}: winner {:?}",
                    self.outcome
                        .sheet
                        .landing_face()
                        .map(Face::label)
                        .unwrap_or("nothing"),
                    self.winner,
                );
            }
        }
    }

    pub fn sheet(&self) -> SpriteSheet {
        self.outcome.sheet
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn snapshot(&self) -> FlipSnapshot {
        FlipSnapshot {
            sheet_url: self.outcome.sheet.url(),
            offset: self.offset,
            offset_string: self.offset.offset_string(),
            is_animating: self.driver.is_some(),
            winner: self.winner,
            player1_side: self.outcome.player1_side,
            player2_side: self.outcome.player2_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn controller(seed: u64) -> FlipController {
        FlipController::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn run_to_settle(flip: &mut FlipController, t0: Instant) {
        flip.start(t0);
        assert!(flip.is_animating());
        for ms in (0..=5600).step_by(16) {
            flip.tick(t0 + Duration::from_millis(ms));
        }
        flip.tick(t0 + Duration::from_millis(5601));
        assert!(!flip.is_animating());
    }

    #[test]
    fn idle_card_has_a_sheet_and_no_winner() {
        let flip = controller(1);
        let snap = flip.snapshot();
        assert!(snap.sheet_url.starts_with("https://"));
        assert!(!snap.is_animating);
        assert_eq!(snap.winner, None);
        assert_ne!(snap.player1_side, snap.player2_side);
    }

    #[test]
    fn completed_flip_binds_consistent_winner() {
        let mut flip = controller(2);
        let t0 = Instant::now();
        run_to_settle(&mut flip, t0);

        let snap = flip.snapshot();
        let face = flip.sheet().landing_face().unwrap();
        match snap.winner {
            Some(Player::One) => assert_eq!(snap.player1_side, face),
            Some(Player::Two) => assert_eq!(snap.player2_side, face),
            None => panic!("settled flip must have a winner"),
        }
        assert_eq!(snap.offset, FramePosition { x: -2048, y: -15500 });
        assert_eq!(snap.offset_string, "-2048px -15500px");
    }

    #[test]
    fn retrigger_mid_run_is_ignored() {
        let mut flip = controller(3);
        let t0 = Instant::now();
        flip.start(t0);
        flip.tick(t0 + Duration::from_millis(1000));

        let before = flip.snapshot();
        flip.start(t0 + Duration::from_millis(1001));
        let after = flip.snapshot();

        assert_eq!(before.sheet_url, after.sheet_url);
        assert_eq!(before.player1_side, after.player1_side);
        assert_eq!(before.offset, after.offset);
        assert!(after.is_animating);
    }

    #[test]
    fn new_flip_resets_winner_and_redraws() {
        let mut flip = controller(4);
        let t0 = Instant::now();
        run_to_settle(&mut flip, t0);
        assert!(flip.winner().is_some());

        let t1 = t0 + Duration::from_millis(10_000);
        flip.start(t1);
        let snap = flip.snapshot();
        assert!(snap.is_animating);
        assert_eq!(snap.winner, None);
        assert_ne!(snap.player1_side, snap.player2_side);
    }

    #[test]
    fn consecutive_flips_rerandomize() {
        let mut flip = controller(5);
        let mut seen = Vec::new();
        let mut t = Instant::now();
        for _ in 0..32 {
            run_to_settle(&mut flip, t);
            seen.push((flip.snapshot().player1_side, flip.sheet()));
            t = t + Duration::from_millis(10_000);
        }
        seen.dedup();
        assert!(seen.len() > 1, "32 flips never varied side or sheet");
    }

    #[test]
    fn mid_run_offset_matches_elapsed_time() {
        let mut flip = controller(6);
        let t0 = Instant::now();
        flip.start(t0);

        // Half of the ≈5600 ms run: frame 126.
        flip.tick(t0 + Duration::from_millis(2800));
        let snap = flip.snapshot();
        assert_eq!(snap.offset, FramePosition { x: -3072, y: -7500 });
        assert!(snap.is_animating);
        assert_eq!(snap.winner, None);
    }
}

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use super::deck::Card;
use super::player::{Player, RankedPlayer, ranking};
use super::scheduler::{PopupAction, PopupOptions, PopupSlot, TurnPopup};
use super::tuning::RoundTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Idle,
    Playing,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotPlaying,
    Locked,
    UnknownCard,
    AlreadyFaceUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// First card of a pair is face up.
    Flipped,
    Matched,
    Mismatched,
    /// The match that finished the round.
    Completed,
    /// A pending mismatch was turned back; the clicked card was already face up.
    MismatchResolved,
}

impl ClickOutcome {
    /// Whether the clicked card was flipped.
    pub fn is_accepted(self) -> bool {
        !matches!(
            self,
            ClickOutcome::Ignored(_) | ClickOutcome::MismatchResolved
        )
    }

    /// Whether the round changed at all.
    pub fn changes_state(self) -> bool {
        !matches!(self, ClickOutcome::Ignored(_))
    }
}

// Two face-up cards waiting to be turned back.
#[derive(Debug, Clone)]
struct PendingMismatch {
    ids: [String; 2],
    next_index: usize,
    // Set only when nobody takes turns; otherwise the announcement drives it.
    resolve_at: Option<Instant>,
}

/// One round of the matching game.
///
/// All time-dependent behavior takes `now` explicitly. Owners call
/// `advance` at or after `next_deadline` to fire due timers.
#[derive(Debug, Clone)]
pub struct Round {
    tuning: RoundTuning,
    status: GameStatus,
    cards: Vec<Card>,
    players: Vec<Player>,
    pair_count: usize,
    matches: usize,
    active_index: usize,
    selected_ids: Vec<String>,
    locked: bool,
    pending_mismatch: Option<PendingMismatch>,
    popup: PopupSlot,
    settle_at: Option<Instant>,
}

impl Round {
    pub fn new(tuning: RoundTuning) -> Self {
        Self {
            tuning,
            status: GameStatus::Idle,
            cards: Vec::new(),
            players: Vec::new(),
            pair_count: 0,
            matches: 0,
            active_index: 0,
            selected_ids: Vec::new(),
            locked: false,
            pending_mismatch: None,
            popup: PopupSlot::default(),
            settle_at: None,
        }
    }

    /// Deals `deck` to `players` and announces the first player.
    pub fn start(&mut self, deck: Vec<Card>, players: Vec<Player>, now: Instant) {
        self.reset();
        self.pair_count = deck
            .iter()
            .map(|card| card.match_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        self.cards = deck;
        self.players = players;
        self.status = GameStatus::Playing;

        if let Some(first) = self.players.first() {
            let popup = turn_popup(first);
            let options = PopupOptions {
                lock_board: false,
                unlock_after: false,
                on_complete: PopupAction::None,
            };
            self.popup.show(popup, options, now, self.tuning.turn_popup);
        }
    }

    /// Plays again with a fresh deck and the same seats, scores zeroed.
    pub fn restart(&mut self, deck: Vec<Card>, now: Instant) {
        let players = std::mem::take(&mut self.players)
            .into_iter()
            .map(|player| Player { score: 0, ..player })
            .collect();
        self.start(deck, players, now);
    }

    /// Drops the deck, players and every timer; back to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning);
    }

    pub fn click(&mut self, card_id: &str, now: Instant) -> ClickOutcome {
        if self.status != GameStatus::Playing {
            return ClickOutcome::Ignored(IgnoreReason::NotPlaying);
        }
        if self.locked {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }

        let Some(index) = self.cards.iter().position(|card| card.id == card_id) else {
            return ClickOutcome::Ignored(IgnoreReason::UnknownCard);
        };

        let resolved_pending = self.pending_mismatch.is_some();
        if resolved_pending {
            self.resolve_pending_mismatch();
            self.popup.clear();
        }

        let card = &mut self.cards[index];
        if card.is_matched || card.is_flipped {
            return if resolved_pending {
                ClickOutcome::MismatchResolved
            } else {
                ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
            };
        }
        card.is_flipped = true;

        if !self.selected_ids.iter().any(|id| id == card_id) {
            self.selected_ids.push(card_id.to_string());
        }
        if self.selected_ids.len() > 2 {
            let excess = self.selected_ids.len() - 2;
            self.selected_ids.drain(..excess);
        }

        if self.selected_ids.len() == 2 {
            self.resolve_selection(now)
        } else {
            ClickOutcome::Flipped
        }
    }

    /// Fires every timer due at `now`. Returns whether anything changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.settle_at.is_some_and(|at| at <= now) {
            self.settle_at = None;
            self.selected_ids.clear();
            if self.status == GameStatus::Playing {
                self.locked = false;
            }
            changed = true;
        }

        let reveal_due = self
            .pending_mismatch
            .as_ref()
            .and_then(|pending| pending.resolve_at)
            .is_some_and(|at| at <= now);
        if reveal_due {
            self.resolve_pending_mismatch();
            changed = true;
        }

        if let Some(options) = self.popup.take_due(now) {
            if options.on_complete == PopupAction::ResolveMismatch {
                self.resolve_pending_mismatch();
            }
            if options.lock_board && options.unlock_after && self.status == GameStatus::Playing {
                self.locked = false;
            }
            changed = true;
        }

        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.settle_at,
            self.pending_mismatch.as_ref().and_then(|p| p.resolve_at),
            self.popup.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn ranking(&self) -> Vec<RankedPlayer> {
        ranking(&self.players)
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_index)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_pending_mismatch(&self) -> bool {
        self.pending_mismatch.is_some()
    }

    pub fn turn_popup(&self) -> Option<&TurnPopup> {
        self.popup.current()
    }

    /// Percentage of groups found, rounded and capped at 100.
    pub fn progress(&self) -> u8 {
        if self.pair_count == 0 {
            return 0;
        }
        let percent = (self.matches as f64 / self.pair_count as f64 * 100.0).round();
        percent.min(100.0) as u8
    }

    fn resolve_selection(&mut self, now: Instant) -> ClickOutcome {
        self.locked = true;

        let first = self.card_index(&self.selected_ids[0]);
        let second = self.card_index(&self.selected_ids[1]);
        let (Some(first), Some(second)) = (first, second) else {
            self.selected_ids.clear();
            self.locked = false;
            return ClickOutcome::Flipped;
        };

        if self.cards[first].match_id == self.cards[second].match_id {
            self.cards[first].is_matched = true;
            self.cards[second].is_matched = true;
            if let Some(player) = self.players.get_mut(self.active_index) {
                player.score += 1;
            }
            self.matches += 1;

            if self.matches >= self.pair_count {
                self.complete();
                return ClickOutcome::Completed;
            }
            self.settle_at = Some(now + self.tuning.match_settle);
            return ClickOutcome::Matched;
        }

        let ids = [
            self.cards[first].id.clone(),
            self.cards[second].id.clone(),
        ];
        if self.players.is_empty() {
            self.pending_mismatch = Some(PendingMismatch {
                ids,
                next_index: self.active_index,
                resolve_at: Some(now + self.tuning.mismatch_reveal),
            });
            return ClickOutcome::Mismatched;
        }

        let next_index = (self.active_index + 1) % self.players.len();
        self.pending_mismatch = Some(PendingMismatch {
            ids,
            next_index,
            resolve_at: None,
        });

        let lock = self.tuning.lock_during_announcement;
        let options = PopupOptions {
            lock_board: lock,
            unlock_after: true,
            on_complete: PopupAction::ResolveMismatch,
        };
        let popup = turn_popup(&self.players[next_index]);
        self.popup.show(popup, options, now, self.tuning.turn_popup);
        self.locked = lock;
        ClickOutcome::Mismatched
    }

    fn resolve_pending_mismatch(&mut self) {
        let Some(pending) = self.pending_mismatch.take() else {
            return;
        };
        for card in &mut self.cards {
            if pending.ids.contains(&card.id) {
                card.is_flipped = false;
            }
        }
        self.selected_ids.clear();
        self.active_index = pending.next_index;
        if self.status == GameStatus::Playing {
            self.locked = false;
        }
    }

    fn complete(&mut self) {
        self.status = GameStatus::Complete;
        self.popup.clear();
        self.settle_at = None;
        self.pending_mismatch = None;
        self.selected_ids.clear();
        self.locked = true;
    }

    fn card_index(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

fn turn_popup(player: &Player) -> TurnPopup {
    TurnPopup {
        player_id: player.id.clone(),
        name: player.name.clone(),
        color: player.color.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deck::{DuplicateLevel, create_deck};
    use crate::domain::term::Term;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn term(id: &str) -> Term {
        Term {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            image: format!("/resimler/kartlar/{id}.png"),
        }
    }

    fn card(id: &str, match_id: &str) -> Card {
        Card {
            id: id.to_string(),
            match_id: match_id.to_string(),
            term: term(match_id),
            is_flipped: false,
            is_matched: false,
            tilt: 0.0,
        }
    }

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_uppercase(),
            score: 0,
            color: "#20b2aa".into(),
        }
    }

    // a1/a2, b1/b2, c1/c2 in a fixed order.
    fn small_deck() -> Vec<Card> {
        vec![
            card("a1", "a"),
            card("b1", "b"),
            card("c1", "c"),
            card("a2", "a"),
            card("b2", "b"),
            card("c2", "c"),
        ]
    }

    fn playing(players: Vec<Player>, now: Instant) -> Round {
        let mut round = Round::new(RoundTuning::default());
        round.start(small_deck(), players, now);
        round
    }

    fn card_state<'a>(round: &'a Round, id: &str) -> &'a Card {
        round.cards().iter().find(|card| card.id == id).expect("card")
    }

    #[test]
    fn starts_idle_and_ignores_clicks() {
        let mut round = Round::new(RoundTuning::default());
        assert_eq!(round.status(), GameStatus::Idle);
        assert_eq!(
            round.click("a1", Instant::now()),
            ClickOutcome::Ignored(IgnoreReason::NotPlaying)
        );
    }

    #[test]
    fn first_player_announcement_does_not_lock() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        assert_eq!(round.turn_popup().map(|p| p.player_id.as_str()), Some("p1"));
        assert!(!round.is_locked());
        assert_eq!(round.click("a1", now), ClickOutcome::Flipped);

        assert!(round.advance(now + Duration::from_secs(3)));
        assert!(round.turn_popup().is_none());
        assert!(!round.is_locked());
    }

    #[test]
    fn matching_pair_scores_and_keeps_turn() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        assert_eq!(round.click("a1", now), ClickOutcome::Flipped);
        assert_eq!(round.click("a2", now), ClickOutcome::Matched);

        assert!(card_state(&round, "a1").is_matched);
        assert!(card_state(&round, "a2").is_matched);
        assert_eq!(round.players()[0].score, 1);
        assert_eq!(round.matches(), 1);
        assert!(round.is_locked());
        assert_eq!(
            round.click("b1", now),
            ClickOutcome::Ignored(IgnoreReason::Locked)
        );

        round.advance(now + Duration::from_millis(750));
        assert!(!round.is_locked());
        assert!(round.selected_ids().is_empty());
        assert_eq!(round.active_index(), 0);
    }

    #[test]
    fn mismatch_announces_next_player_then_flips_back() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        round.click("a1", now);
        assert_eq!(round.click("b1", now), ClickOutcome::Mismatched);
        assert!(round.is_locked());
        assert_eq!(round.turn_popup().map(|p| p.player_id.as_str()), Some("p2"));
        assert_eq!(
            round.next_deadline(),
            Some(now + Duration::from_millis(3000))
        );

        assert!(!round.advance(now + Duration::from_millis(2999)));
        assert!(card_state(&round, "a1").is_flipped);

        assert!(round.advance(now + Duration::from_millis(3000)));
        assert!(!card_state(&round, "a1").is_flipped);
        assert!(!card_state(&round, "b1").is_flipped);
        assert!(round.selected_ids().is_empty());
        assert_eq!(round.active_index(), 1);
        assert!(!round.is_locked());
        assert!(round.turn_popup().is_none());
    }

    #[test]
    fn turn_wraps_around_the_table() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        for (first, second) in [("a1", "b1"), ("b1", "c1")] {
            round.click(first, now);
            round.click(second, now);
            round.advance(now + Duration::from_secs(3));
        }
        assert_eq!(round.active_index(), 0);
    }

    #[test]
    fn mismatch_without_players_reveals_then_hides() {
        let now = Instant::now();
        let mut round = playing(Vec::new(), now);
        assert!(round.turn_popup().is_none());

        round.click("a1", now);
        assert_eq!(round.click("c2", now), ClickOutcome::Mismatched);
        assert!(round.turn_popup().is_none());
        assert_eq!(
            round.next_deadline(),
            Some(now + Duration::from_millis(3000))
        );

        round.advance(now + Duration::from_millis(3000));
        assert!(!card_state(&round, "a1").is_flipped);
        assert!(!card_state(&round, "c2").is_flipped);
        assert_eq!(round.active_index(), 0);
    }

    #[test]
    fn click_during_unlocked_announcement_forces_resolution() {
        let tuning = RoundTuning {
            lock_during_announcement: false,
            ..RoundTuning::default()
        };
        let now = Instant::now();
        let mut round = Round::new(tuning);
        round.start(small_deck(), vec![player("p1"), player("p2")], now);

        round.click("a1", now);
        round.click("b1", now);
        assert!(!round.is_locked());
        assert!(round.has_pending_mismatch());

        assert_eq!(round.click("c1", now), ClickOutcome::Flipped);
        assert!(!round.has_pending_mismatch());
        assert!(!card_state(&round, "a1").is_flipped);
        assert!(!card_state(&round, "b1").is_flipped);
        assert!(card_state(&round, "c1").is_flipped);
        assert_eq!(round.selected_ids(), ["c1".to_string()]);
        assert_eq!(round.active_index(), 1);
        assert!(round.turn_popup().is_none());

        // The cancelled announcement must not resolve anything later.
        assert!(!round.advance(now + Duration::from_secs(5)));
        assert!(card_state(&round, "c1").is_flipped);
        assert_eq!(round.active_index(), 1);
    }

    #[test]
    fn forced_resolution_on_matched_card_reports_the_change() {
        let tuning = RoundTuning {
            lock_during_announcement: false,
            ..RoundTuning::default()
        };
        let now = Instant::now();
        let mut round = Round::new(tuning);
        round.start(small_deck(), vec![player("p1"), player("p2")], now);

        round.click("a1", now);
        round.click("a2", now);
        let at = now + Duration::from_millis(750);
        round.advance(at);
        round.click("b1", at);
        assert_eq!(round.click("c1", at), ClickOutcome::Mismatched);

        let outcome = round.click("a1", at);
        assert_eq!(outcome, ClickOutcome::MismatchResolved);
        assert!(outcome.changes_state());
        assert!(!outcome.is_accepted());
        assert!(!round.has_pending_mismatch());
        assert!(!card_state(&round, "b1").is_flipped);
        assert!(!card_state(&round, "c1").is_flipped);
        assert_eq!(round.active_index(), 1);
        assert!(round.turn_popup().is_none());
        assert_eq!(round.next_deadline(), None);

        // A second click on the same card has nothing left to resolve.
        assert_eq!(
            round.click("a1", at),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
    }

    #[test]
    fn face_up_and_unknown_cards_are_ignored() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1")], now);

        round.click("a1", now);
        assert_eq!(
            round.click("a1", now),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(
            round.click("zz", now),
            ClickOutcome::Ignored(IgnoreReason::UnknownCard)
        );
        assert_eq!(round.selected_ids(), ["a1".to_string()]);

        round.click("a2", now);
        round.advance(now + Duration::from_secs(1));
        assert_eq!(
            round.click("a2", now),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
    }

    #[test]
    fn never_more_than_two_unresolved_cards() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        round.click("a1", now);
        round.click("b1", now);
        round.click("c1", now);

        let unresolved = round
            .cards()
            .iter()
            .filter(|card| card.is_flipped && !card.is_matched)
            .count();
        assert!(unresolved <= 2);
        assert!(round.selected_ids().len() <= 2);
    }

    #[test]
    fn completing_round_locks_board_for_good() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);
        let mut at = now;

        for (first, second) in [("a1", "a2"), ("b1", "b2"), ("c1", "c2")] {
            round.click(first, at);
            let outcome = round.click(second, at);
            at += Duration::from_secs(1);
            round.advance(at);
            if second == "c2" {
                assert_eq!(outcome, ClickOutcome::Completed);
            }
        }

        assert_eq!(round.status(), GameStatus::Complete);
        assert_eq!(round.matches(), round.pair_count());
        assert_eq!(round.progress(), 100);
        assert!(round.is_locked());
        assert!(round.turn_popup().is_none());
        assert!(round.next_deadline().is_none());
        assert_eq!(round.players()[0].score, 3);
        assert_eq!(
            round.click("a1", at),
            ClickOutcome::Ignored(IgnoreReason::NotPlaying)
        );
    }

    #[test]
    fn progress_rounds_to_whole_percent() {
        let now = Instant::now();
        let mut round = playing(Vec::new(), now);
        assert_eq!(round.progress(), 0);

        round.click("a1", now);
        round.click("a2", now);
        assert_eq!(round.progress(), 33);

        round.advance(now + Duration::from_secs(1));
        round.click("b1", now);
        round.click("b2", now);
        assert_eq!(round.progress(), 67);
    }

    #[test]
    fn scores_only_grow_for_the_active_player() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);

        round.click("a1", now);
        round.click("b1", now);
        round.advance(now + Duration::from_secs(3));
        assert_eq!(round.active_index(), 1);

        round.click("b1", now);
        round.click("b2", now);
        assert_eq!(round.players()[0].score, 0);
        assert_eq!(round.players()[1].score, 1);
        assert_eq!(round.ranking()[0].player.id, "p2");
    }

    #[test]
    fn restart_resets_round_but_keeps_seats() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1"), player("p2")], now);
        round.click("a1", now);
        round.click("a2", now);

        round.restart(small_deck(), now + Duration::from_secs(1));
        assert_eq!(round.status(), GameStatus::Playing);
        assert_eq!(round.matches(), 0);
        assert_eq!(round.active_index(), 0);
        assert!(round.selected_ids().is_empty());
        assert!(!round.is_locked());
        assert!(round.players().iter().all(|p| p.score == 0));
        assert_eq!(round.players().len(), 2);
        assert!(round.cards().iter().all(|c| !c.is_flipped && !c.is_matched));
    }

    #[test]
    fn reset_returns_to_idle() {
        let now = Instant::now();
        let mut round = playing(vec![player("p1")], now);
        round.reset();
        assert_eq!(round.status(), GameStatus::Idle);
        assert!(round.cards().is_empty());
        assert!(round.players().is_empty());
        assert!(round.next_deadline().is_none());
    }

    #[test]
    fn six_terms_four_pairs_first_match_scores_one() {
        let pool: Vec<Term> = (1..=6).map(|n| term(&format!("t{n}"))).collect();
        let mut rng = StdRng::seed_from_u64(2024);
        let deck = create_deck(&pool, 4, DuplicateLevel::Two, &mut rng);
        assert_eq!(deck.len(), 8);

        let first = deck[0].clone();
        let partner = deck
            .iter()
            .find(|card| card.match_id == first.match_id && card.id != first.id)
            .cloned()
            .expect("partner card");

        let now = Instant::now();
        let mut round = Round::new(RoundTuning::default());
        round.start(deck, vec![player("p1"), player("p2")], now);
        assert_eq!(round.pair_count(), 4);

        round.click(&first.id, now);
        assert_eq!(round.click(&partner.id, now), ClickOutcome::Matched);
        assert_eq!(round.players()[0].score, 1);
        assert_eq!(round.matches(), 1);
    }

    #[test]
    fn triple_copies_match_on_first_pair() {
        let now = Instant::now();
        let deck = vec![
            card("a1", "a"),
            card("a2", "a"),
            card("a3", "a"),
            card("b1", "b"),
            card("b2", "b"),
            card("b3", "b"),
        ];
        let mut round = Round::new(RoundTuning::default());
        round.start(deck, vec![player("p1")], now);

        round.click("a1", now);
        assert_eq!(round.click("a3", now), ClickOutcome::Matched);
        round.advance(now + Duration::from_secs(1));
        round.click("b2", now);
        assert_eq!(round.click("b3", now), ClickOutcome::Completed);
        assert!(!card_state(&round, "a2").is_matched);
    }

    #[test]
    fn second_pair_from_same_group_counts_toward_completion() {
        let now = Instant::now();
        let deck = vec![
            card("a1", "a"),
            card("a2", "a"),
            card("a3", "a"),
            card("a4", "a"),
            card("b1", "b"),
            card("b2", "b"),
            card("b3", "b"),
            card("b4", "b"),
        ];
        let mut round = Round::new(RoundTuning::default());
        round.start(deck, vec![player("p1")], now);
        assert_eq!(round.pair_count(), 2);

        round.click("a1", now);
        assert_eq!(round.click("a2", now), ClickOutcome::Matched);
        assert_eq!(round.matches(), 1);
        round.advance(now + Duration::from_secs(1));
        round.click("a3", now);
        assert_eq!(round.click("a4", now), ClickOutcome::Completed);
        assert_eq!(round.matches(), 2);
        assert_eq!(round.status(), GameStatus::Complete);
        assert!(!card_state(&round, "b1").is_matched);
    }
}

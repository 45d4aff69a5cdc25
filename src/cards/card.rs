//! Card tiles.
//!
//! A `Card` has a fixed identity (`CardId`), a symbol, a point value and a
//! kind. The only mutable state is whether it is face up.
//!
//! ## Matching
//!
//! `matches` is pair equality only: two distinct normal cards sharing
//! symbol and points. A card never matches itself, and bomb/jolly cards never
//! match anything. Special cards are recognised by their kind instead.

use serde::{Deserialize, Serialize};

/// Symbol shown by the bomb card.
pub const BOMB_SYMBOL: char = '¤';

/// Symbol shown by the jolly card.
pub const JOLLY_SYMBOL: char = '§';

/// Symbol shown for any face-down card.
pub const HIDDEN_SYMBOL: char = '!';

/// Number of distinct symbols available to normal pairs.
pub const SYMBOL_POOL_SIZE: usize = 185;

/// Printable symbols usable by normal pairs.
///
/// Excludes the hidden marker and both special symbols so a revealed normal
/// card can never be mistaken for one of them.
pub fn symbol_pool() -> impl Iterator<Item = char> {
    ('\u{22}'..='\u{7e}')
        .chain('\u{a1}'..='\u{ff}')
        .filter(|c| !matches!(*c, '\u{ad}' | BOMB_SYMBOL | JOLLY_SYMBOL | HIDDEN_SYMBOL))
}

/// Unique identity of a card within one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// What a card does when revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Half of a matching pair.
    Normal,
    /// Eliminates whoever reveals it.
    Bomb,
    /// Awards a bonus and an extra turn.
    Jolly,
}

/// A tile on the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: char,
    points: u32,
    kind: CardKind,
    face_up: bool,
}

impl Card {
    /// Create a normal card. Point values below 1 are raised to 1.
    #[must_use]
    pub fn normal(id: CardId, symbol: char, points: u32) -> Self {
        Self {
            id,
            symbol,
            points: points.max(1),
            kind: CardKind::Normal,
            face_up: false,
        }
    }

    /// Create the bomb card. It carries no points.
    #[must_use]
    pub fn bomb(id: CardId) -> Self {
        Self {
            id,
            symbol: BOMB_SYMBOL,
            points: 0,
            kind: CardKind::Bomb,
            face_up: false,
        }
    }

    /// Create the jolly card worth `points`.
    #[must_use]
    pub fn jolly(id: CardId, points: u32) -> Self {
        Self {
            id,
            symbol: JOLLY_SYMBOL,
            points,
            kind: CardKind::Jolly,
            face_up: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_bomb(&self) -> bool {
        self.kind == CardKind::Bomb
    }

    #[must_use]
    pub fn is_jolly(&self) -> bool {
        self.kind == CardKind::Jolly
    }

    /// Bomb or jolly.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.kind != CardKind::Normal
    }

    /// Toggle the face-up flag.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Set the face-up flag.
    pub fn flip_to(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    /// The symbol a viewer sees: the card's own when face up, otherwise `!`.
    #[must_use]
    pub fn visible_symbol(&self) -> char {
        if self.face_up {
            self.symbol
        } else {
            HIDDEN_SYMBOL
        }
    }

    /// Pair equality: both normal, same symbol and points, different cards.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.kind == CardKind::Normal
            && other.kind == CardKind::Normal
            && self.symbol == other.symbol
            && self.points == other.points
            && self.id != other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_symbol_pool_size_and_uniqueness() {
        let pool: Vec<char> = symbol_pool().collect();
        assert_eq!(pool.len(), SYMBOL_POOL_SIZE);

        let unique: FxHashSet<char> = pool.iter().copied().collect();
        assert_eq!(unique.len(), pool.len());
        assert!(!unique.contains(&BOMB_SYMBOL));
        assert!(!unique.contains(&JOLLY_SYMBOL));
        assert!(!unique.contains(&HIDDEN_SYMBOL));
        assert!(pool.iter().all(|c| !c.is_control() && !c.is_whitespace()));
    }

    #[test]
    fn test_normal_points_clamped() {
        let card = Card::normal(CardId::new(0), 'A', 0);
        assert_eq!(card.points(), 1);
        assert_eq!(card.kind(), CardKind::Normal);
    }

    #[test]
    fn test_special_constructors() {
        let bomb = Card::bomb(CardId::new(1));
        assert!(bomb.is_bomb());
        assert!(bomb.is_special());
        assert_eq!(bomb.points(), 0);
        assert_eq!(bomb.symbol(), BOMB_SYMBOL);

        let jolly = Card::jolly(CardId::new(2), 20);
        assert!(jolly.is_jolly());
        assert!(jolly.is_special());
        assert_eq!(jolly.points(), 20);
    }

    #[test]
    fn test_flip() {
        let mut card = Card::normal(CardId::new(0), 'A', 3);
        assert!(!card.is_face_up());
        assert_eq!(card.visible_symbol(), HIDDEN_SYMBOL);

        card.flip();
        assert!(card.is_face_up());
        assert_eq!(card.visible_symbol(), 'A');

        card.flip();
        assert!(!card.is_face_up());

        card.flip_to(true);
        card.flip_to(true);
        assert!(card.is_face_up());
    }

    #[test]
    fn test_pair_matches() {
        let a = Card::normal(CardId::new(0), 'A', 3);
        let b = Card::normal(CardId::new(1), 'A', 3);
        let c = Card::normal(CardId::new(2), 'B', 3);

        assert!(a.matches(&b));
        assert!(b.matches(&a));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_card_never_matches_itself() {
        let a = Card::normal(CardId::new(0), 'A', 3);
        assert!(!a.matches(&a));
        assert!(!a.matches(&a.clone()));
    }

    #[test]
    fn test_face_state_does_not_affect_matching() {
        let mut a = Card::normal(CardId::new(0), 'A', 3);
        let b = Card::normal(CardId::new(1), 'A', 3);
        a.flip_to(true);
        assert!(a.matches(&b));
    }

    #[test]
    fn test_specials_never_match() {
        let bomb = Card::bomb(CardId::new(0));
        let other_bomb = Card::bomb(CardId::new(1));
        let jolly = Card::jolly(CardId::new(2), 20);
        let normal = Card::normal(CardId::new(3), BOMB_SYMBOL, 1);

        assert!(!bomb.matches(&other_bomb));
        assert!(!jolly.matches(&jolly));
        assert!(!bomb.matches(&normal));
        assert!(!normal.matches(&bomb));
    }
}

//! The card grid.
//!
//! Cards are stored as owned values in a flat, row-major
//! `im::Vector<Option<Card>>`. An empty slot means the card that lived there
//! has been resolved. Cloning a grid is O(1), which keeps snapshots cheap.
//!
//! Direct access (`card`, `card_mut`, `set_card`, `take_card`) expects an
//! in-bounds coordinate and panics otherwise. Use `contains` to check first.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Coord;
use crate::cards::{symbol_pool, Card, CardId, SYMBOL_POOL_SIZE};
use crate::core::config::{GridConfig, ScoringConfig, MIN_CELLS};
use crate::core::GameRng;
use crate::error::SetupError;

/// Validated grid dimensions.
///
/// `rows * cols` is even, at least [`MIN_CELLS`] and within the configured
/// maximum, so a fill always yields whole pairs plus the two special cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: usize,
    cols: usize,
}

impl GridSize {
    /// Validate dimensions against the grid limits.
    pub fn new(rows: usize, cols: usize, limits: &GridConfig) -> Result<Self, SetupError> {
        let reject = |reason| Err(SetupError::GridSize { rows, cols, reason });

        if rows == 0 || cols == 0 {
            return reject("dimensions must be positive");
        }
        let cells = match rows.checked_mul(cols) {
            Some(cells) => cells,
            None => return reject("too many cells"),
        };
        if cells < MIN_CELLS {
            return reject("at least 4 cells are needed");
        }
        if cells % 2 != 0 {
            return reject("cell count must be even");
        }
        if cells > limits.max_cells {
            return reject("too many cells");
        }
        if (cells - 2) / 2 > SYMBOL_POOL_SIZE {
            return reject("not enough symbols for that many pairs");
        }

        Ok(Self { rows, cols })
    }

    #[must_use]
    pub fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn cells(self) -> usize {
        self.rows * self.cols
    }

    /// Number of normal pairs a fill places.
    #[must_use]
    pub fn pair_count(self) -> usize {
        (self.cells() - 2) / 2
    }
}

/// Fixed-size board of optional card slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: GridSize,
    cells: Vector<Option<Card>>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: std::iter::repeat(None).take(size.cells()).collect(),
        }
    }

    /// Create a grid and fill it with random cards.
    #[must_use]
    pub fn filled(size: GridSize, scoring: &ScoringConfig, rng: &mut GameRng) -> Self {
        let mut grid = Self::new(size);
        grid.fill(scoring, rng);
        grid
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.size.cols
    }

    /// Whether `coord` lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_bounds(self.rows(), self.cols())
    }

    fn index(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate {coord} outside {}x{} grid",
            self.rows(),
            self.cols()
        );
        (coord.row - 1) * self.cols() + (coord.col - 1)
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols() + 1, index % self.cols() + 1)
    }

    /// The card at `coord`, if the cell is occupied.
    #[must_use]
    pub fn card(&self, coord: Coord) -> Option<&Card> {
        self.cells[self.index(coord)].as_ref()
    }

    pub fn card_mut(&mut self, coord: Coord) -> Option<&mut Card> {
        let index = self.index(coord);
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Place `card` at `coord`, returning whatever was there.
    pub fn set_card(&mut self, coord: Coord, card: Card) -> Option<Card> {
        let index = self.index(coord);
        self.cells.set(index, Some(card))
    }

    /// Empty the cell at `coord`, returning its card.
    pub fn take_card(&mut self, coord: Coord) -> Option<Card> {
        let index = self.index(coord);
        self.cells.set(index, None)
    }

    /// True iff no cell holds a card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Option<&Card>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.coord_of(i), cell.as_ref()))
    }

    /// Occupied cells in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = (Coord, &Card)> + '_ {
        self.iter().filter_map(|(coord, card)| card.map(|c| (coord, c)))
    }

    /// Where the card with `id` currently sits.
    #[must_use]
    pub fn find(&self, id: CardId) -> Option<Coord> {
        self.cards().find(|(_, c)| c.id() == id).map(|(coord, _)| coord)
    }

    /// Remove `key` and every card that matches it.
    ///
    /// For a normal card this clears both halves of its pair. For the bomb or
    /// the jolly it clears just that card. Returns the cleared cells; empty if
    /// nothing was left to remove.
    pub fn pop_card(&mut self, key: &Card) -> SmallVec<[Coord; 2]> {
        let mut cleared = SmallVec::new();
        for index in 0..self.cells.len() {
            let hit = matches!(
                &self.cells[index],
                Some(card) if card.id() == key.id() || card.matches(key)
            );
            if hit {
                self.cells.set(index, None);
                cleared.push(self.coord_of(index));
            }
        }
        cleared
    }

    /// Turn every remaining card face down.
    pub fn flip_all_cards(&mut self) {
        for card in self.cells.iter_mut().flatten() {
            card.flip_to(false);
        }
    }

    /// Populate an empty grid.
    ///
    /// Places `pair_count` normal pairs, each with a unique symbol and a
    /// shared random value in `[min_pair_points, max_pair_points]`, then the
    /// jolly and the bomb. Every card goes to a uniformly random free cell.
    pub fn fill(&mut self, scoring: &ScoringConfig, rng: &mut GameRng) {
        assert!(self.is_empty(), "grid already filled");

        let pool: Vec<char> = symbol_pool().collect();
        let mut used = FxHashSet::default();
        let mut next_id = 0u32;
        let mut alloc_id = || {
            let id = CardId::new(next_id);
            next_id += 1;
            id
        };

        for _ in 0..self.size.pair_count() {
            let symbol = loop {
                let candidate = pool[rng.gen_range_usize(0..pool.len())];
                if used.insert(candidate) {
                    break candidate;
                }
            };
            let points =
                rng.gen_range_inclusive(scoring.min_pair_points..=scoring.max_pair_points);

            self.push_in_random_free_cell(Card::normal(alloc_id(), symbol, points), rng);
            self.push_in_random_free_cell(Card::normal(alloc_id(), symbol, points), rng);
        }

        self.push_in_random_free_cell(Card::jolly(alloc_id(), scoring.jolly_points), rng);
        self.push_in_random_free_cell(Card::bomb(alloc_id()), rng);
    }

    /// Put `card` in a random empty cell, sampling cells until one is free.
    fn push_in_random_free_cell(&mut self, card: Card, rng: &mut GameRng) -> Coord {
        assert!(self.occupied() < self.cells.len(), "no free cell left");
        loop {
            let coord = Coord::new(
                rng.gen_range_usize(0..self.rows()) + 1,
                rng.gen_range_usize(0..self.cols()) + 1,
            );
            if self.card(coord).is_none() {
                self.set_card(coord, card);
                return coord;
            }
        }
    }
}

//! Cards: identity, kind and face state.

mod card;

pub use card::{
    symbol_pool, Card, CardId, CardKind, BOMB_SYMBOL, HIDDEN_SYMBOL, JOLLY_SYMBOL,
    SYMBOL_POOL_SIZE,
};

//! Implementation of chess rules: board representation, move generation, move
//! application and game termination.

pub mod bitboard;
pub mod board;
pub mod core;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod position;

pub use error::Error;

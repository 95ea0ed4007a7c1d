//! Chess rules engine for two players sharing one screen. It keeps the board
//! state, enumerates legal moves, applies them with all the special rules
//! (castling, en passant, promotion) and detects check, checkmate and
//! stalemate.
//!
//! Rendering, input handling and clocks are up to the embedding application:
//! the engine is driven through [`Position::legal_moves`] and
//! [`Position::apply_move`] (or the [`Game`] wrapper).
//!
//! ```
//! use hotseat::chess::core::Square;
//!
//! let mut position = hotseat::new_game();
//! let e2 = Square::try_from("e2").unwrap();
//! let e4 = Square::try_from("e4").unwrap();
//! assert!(position.legal_moves(e2).contains(e4));
//! let outcome = position.apply_move(e2, e4).unwrap();
//! assert!(!outcome.status.is_over());
//! ```

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]

pub mod chess;

pub use chess::game::{Game, GameConfig};
pub use chess::position::{GameStatus, MoveOutcome, Position};
pub use chess::Error;

/// Creates a game in the standard initial layout with White to move.
#[must_use]
pub fn new_game() -> Position {
    Position::starting()
}

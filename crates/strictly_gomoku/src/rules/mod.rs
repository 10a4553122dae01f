//! Game rules for five-in-a-row.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the in-progress game and its contracts can compose them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Axis, WIN_LENGTH, check_win, run_length};

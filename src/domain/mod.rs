pub mod board;
pub mod depths;
pub mod glyph;
pub mod physics;
pub mod rules;

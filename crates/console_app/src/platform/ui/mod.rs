pub mod keymap;
pub mod layout;
pub mod render;
mod theme;

//! Typed declarations for the widgets shipped with the library. Rendering is
//! left to the UI layer; these only describe and validate widget props.

pub mod menu;

pub use menu::MenuProps;

//! Keypad scanners

pub mod matrix;

pub use matrix::MatrixKeypad;

#![forbid(unsafe_code)]

//! Command-line driver for the font browser: loads a catalogue, replays a
//! scripted session against the windowed list and prints each frame.

pub mod app;
pub mod cli;
pub mod render;
pub mod sample;

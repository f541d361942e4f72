// Rusted Input - frame-synchronous input state engine for emulation hosts

pub mod core;
pub mod engine;

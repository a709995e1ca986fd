// src/constants.rs

/// Longest control-channel command line the server will parse, newline
/// included. Longer lines are answered with 500.
pub const LINE_MAX: usize = 2048;

/// Chunk size for data-channel copies in both directions.
pub const DATA_CHUNK: usize = 2048;

/// Backlog for the passive-mode data listener.
pub const PASSIVE_BACKLOG: u32 = 100;

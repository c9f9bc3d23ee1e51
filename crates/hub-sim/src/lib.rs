pub mod ticker;

pub use ticker::{generate_tick, spawn, TickerConfig, TickerHandle};

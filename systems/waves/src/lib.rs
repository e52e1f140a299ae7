#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduling: timed spawn schedules and their sequential execution.

mod manager;
mod schedule;

pub use manager::WaveManager;
pub use schedule::{parse_wave, SpawnEntry, Wave};

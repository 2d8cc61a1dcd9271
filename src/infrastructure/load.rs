//! Fake CPU and memory load generators
//!
//! Every task is fire-and-forget: nothing coordinates or cancels them once started.

use std::hint::black_box;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::observability::record_fake_load;

const CHUNK_BYTES: usize = 1024 * 1024;
const MEMORY_HOLD: Duration = Duration::from_secs(5);

/// Start `threads` blocking tasks that spin until `period` elapses
pub fn start_cpu_load(threads: u32, period: Duration) -> Vec<JoinHandle<()>> {
    info!(threads, period_secs = period.as_secs(), "Starting fake cpu load");
    record_fake_load("cpu", u64::from(threads));

    (0..threads)
        .map(|index| {
            tokio::task::spawn_blocking(move || {
                let deadline = Instant::now() + period;
                let mut counter: u64 = 0;

                while Instant::now() < deadline {
                    counter = black_box(counter.wrapping_add(1));
                }

                debug!(index, iterations = counter, "Fake cpu load finished");
            })
        })
        .collect()
}

/// Allocate `memory_mb` chunks of 1 MiB spread over `period`, hold them, then free them
///
/// The handle resolves to the number of chunks that were held.
pub fn start_memory_load(memory_mb: usize, period: Duration) -> JoinHandle<usize> {
    info!(memory_mb, period_secs = period.as_secs(), "Starting fake memory load");
    record_fake_load("memory", 1);

    tokio::spawn(async move {
        if memory_mb == 0 {
            return 0;
        }

        let pause = period / u32::try_from(memory_mb).unwrap_or(u32::MAX);
        let mut chunks: Vec<Vec<u8>> = Vec::new();

        for _ in 0..memory_mb {
            chunks.push(vec![1u8; CHUNK_BYTES]);
            tokio::time::sleep(pause).await;
        }

        let held = chunks.len();
        debug!(held_mb = held, "Fake memory load allocated, holding");
        tokio::time::sleep(MEMORY_HOLD).await;

        drop(chunks);
        debug!(held_mb = held, "Fake memory load released");
        held
    })
}

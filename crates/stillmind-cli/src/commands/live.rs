//! Shared live countdown loop for the interactive commands.
//!
//! The loop owns the single tick source for its engine: one one-second
//! interval, armed once. Exiting the loop drops the interval, so no tick
//! can fire after the run ends.

use std::time::Duration;

use stillmind_core::{CountdownEngine, Event, TimerState};

pub struct LiveOutcome {
    /// Seconds the countdown actually ran.
    pub ticks: u64,
    /// Whether the run finished on its own (completion or cycle limit)
    /// rather than via Ctrl-C.
    pub completed: bool,
}

/// Drive the engine once per second until it completes, the cycle limit is
/// reached, or the user hits Ctrl-C.
pub fn run_live(
    engine: &mut CountdownEngine,
    cycle_limit: Option<u32>,
    render: impl Fn(&CountdownEngine),
) -> Result<LiveOutcome, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        engine.start();
        render(engine);

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await; // The first tick fires immediately.

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut ticks = 0u64;
        let mut cycles = 0u32;
        let completed = loop {
            tokio::select! {
                _ = interval.tick() => {
                    let event = engine.tick();
                    ticks += 1;
                    render(engine);
                    if let Some(Event::PhaseAdvanced { phase_index: 0, .. }) = event {
                        cycles += 1;
                        if cycle_limit.is_some_and(|limit| cycles >= limit) {
                            break true;
                        }
                    }
                    if engine.state() == TimerState::Completed {
                        break true;
                    }
                }
                _ = &mut ctrl_c => break false,
            }
        };
        engine.stop();
        println!();
        LiveOutcome { ticks, completed }
    });
    Ok(outcome)
}

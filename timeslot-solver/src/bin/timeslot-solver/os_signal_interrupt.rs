use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use timeslot_solver::engine::Interrupt;

/// Creates an [`Interrupt`] which is triggered by SIGINT or SIGTERM.
pub(crate) fn install() -> std::io::Result<Interrupt> {
    // The signals to listen to for cancellation.
    const INTERRUPT_SIGNALS: &[std::ffi::c_int] =
        &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

    let signal_received = Arc::new(AtomicBool::new(false));

    for &signal in INTERRUPT_SIGNALS {
        let _ = signal_hook::flag::register(signal, Arc::clone(&signal_received))?;
    }

    Ok(Interrupt::from_flag(signal_received))
}

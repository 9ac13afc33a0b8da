//! Marks an interrupt path and a DSP kernel for RAM placement
//!
//! `cargo xtask placement` builds this with and without `code-in-ram` and
//! checks where `on_tick`, `fir` and `helper` ended up.

#![no_main]
#![no_std]
#![deny(warnings)]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, Peripherals};
use cortex_m_rt::{entry, exception};
use cortex_m_semihosting::{debug, hprintln};
#[cfg(not(feature = "unmarked"))]
use fastfunc::fast_func;
use panic_semihosting as _;

static TICKS: AtomicU32 = AtomicU32::new(0);

// Low-pass, Q15
const TAPS: [i32; 8] = [1_213, 3_135, 5_461, 6_575, 6_575, 5_461, 3_135, 1_213];

#[entry]
fn main() -> ! {
    let p = Peripherals::take().unwrap();
    let mut syst = p.SYST;

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(12_000);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    hprintln!("placement: {}", fastfunc::PLACEMENT);

    let mut history = [0; TAPS.len()];
    let mut out = 0;
    for n in 0..64 {
        history.rotate_right(1);
        history[0] = helper(n);
        out = fir(&history);
    }
    hprintln!("fir: {}", out >> 15);

    while TICKS.load(Ordering::Relaxed) < 3 {
        cortex_m::asm::wfi();
    }
    hprintln!("ticks: >= 3");

    debug::exit(debug::EXIT_SUCCESS);

    loop {}
}

#[exception]
fn SysTick() {
    on_tick();
}

// Runs on every SysTick
#[cfg_attr(not(feature = "unmarked"), fast_func)]
#[inline(never)]
#[no_mangle]
fn on_tick() -> u32 {
    TICKS.fetch_add(1, Ordering::Relaxed) + 1
}

#[cfg_attr(not(feature = "unmarked"), fast_func)]
#[inline(never)]
#[no_mangle]
fn fir(history: &[i32; TAPS.len()]) -> i64 {
    history
        .iter()
        .zip(TAPS.iter())
        .map(|(&x, &tap)| i64::from(x) * i64::from(tap))
        .sum()
}

/// Sample source, stays in flash
#[inline(never)]
#[no_mangle]
fn helper(n: i32) -> i32 {
    (n * 7_919) % 1_024 - 512
}

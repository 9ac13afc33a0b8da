//! Place latency-critical functions in RAM, gated by a single cargo feature.
//!
//! On many microcontrollers instruction fetch from flash pays wait-states that
//! RAM doesn't. Interrupt handlers, tight polling loops and DSP kernels marked
//! with [`#[fast_func]`](fast_func) are emitted into the [`SECTION`] linker
//! section when the `code-in-ram` feature is enabled, and left exactly where
//! the compiler would put them otherwise.
//!
//! ```
//! #[fastfunc::fast_func]
//! fn tick(counter: &mut u32) {
//!     *counter = counter.wrapping_add(1);
//! }
//! # fn main() {}
//! ```
//!
//! # Configuration
//!
//! The `code-in-ram` feature is the only switch. It is read in one place, the
//! `fastfunc-macros` crate, and [`PLACEMENT`] is derived from that same read,
//! so every crate of a build agrees on it.
//!
//! # Requirements on the runtime
//!
//! This crate only asks for the placement. The linker script must put
//! [`SECTION`] in RAM and the startup code must copy its load image out of
//! flash before the first marked function is called. `cortex-m-rt` and
//! `riscv-rt` do both for `.data`. If the marked functions don't fit, the
//! link fails with a region overflow; the fix is to unmark some of them.
//!
//! Hosted targets (`x86_64-unknown-linux-gnu`, ...) map `.data` without
//! execute permission: with `code-in-ram` enabled there, marked functions
//! build and link but must not be called.
//!
//! # Rules
//!
//! `#[fast_func]` takes no arguments and applies to functions with a body. It
//! rejects the following with the feature on *and* off, so enabling
//! `code-in-ram` never breaks a crate that builds without it:
//!
//! - `async fn`, whose state machine would stay in flash
//! - `#[inline]` and `#[inline(always)]`
//! - a `link_section` other than [`SECTION`]
//!
//! Stacking the marker, or combining it with `#[inline(never)]` and a
//! `.data` `link_section`, is the same as a single marker.
//!
//! ```compile_fail
//! #[fastfunc::fast_func]
//! async fn tick() {}
//! # fn main() {}
//! ```
//!
//! ```compile_fail
//! #[fastfunc::fast_func]
//! #[inline(always)]
//! fn tick() {}
//! # fn main() {}
//! ```
//!
//! ```compile_fail
//! #[fastfunc::fast_func]
//! #[link_section = ".itcm"]
//! fn tick() {}
//! # fn main() {}
//! ```
//!
//! ```compile_fail
//! #[fastfunc::fast_func(always)]
//! fn tick() {}
//! # fn main() {}
//! ```
//!
//! ```
//! #[fastfunc::fast_func]
//! #[fastfunc::fast_func]
//! #[inline(never)]
//! fn tick() {}
//! # fn main() {}
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_compatibility)]
#![deny(rust_2018_idioms)]
#![no_std]

use core::fmt;

/// Place the annotated function in [`SECTION`] when `code-in-ram` is enabled
///
/// With the feature disabled the function is emitted unchanged. With it
/// enabled the function additionally gets `#[inline(never)]` and
/// `#[unsafe(link_section = ".data")]`. Signature, ABI, visibility and
/// behavior never change.
pub use fastfunc_macros::fast_func;

/// Linker section receiving the code of `#[fast_func]` functions
pub const SECTION: &str = fastfunc_macros::__section!();

/// Placement selected for this build
pub const PLACEMENT: Placement = if fastfunc_macros::__enabled!() {
    Placement::Fast
} else {
    Placement::Default
};

/// Whether `#[fast_func]` functions are placed in [`SECTION`] in this build
pub const fn is_enabled() -> bool {
    PLACEMENT.is_fast()
}

/// Where the code of `#[fast_func]` functions ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The fast execution region, [`SECTION`]
    Fast,
    /// Wherever the compiler puts functions by default, usually flash
    Default,
}

impl Placement {
    /// The linker section requested by this placement, if any
    pub const fn section(self) -> Option<&'static str> {
        match self {
            Placement::Fast => Some(SECTION),
            Placement::Default => None,
        }
    }

    /// `true` for [`Placement::Fast`]
    pub const fn is_fast(self) -> bool {
        matches!(self, Placement::Fast)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section() {
            Some(section) => write!(f, "fast ({section})"),
            None => f.write_str("default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_follows_feature() {
        assert_eq!(is_enabled(), cfg!(feature = "code-in-ram"));
        assert_eq!(PLACEMENT.is_fast(), cfg!(feature = "code-in-ram"));
    }

    #[test]
    fn section() {
        assert_eq!(SECTION, ".data");
        assert_eq!(Placement::Fast.section(), Some(".data"));
        assert_eq!(Placement::Default.section(), None);
    }
}

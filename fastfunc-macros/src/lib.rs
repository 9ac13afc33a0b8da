//! Procedural macros of the `fastfunc` crate
//!
//! Don't depend on this crate directly, use the re-exports of `fastfunc`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

mod check;
mod codegen;
mod syntax;
#[cfg(test)]
mod tests;

/// Linker section receiving the code of marked functions
///
/// `cortex-m-rt` (and most other runtimes) collect `.data` into RAM and copy
/// its load image out of flash before `main` runs.
pub(crate) const SECTION: &str = ".data";

/// Where the code of a marked function ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The fast execution region, `SECTION`
    Fast,
    /// Wherever the compiler puts the function when left alone
    Default,
}

impl Placement {
    /// The placement selected for this build
    ///
    /// This is the only place the `code-in-ram` feature is read.
    pub(crate) const fn configured() -> Self {
        if cfg!(feature = "code-in-ram") {
            Placement::Fast
        } else {
            Placement::Default
        }
    }
}

/// Attribute placing a function in RAM when the `code-in-ram` feature is
/// enabled
///
/// For user documentation see the `fastfunc` crate.
#[proc_macro_attribute]
pub fn fast_func(args: TokenStream, input: TokenStream) -> TokenStream {
    expand(args.into(), input.into(), Placement::configured()).into()
}

fn expand(args: TokenStream2, input: TokenStream2, placement: Placement) -> TokenStream2 {
    let fast_fn = match syntax::fast_fn(args, input.clone()) {
        Err(e) => return e.to_compile_error(),
        Ok(x) => x,
    };

    if let Err(e) = check::fast_fn(&fast_fn) {
        return e.to_compile_error();
    }

    match placement {
        // Leave the tokens exactly as written
        Placement::Default => input,
        Placement::Fast => codegen::fast_fn(fast_fn),
    }
}

#[doc(hidden)]
#[proc_macro]
pub fn __enabled(input: TokenStream) -> TokenStream {
    if let Err(e) = syntax::no_input(input.into()) {
        return e.to_compile_error().into();
    }

    let enabled = Placement::configured() == Placement::Fast;
    quote!(#enabled).into()
}

#[doc(hidden)]
#[proc_macro]
pub fn __section(input: TokenStream) -> TokenStream {
    if let Err(e) = syntax::no_input(input.into()) {
        return e.to_compile_error().into();
    }

    quote!(#SECTION).into()
}

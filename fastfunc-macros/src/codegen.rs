use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse_quote;

use crate::{
    syntax::{FastFn, Inline},
    SECTION,
};

/// Re-emit the function with its code placed in `SECTION`
pub fn fast_fn(fast_fn: FastFn) -> TokenStream2 {
    let FastFn {
        mut item,
        inline,
        link_sections,
    } = fast_fn;

    // An inlined copy runs from the caller's section
    if !inline.iter().any(|(kind, _)| *kind == Inline::Never) {
        item.attrs.push(parse_quote!(#[inline(never)]));
    }

    if link_sections.is_empty() {
        item.attrs
            .push(parse_quote!(#[unsafe(link_section = #SECTION)]));
    }

    quote!(#item)
}

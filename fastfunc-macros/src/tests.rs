use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_quote, ItemFn};

use crate::{expand, Placement};

fn fast(input: TokenStream2) -> ItemFn {
    syn::parse2(expand(quote!(), input, Placement::Fast)).unwrap()
}

fn error(args: TokenStream2, input: TokenStream2, placement: Placement) -> String {
    let output = expand(args, input, placement).to_string();
    assert!(output.contains("compile_error"), "not an error: {output}");
    output
}

#[test]
fn configured_follows_feature() {
    let expected = if cfg!(feature = "code-in-ram") {
        Placement::Fast
    } else {
        Placement::Default
    };

    assert_eq!(Placement::configured(), expected);
}

#[test]
fn default_is_a_no_op() {
    let input = quote!(
        /// Called from SysTick
        #[no_mangle]
        pub extern "C" fn tick(counter: &mut u32) -> u32 {
            *counter += 1;
            *counter
        }
    );

    let output = expand(quote!(), input.clone(), Placement::Default);

    assert_eq!(output.to_string(), input.to_string());
}

#[test]
fn default_leaves_stacked_markers_alone() {
    let input = quote!(
        #[fastfunc::fast_func]
        fn tick() {}
    );

    let output = expand(quote!(), input.clone(), Placement::Default);

    assert_eq!(output.to_string(), input.to_string());
}

#[test]
fn fast_places_code_in_data() {
    let item = fast(quote!(
        pub fn tick(x: u32) -> u32 {
            x.wrapping_add(1)
        }
    ));

    let expected: ItemFn = parse_quote!(
        #[inline(never)]
        #[unsafe(link_section = ".data")]
        pub fn tick(x: u32) -> u32 {
            x.wrapping_add(1)
        }
    );

    assert_eq!(item, expected);
}

#[test]
fn fast_keeps_the_signature() {
    let item = fast(quote!(
        /// FIR kernel
        #[no_mangle]
        pub(crate) unsafe extern "C" fn fir<const N: usize>(taps: &[i32; N], x: *const i32) -> i64
        where
            [i32; N]: Sized,
        {
            let _ = (taps, x);
            0
        }
    ));

    let expected: ItemFn = parse_quote!(
        /// FIR kernel
        #[no_mangle]
        #[inline(never)]
        #[unsafe(link_section = ".data")]
        pub(crate) unsafe extern "C" fn fir<const N: usize>(taps: &[i32; N], x: *const i32) -> i64
        where
            [i32; N]: Sized,
        {
            let _ = (taps, x);
            0
        }
    );

    assert_eq!(item, expected);
}

#[test]
fn fast_accepts_methods() {
    let item = fast(quote!(
        pub fn poll(&mut self) -> bool {
            self.ready
        }
    ));

    assert_eq!(item.attrs.len(), 2);
    assert_eq!(item.sig.ident, "poll");
}

#[test]
fn stacked_markers_collapse() {
    let once = fast(quote!(
        fn tick() {}
    ));

    let twice = fast(quote!(
        #[fast_func]
        #[fastfunc::fast_func]
        fn tick() {}
    ));

    assert_eq!(once, twice);
}

#[test]
fn explicit_placement_is_not_repeated() {
    let item = fast(quote!(
        #[inline(never)]
        #[link_section = ".data"]
        fn tick() {}
    ));

    let expected: ItemFn = parse_quote!(
        #[inline(never)]
        #[link_section = ".data"]
        fn tick() {}
    );

    assert_eq!(item, expected);

    let item = fast(quote!(
        #[unsafe(link_section = ".data")]
        fn tick() {}
    ));

    let expected: ItemFn = parse_quote!(
        #[unsafe(link_section = ".data")]
        #[inline(never)]
        fn tick() {}
    );

    assert_eq!(item, expected);
}

#[test]
fn inner_attributes_stay_in_the_body() {
    let item = fast(quote!(
        fn tick() {
            #![allow(unused_variables)]
            let x = 1;
        }
    ));

    let expected: ItemFn = parse_quote!(
        #[inline(never)]
        #[unsafe(link_section = ".data")]
        fn tick() {
            #![allow(unused_variables)]
            let x = 1;
        }
    );

    assert_eq!(item, expected);
}

#[test]
fn arguments_are_rejected() {
    for placement in [Placement::Fast, Placement::Default] {
        let output = error(quote!(section = ".ram"), quote!(fn tick() {}), placement);
        assert!(output.contains("`#[fast_func]` takes no arguments"));
    }

    let output = error(
        quote!(),
        quote!(
            #[fast_func(always)]
            fn tick() {}
        ),
        Placement::Fast,
    );
    assert!(output.contains("`#[fast_func]` takes no arguments"));
}

#[test]
fn only_functions_with_a_body() {
    for input in [
        quote!(
            struct Tick;
        ),
        quote!(
            static TICKS: u32 = 0;
        ),
        quote!(
            fn tick();
        ),
    ] {
        let output = error(quote!(), input, Placement::Fast);
        assert!(output.contains("expected"), "{output}");
    }
}

#[test]
fn async_is_rejected_in_both_configurations() {
    for placement in [Placement::Fast, Placement::Default] {
        let output = error(quote!(), quote!(async fn tick() {}), placement);
        assert!(output.contains("cannot be used on `async` functions"));
    }
}

#[test]
fn inlining_is_rejected() {
    for input in [
        quote!(
            #[inline]
            fn tick() {}
        ),
        quote!(
            #[inline(always)]
            fn tick() {}
        ),
    ] {
        for placement in [Placement::Fast, Placement::Default] {
            let output = error(quote!(), input.clone(), placement);
            assert!(output.contains("must not be inlined"));
        }
    }
}

#[test]
fn conflicting_section_is_rejected() {
    for input in [
        quote!(
            #[link_section = ".itcm"]
            fn tick() {}
        ),
        quote!(
            #[unsafe(link_section = ".text.tick")]
            fn tick() {}
        ),
    ] {
        for placement in [Placement::Fast, Placement::Default] {
            let output = error(quote!(), input.clone(), placement);
            assert!(output.contains("conflicting `link_section`"));
        }
    }
}

#[test]
fn every_inline_and_section_is_checked() {
    for input in [
        quote!(
            #[inline(never)]
            #[inline(always)]
            fn tick() {}
        ),
        quote!(
            #[inline(never)]
            #[inline]
            fn tick() {}
        ),
    ] {
        for placement in [Placement::Fast, Placement::Default] {
            let output = error(quote!(), input.clone(), placement);
            assert!(output.contains("must not be inlined"));
        }
    }

    for input in [
        quote!(
            #[link_section = ".itcm"]
            #[link_section = ".data"]
            fn tick() {}
        ),
        quote!(
            #[unsafe(link_section = ".data")]
            #[unsafe(link_section = ".itcm")]
            fn tick() {}
        ),
    ] {
        for placement in [Placement::Fast, Placement::Default] {
            let output = error(quote!(), input.clone(), placement);
            assert!(output.contains("conflicting `link_section`"));
        }
    }
}

#[test]
fn markers_of_other_crates_are_kept() {
    let item = fast(quote!(
        #[other::fast_func]
        #[fastfunc_macros::fast_func]
        fn tick() {}
    ));

    let expected: ItemFn = parse_quote!(
        #[other::fast_func]
        #[inline(never)]
        #[unsafe(link_section = ".data")]
        fn tick() {}
    );

    assert_eq!(item, expected);

    // Arguments belong to the other crate
    let item = fast(quote!(
        #[other::fast_func(always)]
        fn tick() {}
    ));

    assert_eq!(item.attrs.len(), 3);
}

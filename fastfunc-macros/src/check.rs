use syn::parse;

use crate::{
    syntax::{FastFn, Inline},
    SECTION,
};

/// Reject functions whose placement can't be honored
///
/// Runs with the feature on and off alike: enabling `code-in-ram` must never break a crate
/// that builds without it.
pub fn fast_fn(fast_fn: &FastFn) -> parse::Result<()> {
    let sig = &fast_fn.item.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(parse::Error::new(
            asyncness.span,
            "`#[fast_func]` cannot be used on `async` functions: the state machine body is not placed",
        ));
    }

    if let Some((_, attr)) = fast_fn.inline.iter().find(|(kind, _)| *kind != Inline::Never) {
        return Err(parse::Error::new_spanned(
            attr,
            "`#[fast_func]` functions must not be inlined into their callers",
        ));
    }

    if let Some(section) = fast_fn.link_sections.iter().find(|section| section.value() != SECTION) {
        return Err(parse::Error::new(
            section.span(),
            format!("conflicting `link_section`: `#[fast_func]` places code in `{SECTION}`"),
        ));
    }

    Ok(())
}

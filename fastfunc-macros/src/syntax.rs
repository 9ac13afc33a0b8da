use proc_macro2::TokenStream as TokenStream2;
use syn::{
    parse, AttrStyle, Attribute, Expr, ExprLit, Ident, ItemFn, Lit, LitStr, Meta, MetaNameValue,
};

/// A function annotated with `#[fast_func]`
pub struct FastFn {
    /// The function, minus any stacked `#[fast_func]` markers
    pub item: ItemFn,
    /// Every `#[inline]` attribute already present on the function
    pub inline: Vec<(Inline, Attribute)>,
    /// Every section requested by an explicit `link_section` attribute
    pub link_sections: Vec<LitStr>,
}

/// The forms of `#[inline]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inline {
    /// `#[inline]`
    Hint,
    /// `#[inline(always)]`
    Always,
    /// `#[inline(never)]`
    Never,
}

/// Parse the attribute arguments and the annotated item
pub fn fast_fn(args: TokenStream2, input: TokenStream2) -> parse::Result<FastFn> {
    if !args.is_empty() {
        return Err(parse::Error::new_spanned(
            args,
            "`#[fast_func]` takes no arguments",
        ));
    }

    let mut item: ItemFn = syn::parse2(input)?;

    let mut inline = vec![];
    let mut link_sections = vec![];
    let mut attrs = Vec::with_capacity(item.attrs.len());

    for attr in std::mem::take(&mut item.attrs) {
        if is_marker(&attr) {
            // `#[fast_func] #[fast_func] fn foo()`, the outermost marker speaks for all of them
            if !matches!(attr.meta, Meta::Path(_)) {
                return Err(parse::Error::new_spanned(
                    attr.meta,
                    "`#[fast_func]` takes no arguments",
                ));
            }
            continue;
        }

        if let Some(kind) = inline_kind(&attr) {
            inline.push((kind, attr.clone()));
        } else if let Some(section) = link_section_value(&attr) {
            link_sections.push(section);
        }

        attrs.push(attr);
    }

    item.attrs = attrs;

    Ok(FastFn {
        item,
        inline,
        link_sections,
    })
}

/// Input of the hidden configuration macros
pub fn no_input(input: TokenStream2) -> parse::Result<()> {
    if input.is_empty() {
        Ok(())
    } else {
        Err(parse::Error::new_spanned(input, "this macro takes no input"))
    }
}

/// `#[fast_func]`, `#[fastfunc::fast_func]` or `#[fastfunc_macros::fast_func]`
///
/// A `fast_func` attribute of any other crate is kept. A renamed import isn't recognized either,
/// it expands on its own and finds the placement already done.
fn is_marker(attr: &Attribute) -> bool {
    if attr.style != AttrStyle::Outer {
        return false;
    }

    let path = attr.path();
    if path.is_ident("fast_func") {
        return true;
    }

    let segments: Vec<_> = path.segments.iter().map(|segment| &segment.ident).collect();
    matches!(
        segments.as_slice(),
        [krate, name] if (*krate == "fastfunc" || *krate == "fastfunc_macros") && *name == "fast_func"
    )
}

fn inline_kind(attr: &Attribute) -> Option<Inline> {
    if attr.style != AttrStyle::Outer || !attr.path().is_ident("inline") {
        return None;
    }

    match &attr.meta {
        Meta::Path(_) => Some(Inline::Hint),
        Meta::List(list) => {
            // Malformed arguments are left for rustc to report
            let arg: Ident = list.parse_args().ok()?;
            if arg == "always" {
                Some(Inline::Always)
            } else if arg == "never" {
                Some(Inline::Never)
            } else {
                None
            }
        }
        Meta::NameValue(_) => None,
    }
}

/// The string of `#[link_section = "..."]` or `#[unsafe(link_section = "...")]`
fn link_section_value(attr: &Attribute) -> Option<LitStr> {
    if attr.style != AttrStyle::Outer {
        return None;
    }

    let name_value = match &attr.meta {
        Meta::NameValue(nv) => nv.clone(),
        Meta::List(list) if list.path.is_ident("unsafe") => {
            list.parse_args::<MetaNameValue>().ok()?
        }
        _ => return None,
    };

    if !name_value.path.is_ident("link_section") {
        return None;
    }

    match name_value.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(section),
            ..
        }) => Some(section),
        _ => None,
    }
}

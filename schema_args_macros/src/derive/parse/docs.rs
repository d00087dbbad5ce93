//! Doc comment extraction for help and about text.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// First paragraph of the item's doc comment, joined onto one line.
///
/// A single trailing period is dropped so the text reads like clap's own
/// help strings.
pub(crate) fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();
    let paragraph = lines
        .iter()
        .map(|line| line.trim())
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = paragraph.strip_suffix('.').unwrap_or(&paragraph);
    (!text.is_empty()).then(|| text.to_owned())
}

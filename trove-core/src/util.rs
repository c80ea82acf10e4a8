use crate::{Context, Error, Result};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::cmp::min;
use syn::Path;
use url::Url;

pub fn quote_option<T: ToTokens>(value: &Option<T>) -> TokenStream {
    match value {
        None => quote! { None },
        Some(v) => quote! { Some(#v) },
    }
}

pub fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

#[macro_export]
macro_rules! truncate_long {
    ($text:expr) => {
        format_args!(
            "{}{}",
            &$text[..$text.char_indices().nth(497).map_or($text.len(), |(i, _)| i)].trim_end(),
            if $text.char_indices().nth(497).is_some() { "..." } else { "" },
        )
    };
}

/// Decode the namespace out of a connection URL of the form `<scheme>://<namespace>`.
///
/// The namespace is percent-decoded and must not be empty.
pub fn namespace_from_url(scheme: &str, url: &str) -> Result<String> {
    let context = || format!("While decoding connection URL `{}`", truncate_long!(url));
    let parsed = Url::parse(url).with_context(context)?;
    if parsed.scheme() != scheme {
        return Err(Error::msg(format!(
            "Expected the connection URL to start with `{}://`",
            scheme
        )))
        .with_context(context);
    }
    let namespace = urlencoding::decode(parsed.host_str().unwrap_or_default())
        .with_context(context)?
        .into_owned();
    if namespace.is_empty() {
        return Err(Error::msg("The namespace cannot be empty")).with_context(context);
    }
    Ok(namespace)
}

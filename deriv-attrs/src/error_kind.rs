use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{Data, DeriveInput, Expr, Fields, Ident, Result};

/// The tags of the `#[error(...)]` attribute.
#[derive(Debug, Default)]
struct ErrorTags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ErrorTags {
    /// Collects the tags from every `error` attribute in the list. Later tags overwrite earlier
    /// ones.
    fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
        let mut tags = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("message") {
                    &mut tags.message
                } else if meta.path.is_ident("labels") {
                    &mut tags.labels
                } else if meta.path.is_ident("help") {
                    &mut tags.help
                } else {
                    return Err(meta.error("expected `message`, `labels`, or `help`"));
                };
                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }
        Ok(tags)
    }
}

/// A struct that `ErrorKind` is being derived for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    fields: Fields,
    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl TryFrom<DeriveInput> for ErrorKindTarget {
    type Error = syn::Error;

    fn try_from(input: DeriveInput) -> Result<Self> {
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
        };
        let tags = ErrorTags::from_attrs(&input.attrs)?;
        let Some(message) = tags.message else {
            return Err(syn::Error::new_spanned(&input.ident, "missing `#[error(message = ...)]` attribute"));
        };

        Ok(Self {
            name: input.ident,
            fields: data.fields,
            message,
            labels: tags.labels,
            help: tags.help,
        })
    }
}

impl ErrorKindTarget {
    /// A `let` statement that brings the named fields of `self` into scope, so the tag
    /// expressions can refer to them directly.
    fn bind_fields(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
                quote! {
                    #[allow(unused_variables)]
                    let #name { #(#idents),* } = self;
                }
            },
            Fields::Unnamed(_) => quote_spanned! { name.span() =>
                compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => TokenStream2::new(),
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bind = self.bind_fields();
        let message = &self.message;
        let labels = match &self.labels {
            Some(labels) => quote! { #labels },
            None => quote! { [""] },
        };
        let help = self.help.as_ref().map(|help| quote! { report = report.with_help(#help); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bind

                let offset = spans.first().map_or(0, |span| span.start);
                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(deriv_error::EXPR);
                        let text = text.to_string();
                        if text.is_empty() { label } else { label.with_message(text) }
                    });

                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                report.finish()
            }

            fn message(&self) -> String {
                #bind
                (#message).to_string()
            }
        });
    }
}

mod from_row;

use ::quote::quote;
use from_row::expand_from_row;

use syn::parse_macro_input;
use syn::DeriveInput;

use proc_macro::TokenStream as V1TokenStream;

use proc_macro2::{Ident, Span, TokenStream};

use proc_macro_crate::{crate_name, FoundCrate};

/// Implements `FromRow` and `NamedColumns` for a struct.
///
/// Named fields are read by column name, the column defaults to the field
/// name and can be changed with `#[row(rename = "column")]`.
#[proc_macro_derive(FromRow, attributes(row))]
pub fn derive_from_row(input: V1TokenStream) -> V1TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	expand_from_row(&input, &jobly_postgres_path())
		.unwrap_or_else(to_compile_error)
}

fn jobly_postgres_path() -> TokenStream {
	let name = crate_name("jobly-postgres")
		.expect("jobly-postgres not in dependencies");

	match name {
		FoundCrate::Itself => quote!(crate),
		FoundCrate::Name(n) => {
			let ident = Ident::new(&n, Span::call_site());
			quote!(#ident)
		}
	}
}

fn to_compile_error(error: syn::Error) -> V1TokenStream {
	let compile_error = syn::Error::to_compile_error(&error);
	quote!(#compile_error).into()
}

use std::fmt::Write;

use ::quote::{quote, ToTokens};

use syn::{Attribute, DeriveInput, Error, LitStr};
use syn::{Fields, FieldsNamed, FieldsUnnamed};
use syn::{Lifetime, LifetimeParam};

use proc_macro2::{Span, TokenStream};

type Result<T> = std::result::Result<T, Error>;

macro_rules! err {
	($input:expr, $msg:expr) => {
		Error::new_spanned($input.into_token_stream(), $msg)
	};
}

pub fn expand_from_row(
	input: &DeriveInput,
	name: &TokenStream,
) -> Result<proc_macro::TokenStream> {
	let data = match &input.data {
		syn::Data::Struct(data) => data,
		_ => return Err(err!(input, "only structs are supported")),
	};

	let (input_impl_gens, ty_gens, where_clause) =
		input.generics.split_for_impl();

	// FromRow needs a lifetime for the row, reuse the first one if the
	// struct already declares one
	let mut n_gens = input.generics.clone();
	let from_lifetime = match n_gens.lifetimes().next() {
		Some(first) => first.lifetime.clone(),
		None => {
			let lifetime = Lifetime::new("'r", Span::call_site());
			n_gens
				.params
				.push(LifetimeParam::new(lifetime.clone()).into());
			lifetime
		}
	};
	let (impl_gens, _, _) = n_gens.split_for_impl();

	let ident = &input.ident;
	let row = quote!(#name::row);

	match &data.fields {
		Fields::Named(fields) => {
			let (select_columns, from_named_fields) =
				parse_named_fields(fields)?;

			let toks = quote!(
				impl #impl_gens #row::FromRow<#from_lifetime> for #ident #ty_gens #where_clause {
					fn from_row(
						row: &#from_lifetime #row::Row
					) -> std::result::Result<Self, Box<dyn std::error::Error + Sync + Send>> {
						Ok(Self {
							#from_named_fields
						})
					}
				}

				impl #input_impl_gens #row::NamedColumns for #ident #ty_gens #where_clause {
					fn select_columns() -> &'static str {
						#select_columns
					}
				}
			);

			Ok(toks.into())
		}
		Fields::Unnamed(fields) => {
			let from_unnamed_fields = parse_unnamed_fields(fields)?;

			let toks = quote!(
				impl #impl_gens #row::FromRow<#from_lifetime> for #ident #ty_gens #where_clause {
					fn from_row(
						row: &#from_lifetime #row::Row
					) -> std::result::Result<Self, Box<dyn std::error::Error + Sync + Send>> {
						Ok(Self(
							#from_unnamed_fields
						))
					}
				}
			);

			Ok(toks.into())
		}
		f => Err(err!(f, "unit structs are not supported")),
	}
}

fn parse_named_fields(
	fields: &FieldsNamed,
) -> Result<(TokenStream, TokenStream)> {
	let mut select_columns = String::new();
	let mut from_stream = quote!();

	for field in fields.named.iter() {
		let ident = &field.ident;
		let column = match column_rename(&field.attrs)? {
			Some(rename) => rename,
			None => ident.as_ref().unwrap().to_string(),
		};

		if !select_columns.is_empty() {
			select_columns.push_str(", ");
		}
		write!(&mut select_columns, "\"{column}\"").unwrap();

		from_stream.extend(quote!(
			#ident: row.try_get(#column)?,
		));
	}

	Ok((quote!(#select_columns), from_stream))
}

fn parse_unnamed_fields(fields: &FieldsUnnamed) -> Result<TokenStream> {
	let mut from_stream = quote!();

	for (i, field) in fields.unnamed.iter().enumerate() {
		if column_rename(&field.attrs)?.is_some() {
			return Err(err!(field, "rename requires a named field"));
		}

		from_stream.extend(quote!(
			row.try_get(#i)?,
		));
	}

	Ok(from_stream)
}

/// Reads `#[row(rename = "column")]`.
fn column_rename(attrs: &[Attribute]) -> Result<Option<String>> {
	let mut rename = None;

	for attr in attrs.iter().filter(|a| a.path().is_ident("row")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename") {
				let lit: LitStr = meta.value()?.parse()?;
				rename = Some(lit.value());
				Ok(())
			} else {
				Err(meta.error("unknown row attribute"))
			}
		})?;
	}

	Ok(rename)
}

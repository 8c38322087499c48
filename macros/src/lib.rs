use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, FieldsNamed, LitStr};

/// Derive macro implementing `html_flow::RenderValue` for structs
///
/// The first path segment selects a field by name; the remaining segments are
/// resolved by the field's own `RenderValue` implementation, so nested structs
/// deriving `Renderable` work with dotted paths such as `"author.name"`.
///
/// # Examples
///
/// ```ignore
/// use html_flow::{Binding, Renderable};
///
/// #[derive(Renderable)]
/// struct Person {
///     name: String,
///     age: u32,
///     #[renderable(rename = "emailAddress")]
///     email: String,
///     #[renderable(skip)]
///     password: String,
/// }
///
/// let binding: Binding<Person> = Binding::property("emailAddress");
/// ```
#[proc_macro_derive(Renderable, attributes(renderable))]
pub fn derive_renderable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_renderable_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_renderable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Renderable can only be derived for structs",
            ))
        }
    };

    let fields = match &data.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(input, "Renderable requires named fields"))
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                input,
                "Renderable cannot be derived for unit structs",
            ))
        }
    };

    let field_arms = generate_field_arms(fields)?;

    Ok(quote! {
        impl #impl_generics ::html_flow::RenderValue for #name #ty_generics #where_clause {
            fn get_property(&self, path: &[String]) -> Option<::std::borrow::Cow<'_, str>> {
                let (head, rest) = path.split_first()?;
                match head.as_str() {
                    #(#field_arms)*
                    _ => None,
                }
            }
        }
    })
}

fn generate_field_arms(fields: &FieldsNamed) -> syn::Result<Vec<TokenStream2>> {
    let mut arms = Vec::new();

    for field in &fields.named {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attributes(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let property_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        arms.push(quote! {
            #property_name => ::html_flow::RenderValue::get_property(&self.#field_name, rest),
        });
    }

    Ok(arms)
}

#[derive(Default)]
struct FieldAttributes {
    skip: bool,
    rename: Option<String>,
}

fn parse_field_attributes(attrs: &[Attribute]) -> syn::Result<FieldAttributes> {
    let mut result = FieldAttributes::default();

    for attr in attrs {
        if !attr.path().is_ident("renderable") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                result.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }

    Ok(result)
}

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, ToTokens};
use syn::{
    parse_macro_input, Data, DeriveInput, GenericArgument, Ident, Path, PathArguments, PathSegment,
    Type,
};

#[derive(FromDeriveInput)]
#[darling(attributes(request))]
struct DeriveRequestOpts {
    /// Fields which are not an executor themselves but contain structs that need one.
    executor: Option<darling::util::PathList>,
}

/// Implements `crate::Request` for a struct. Every `Arc<Executor>` field gets the executor of the
/// request assigned, every field listed in `#[request(executor(...))]` gets it passed on (through
/// `Option`, `Vec` and `HashMap` values).
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = &derive_input;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let request_opts = match DeriveRequestOpts::from_derive_input(&derive_input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };
    let nested_fields = request_opts.executor.unwrap_or_default();

    let mut assignments = vec![];

    if let Data::Struct(data_struct) = data {
        for field in data_struct.fields.iter() {
            let (Some(field_ident), Type::Path(ty)) = (&field.ident, &field.ty) else {
                continue;
            };

            if nested_fields.iter().any(|path| path.is_ident(field_ident)) {
                assignments.push(pass_executor(quote! { self.#field_ident }, &ty.path));
            } else if is_executor_arc(&ty.path) {
                assignments.push(quote! {
                    self.#field_ident = executor.clone();
                })
            }
        }
    }

    // structs without executor fields would otherwise trigger an unused variable warning
    let executor_param = if assignments.is_empty() {
        quote! { _executor }
    } else {
        quote! { executor }
    };

    let expanded = quote! {
        impl #impl_generics crate::Request for #ident #ty_generics #where_clause {
            fn __set_executor(&mut self, #executor_param: std::sync::Arc<crate::Executor>) {
                #(#assignments)*
            }
        }
    };
    expanded.into()
}

fn is_executor_arc(path: &Path) -> bool {
    let Some(segment) = path.segments.last() else {
        return false;
    };
    segment.ident == "Arc"
        && inner_types(segment)
            .first()
            .and_then(|p| p.segments.last())
            .is_some_and(|s| s.ident == "Executor")
}

fn pass_executor(target: TokenStream2, path: &Path) -> TokenStream2 {
    let Some(segment) = path.segments.last() else {
        return quote! {};
    };

    let raw_target = target.to_string();
    let target_name = raw_target
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let (prefix, iter, inner) = match segment.ident.to_string().as_str() {
        "Option" => ("option_", None, inner_types(segment).into_iter().next()),
        "Vec" => ("vec_", Some(quote! { iter_mut() }), inner_types(segment).into_iter().next()),
        "HashMap" => (
            "hash_map_",
            Some(quote! { values_mut() }),
            inner_types(segment).into_iter().nth(1),
        ),
        _ => {
            return quote! {
                #target.__set_executor(executor.clone());
            }
        }
    };
    let Some(inner) = inner else {
        return quote! {};
    };

    let binding = Ident::new(&format!("{prefix}{target_name}"), Span::call_site());
    let nested = pass_executor(binding.to_token_stream(), &inner);

    match iter {
        Some(iter) => quote! {
            for #binding in #target.#iter {
                #nested
            }
        },
        None => quote! {
            if let Some(#binding) = &mut #target {
                #nested
            }
        },
    }
}

fn inner_types(segment: &PathSegment) -> Vec<Path> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return vec![];
    };
    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(Type::Path(ty)) => Some(ty.path.clone()),
            _ => None,
        })
        .collect()
}

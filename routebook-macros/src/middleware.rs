//! Implementation of the `#[middleware]` attribute macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Expr, FnArg, Ident, ItemFn, LitStr, Pat, ReturnType, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[middleware]` macro.
pub(crate) struct MiddlewareArgs {
    pub name: Option<String>,
    pub filter: Option<Expr>,
}

impl Parse for MiddlewareArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut filter = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                "filter" => {
                    let expr: Expr = input.parse()?;
                    filter = Some(expr);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(MiddlewareArgs { name, filter })
    }
}

pub fn middleware_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MiddlewareArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(&args, &input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &MiddlewareArgs, input: &ItemFn) -> syn::Result<TokenStream2> {
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;

    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            input.sig.fn_token,
            "middleware function must be async",
        ));
    }

    if input.sig.inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &input.sig.inputs,
            "middleware function must take a context and a continuation: fn(ctx: &mut Ctx, next: Next<'_, Ctx>)",
        ));
    }

    let (ctx_pat, ctx_type) = context_arg(&input.sig.inputs[0])?;
    let (next_pat, next_type) = next_arg(&input.sig.inputs[1])?;

    // Declared continuation and return types are emitted as written.
    let next_type = match next_type {
        Some(ty) => quote! { #ty },
        None => quote! { ::routebook::Next<'_, #ctx_type> },
    };
    let output = match &input.sig.output {
        ReturnType::Type(_, ty) => quote! { #ty },
        ReturnType::Default => {
            quote! { ::core::result::Result<(), ::routebook::BoxError> }
        }
    };

    let struct_name = match args.name {
        Some(ref custom_name) => Ident::new(custom_name, fn_name.span()),
        None => fn_name.clone(),
    };

    let filter_check = args.filter.as_ref().map(|filter_expr| {
        quote! {
            if !(#filter_expr)(&*#ctx_pat) {
                return #next_pat.run(#ctx_pat).await;
            }
        }
    });

    Ok(quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Auto-generated Middleware from `#[routebook::middleware]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #struct_name;

        impl ::routebook::Middleware<#ctx_type> for #struct_name {
            async fn handle(
                &self,
                #ctx_pat: &mut #ctx_type,
                #next_pat: #next_type,
            ) -> #output {
                #filter_check
                #fn_block
            }
        }
    })
}

/// The pattern and referent type of `ctx: &mut Ctx`.
fn context_arg(arg: &FnArg) -> syn::Result<(&Pat, &Type)> {
    match arg {
        FnArg::Typed(pat_type) => match &*pat_type.ty {
            Type::Reference(type_ref) if type_ref.mutability.is_some() => {
                Ok((&pat_type.pat, &type_ref.elem))
            }
            other => Err(syn::Error::new_spanned(
                other,
                "middleware context argument must be a mutable reference (&mut Ctx)",
            )),
        },
        FnArg::Receiver(receiver) => Err(syn::Error::new_spanned(
            receiver,
            "middleware function cannot take self",
        )),
    }
}

/// The pattern of the continuation argument, and its type unless written as `_`.
fn next_arg(arg: &FnArg) -> syn::Result<(&Pat, Option<&Type>)> {
    match arg {
        FnArg::Typed(pat_type) => match &*pat_type.ty {
            Type::Infer(_) => Ok((&pat_type.pat, None)),
            ty => Ok((&pat_type.pat, Some(ty))),
        },
        FnArg::Receiver(receiver) => Err(syn::Error::new_spanned(
            receiver,
            "middleware function cannot take self",
        )),
    }
}

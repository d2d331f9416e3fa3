use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, DeriveInput, LitStr, Token};

/// 单个 `#[mongo_index(...)]` 解析结果
struct IndexSpec {
    fields: Vec<String>,
    unique: bool,
    sort_order: i32,
    name: Option<String>,
}

pub fn expand_index_model_provider(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match build_impl(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn build_impl(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let mut index_exprs = vec![];

    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("mongo_index")) {
        let spec = parse_index_attr(attr)?;
        index_exprs.push(index_model_tokens(&spec));
    }

    Ok(quote! {
        impl MongoIndexModelProvider for #name {
            fn index_models() -> Vec<::mongodb::IndexModel> {
                vec![
                    #(#index_exprs),*
                ]
            }
        }
    })
}

fn parse_index_attr(attr: &Attribute) -> syn::Result<IndexSpec> {
    let mut spec = IndexSpec { fields: vec![], unique: false, sort_order: 1, name: None };

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("fields") {
            let content;
            syn::parenthesized!(content in meta.input);
            let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            spec.fields.extend(list.iter().map(LitStr::value));
        } else if meta.path.is_ident("unique") {
            spec.unique = true;
        } else if meta.path.is_ident("order") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lit: LitStr = content.parse()?;
            match lit.value().to_ascii_lowercase().as_str() {
                "asc" => spec.sort_order = 1,
                "desc" => spec.sort_order = -1,
                _ => return Err(syn::Error::new(lit.span(), "order must be \"asc\" or \"desc\"")),
            }
        } else if meta.path.is_ident("name") {
            let content;
            syn::parenthesized!(content in meta.input);
            let lit: LitStr = content.parse()?;
            spec.name = Some(lit.value());
        } else {
            return Err(meta.error("unsupported #[mongo_index(...)] key"));
        }
        Ok(())
    })?;

    if spec.fields.is_empty() {
        return Err(syn::Error::new_spanned(attr, "#[mongo_index] requires fields(\"...\")"));
    }
    Ok(spec)
}

fn index_model_tokens(spec: &IndexSpec) -> TokenStream {
    let sort_order = spec.sort_order;
    let fields = &spec.fields;
    let key_doc = quote! {
        {
            let mut keys = ::mongodb::bson::Document::new();
            #( keys.insert(#fields, #sort_order); )*
            keys
        }
    };

    let mut options = quote! { ::mongodb::options::IndexOptions::builder() };
    if spec.unique {
        options = quote! { #options.unique(true) };
    }
    if let Some(ref name) = spec.name {
        options = quote! { #options.name(Some(#name.to_string())) };
    }

    quote! {
        ::mongodb::IndexModel::builder()
            .keys(#key_doc)
            .options(Some(#options.build()))
            .build()
    }
}

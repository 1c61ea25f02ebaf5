mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error is customized with the `error` attribute:
/// ```
/// use symcheck_attrs::ErrorKind;
/// use symcheck_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unexpected end of input",
///     labels = ["add something here"],
///     help = "did you forget a closing parenthesis?",
/// )]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                    |
/// | --------- | ------------------------------------------------------------------------------ |
/// | `message` | The message displayed at the top of the error when it is displayed.            |
/// | `labels`  | An iterable of labels, the `i`th of which points at the `i`th span of the error. |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.   |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the members of the struct in scope, so they can be used in the expression (tuple structs
/// are not supported). An empty label string attaches a label without text.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl symcheck_error::ErrorKind for #name {
            #target
        }
    }.into()
}

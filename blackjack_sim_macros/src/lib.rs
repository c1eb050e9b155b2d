use proc_macro::TokenStream as TokenStream1;
use quote::ToTokens;
use syn::{self, parse_quote, Ident};

/// This macro is added before a method of `Simulator` struct in the impl block.
/// Use this macro to first check if current game phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(PlaceBets)]` will make a method first check
/// if current game phase is `PlaceBets`. If not, the method will return
/// `SimulationError::PhaseViolation` naming the method and both phases.
///
/// The annotated method must return `Result<_, SimulationError>`, and both
/// `GamePhase` and `SimulationError` must be in scope.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = syn::parse_macro_input!(attr as Ident);
    let mut ast = syn::parse_macro_input!(item as syn::ImplItemFn);
    let function_name = ast.sig.ident.to_string();
    ast.block.stmts.insert(0, phase_guard(&phase, &function_name));
    ast.into_token_stream().into()
}

fn phase_guard(phase: &Ident, function_name: &str) -> syn::Stmt {
    parse_quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(SimulationError::PhaseViolation {
                operation: #function_name,
                expected: GamePhase::#phase,
                actual: self.current_game_phase,
            });
        }
    }
}

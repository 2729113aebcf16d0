use crate::{
    ast::{FunctionBody, FunctionDecl, Parameter, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Streams},
            function::{input, print},
        },
        lexer::Lexeme,
        scope::ScopeChain,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin reads its arguments from the call frame the interpreter bound
/// them in, and either completes normally (void built-ins) or returns
/// [`Flow::Return`] with its result.
type BuiltinFn = fn(&ScopeChain, &mut Streams<'_>) -> EvalResult<Flow>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the declared return type,
/// - the parameters as `(type, name)` pairs,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                returns: $returns:expr,
                params: [$(($ty:expr, $param:literal)),* $(,)?],
                run: $run:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:    &'static str,
            returns: TypeName,
            params:  &'static [(TypeName, &'static str)],
            run:     BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, returns: $returns, params: &[$(($ty, $param)),*], run: $run },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "printi"    => { returns: TypeName::Void,   params: [(TypeName::Int, "p")],    run: print::printi },
    "printf"    => { returns: TypeName::Void,   params: [(TypeName::Float, "p")],  run: print::printf },
    "prints"    => { returns: TypeName::Void,   params: [(TypeName::String, "p")], run: print::prints },
    "printl"    => { returns: TypeName::Void,   params: [(TypeName::Array, "p")],  run: print::printl },
    "inputi"    => { returns: TypeName::Int,    params: [],                        run: input::inputi },
    "inputf"    => { returns: TypeName::Float,  params: [],                        run: input::inputf },
    "inputs"    => { returns: TypeName::String, params: [],                        run: input::inputs },
    "inputline" => { returns: TypeName::String, params: [],                        run: input::inputline },
}

/// Builds the declarations installed in the root frame, one per built-in.
///
/// Built-ins have no source position; their lexemes are defaults.
///
/// # Example
/// ```
/// use clite::{
///     ast::{FunctionBody, TypeName},
///     interpreter::evaluator::function::builtin::builtin_declarations,
/// };
///
/// let inputi = builtin_declarations().find(|f| f.name == "inputi").unwrap();
/// assert_eq!(inputi.return_type, TypeName::Int);
/// assert_eq!(inputi.body, FunctionBody::Builtin("inputi"));
/// ```
pub fn builtin_declarations() -> impl Iterator<Item = FunctionDecl> {
    BUILTIN_TABLE.iter().map(|def| {
                            let parameters =
                                def.params
                                   .iter()
                                   .map(|&(ty, name)| Parameter { ty,
                                                                  name: name.to_string(),
                                                                  dims: 0,
                                                                  lexeme: Lexeme::default() })
                                   .collect();
                            FunctionDecl { return_type: def.returns,
                                           name: def.name.to_string(),
                                           return_dims: 0,
                                           parameters,
                                           body: FunctionBody::Builtin(def.name),
                                           lexeme: Lexeme::default() }
                        })
}

/// Runs the built-in called `name` against the current call frame.
///
/// # Errors
/// `IdentifierNotFound` if no built-in has that name, otherwise whatever the
/// built-in raises.
pub fn run_builtin(name: &str,
                   scopes: &ScopeChain,
                   streams: &mut Streams<'_>)
                   -> EvalResult<Flow> {
    let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) else {
        let details = format!("no built-in named '{name}'");
        return Err(RuntimeError::IdentifierNotFound { details,
                                                      lexeme: None });
    };
    (builtin.run)(scopes, streams)
}

/// Returns `true` if `name` belongs to a built-in function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDecl, TypeName},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{float_to_int, int_to_float},
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to one of these variants, and every scope
/// entry (variables and functions alike) stores one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer. Also used for booleans (`0` / `1`).
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An array. All elements share one leaf type and, when they are arrays
    /// themselves, one shape.
    Array(Vec<Self>),
    /// The result of a `void` function.
    Void,
    /// A user-defined or built-in function.
    Function(Rc<FunctionDecl>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// Returns the default value of a declared leaf type: `0`, `0.0` or `""`.
    ///
    /// `void` and the internal array marker have no default and yield
    /// [`Value::Void`].
    ///
    /// # Example
    /// ```
    /// use clite::{ast::TypeName, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::default_for(TypeName::Float), Value::Float(0.0));
    /// ```
    #[must_use]
    pub const fn default_for(ty: TypeName) -> Self {
        match ty {
            TypeName::Int => Self::Int(0),
            TypeName::Float => Self::Float(0.0),
            TypeName::String => Self::Str(String::new()),
            TypeName::Void | TypeName::Array => Self::Void,
        }
    }

    /// Returns the type tag of this value.
    ///
    /// Arrays report [`TypeName::Array`]; use [`Value::leaf_type`] for the
    /// type of their elements. Functions have no type tag.
    #[must_use]
    pub const fn type_name(&self) -> Option<TypeName> {
        match self {
            Self::Int(_) => Some(TypeName::Int),
            Self::Float(_) => Some(TypeName::Float),
            Self::Str(_) => Some(TypeName::String),
            Self::Array(_) => Some(TypeName::Array),
            Self::Void => Some(TypeName::Void),
            Self::Function(_) => None,
        }
    }

    /// Returns the innermost non-array type of this value.
    ///
    /// For scalars this is their own type. For arrays it is the type at the
    /// bottom of the nesting. Void and function values have no leaf type.
    ///
    /// # Example
    /// ```
    /// use clite::{ast::TypeName, interpreter::value::core::Value};
    ///
    /// let grid = Value::Array(vec![Value::Array(vec![Value::Float(1.0)])]);
    /// assert_eq!(grid.leaf_type(), Some(TypeName::Float));
    /// ```
    #[must_use]
    pub fn leaf_type(&self) -> Option<TypeName> {
        match self {
            Self::Int(_) => Some(TypeName::Int),
            Self::Float(_) => Some(TypeName::Float),
            Self::Str(_) => Some(TypeName::String),
            Self::Array(elements) => elements.first().and_then(Self::leaf_type),
            Self::Void | Self::Function(_) => None,
        }
    }

    /// Returns `true` for int, float and string values.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Str(_))
    }

    /// Describes the value's type for diagnostics, e.g. `int`, `float[2][3]`
    /// or `function`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Array(_) => {
                let leaf = self.leaf_type().map_or_else(|| "?".to_string(), |t| t.to_string());
                let dims: String = self.shape().iter().map(|d| format!("[{d}]")).collect();
                format!("{leaf}{dims}")
            },
            Self::Function(function) => format!("function '{}'", function.name),
            _ => self.type_name().map(|t| t.to_string()).unwrap_or_default(),
        }
    }

    /// Converts a value for storage in a slot of type `ty`.
    ///
    /// Numeric values convert to the other numeric type: an int widens to a
    /// float, a float truncates toward zero to an int. A value already of type
    /// `ty` is returned unchanged. Everything else is a type mismatch.
    ///
    /// # Errors
    /// `MismatchedType` if the value cannot be stored as `ty`, including a
    /// float too large for an int.
    ///
    /// # Example
    /// ```
    /// use clite::{ast::TypeName, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::Float(-2.7).coerce_to(TypeName::Int).unwrap(), Value::Int(-2));
    /// assert_eq!(Value::Int(3).coerce_to(TypeName::Float).unwrap(), Value::Float(3.0));
    /// assert!(Value::from("3").coerce_to(TypeName::Int).is_err());
    /// ```
    pub fn coerce_to(self, ty: TypeName) -> EvalResult<Self> {
        match (self, ty) {
            (Self::Int(v), TypeName::Float) => Ok(Self::Float(int_to_float(v))),
            (Self::Float(v), TypeName::Int) => {
                float_to_int(v).map(Self::Int).ok_or_else(|| {
                                                    mismatch(format!("{v} does not fit in an int"))
                                                })
            },
            (value @ (Self::Int(_) | Self::Float(_) | Self::Str(_)), _)
                if value.type_name() == Some(ty) =>
            {
                Ok(value)
            },
            (value, _) => Err(mismatch(format!("cannot store {} in {ty}", value.describe()))),
        }
    }

    /// Interprets the value as a condition: non-zero numbers are true.
    ///
    /// # Errors
    /// `MismatchedType` for strings, arrays, void and functions.
    pub fn is_truthy(&self) -> EvalResult<bool> {
        match self {
            Self::Int(v) => Ok(*v != 0),
            Self::Float(v) => Ok(*v != 0.0),
            other => Err(mismatch(format!("condition must be numeric, found {}", other.describe()))),
        }
    }

    /// Returns the integer payload, or a mismatch error naming `role`.
    ///
    /// # Errors
    /// `MismatchedType` if the value is not an int.
    pub fn as_int(&self, role: &str) -> EvalResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(mismatch(format!("{role} must be an int, found {}", other.describe()))),
        }
    }

    /// Writes an element of an array as `printl` shows it: strings quoted,
    /// everything else as [`fmt::Display`] renders it.
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            other => write!(f, "{other}"),
        }
    }
}

/// Builds a `MismatchedType` error without position; the evaluator attaches
/// the lexeme.
pub(crate) fn mismatch(details: impl Into<String>) -> RuntimeError {
    RuntimeError::MismatchedType { details: details.into(),
                                   lexeme:  None, }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Debug keeps the fractional part: `2.0` rather than `2`.
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(s) => f.write_str(s),
            Self::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt_element(f)?;
                }
                f.write_str("]")
            },
            Self::Void => f.write_str("void"),
            Self::Function(function) => write!(f, "<function {}>", function.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_float_coercion_follows_c() {
        assert_eq!(Value::Float(7.9).coerce_to(TypeName::Int).unwrap(), Value::Int(7));
        assert_eq!(Value::Float(-7.9).coerce_to(TypeName::Int).unwrap(), Value::Int(-7));
        assert_eq!(Value::Int(-4).coerce_to(TypeName::Float).unwrap(), Value::Float(-4.0));
        assert!(matches!(Value::Float(f64::INFINITY).coerce_to(TypeName::Int),
                         Err(RuntimeError::MismatchedType { .. })));
    }

    #[test]
    fn strings_and_arrays_never_coerce() {
        assert!(Value::Int(1).coerce_to(TypeName::String).is_err());
        assert!(Value::Array(vec![Value::Int(1)]).coerce_to(TypeName::Int).is_err());
        assert_eq!(Value::from("a").coerce_to(TypeName::String).unwrap(), Value::from("a"));
    }

    #[test]
    fn display_matches_print_builtins() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        let nested = Value::Array(vec![Value::Array(vec![Value::Int(1), Value::Int(2)]),
                                       Value::Array(vec![Value::Int(3), Value::Int(4)])]);
        assert_eq!(nested.to_string(), "[[1, 2], [3, 4]]");
        assert_eq!(Value::Array(vec![Value::from("x")]).to_string(), "['x']");
        assert_eq!(nested.describe(), "int[2][2]");
    }

    #[test]
    fn only_numbers_are_conditions() {
        assert!(Value::Int(-1).is_truthy().unwrap());
        assert!(!Value::Float(0.0).is_truthy().unwrap());
        assert!(Value::from("yes").is_truthy().is_err());
    }
}

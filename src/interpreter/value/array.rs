use crate::{
    ast::TypeName,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Value, mismatch},
    },
    util::num::checked_index,
};

/// Largest number of leaves a declared array may hold.
pub const MAX_ARRAY_ELEMENTS: usize = 1 << 24;

fn out_of_bounds(details: String) -> RuntimeError {
    RuntimeError::OutOfBounds { details,
                                lexeme: None }
}

impl Value {
    /// Builds an array from evaluated initializer-list elements.
    ///
    /// Enforces the array invariant: the list is non-empty and every element
    /// has the same leaf type and the same shape as the first one. Nested
    /// lists were already checked when they were evaluated.
    ///
    /// # Errors
    /// `MismatchedType` for an empty list, a void or function element, or
    /// elements that disagree in leaf type or shape.
    ///
    /// # Example
    /// ```
    /// use clite::interpreter::value::core::Value;
    ///
    /// let ok = Value::array_from(vec![Value::Int(1), Value::Int(2)]).unwrap();
    /// assert_eq!(ok.shape(), vec![2]);
    ///
    /// assert!(Value::array_from(vec![Value::Int(1), Value::Float(2.0)]).is_err());
    /// assert!(Value::array_from(vec![]).is_err());
    /// ```
    pub fn array_from(elements: Vec<Self>) -> EvalResult<Self> {
        let Some(first) = elements.first() else {
            return Err(mismatch("initializer list is empty"));
        };
        let Some(leaf) = first.leaf_type() else {
            return Err(mismatch(format!("{} cannot be an array element", first.describe())));
        };
        let shape = first.shape();
        if let Some(odd) = elements.iter()
                                   .find(|e| e.leaf_type() != Some(leaf) || e.shape() != shape)
        {
            return Err(mismatch(format!("initializer list mixes {} and {}",
                                        first.describe(),
                                        odd.describe())));
        }
        Ok(Self::Array(elements))
    }

    /// Builds an array of the given dimensions with every leaf set to `leaf`.
    ///
    /// An empty `dims` returns `leaf` itself.
    ///
    /// # Errors
    /// `OutOfBounds` if the array would hold more than
    /// [`MAX_ARRAY_ELEMENTS`] leaves.
    ///
    /// # Example
    /// ```
    /// use clite::interpreter::value::core::Value;
    ///
    /// let grid = Value::filled(&[2, 3], &Value::Int(0)).unwrap();
    /// assert_eq!(grid.shape(), vec![2, 3]);
    ///
    /// assert!(Value::filled(&[usize::MAX, 2], &Value::Int(0)).is_err());
    /// ```
    pub fn filled(dims: &[usize], leaf: &Self) -> EvalResult<Self> {
        let count = dims.iter()
                        .try_fold(1_usize, |count, &len| count.checked_mul(len))
                        .filter(|&count| count <= MAX_ARRAY_ELEMENTS);
        if count.is_none() {
            return Err(out_of_bounds(format!("array of dimensions {dims:?} exceeds \
                                              {MAX_ARRAY_ELEMENTS} elements")));
        }
        Ok(Self::build(dims, leaf))
    }

    fn build(dims: &[usize], leaf: &Self) -> Self {
        match dims.split_first() {
            None => leaf.clone(),
            Some((&len, rest)) => Self::Array(vec![Self::build(rest, leaf); len]),
        }
    }

    /// Returns the length of each dimension, outermost first. Scalars have
    /// an empty shape.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        let mut current = self;
        while let Self::Array(elements) = current {
            shape.push(elements.len());
            match elements.first() {
                Some(first) => current = first,
                None => break,
            }
        }
        shape
    }

    /// Checks that this array can initialize a declaration of leaf type `ty`
    /// with the given dimensions, and returns the concrete dimensions.
    ///
    /// `None` entries in `dims` are unsized and take the initializer's
    /// length. Leaf types must match exactly; there is no element coercion.
    ///
    /// # Errors
    /// `MismatchedType` if the dimension count, a sized dimension, or the
    /// leaf type disagrees.
    pub fn conform_to(&self, ty: TypeName, dims: &[Option<usize>]) -> EvalResult<Vec<usize>> {
        let shape = self.shape();
        if shape.len() != dims.len() {
            return Err(mismatch(format!("cannot initialize a {}-dimensional {ty} array with {}",
                                        dims.len(),
                                        self.describe())));
        }
        for (declared, actual) in dims.iter().zip(&shape) {
            if let Some(declared) = declared
               && declared != actual
            {
                return Err(mismatch(format!("dimension {declared} does not match initializer \
                                             length {actual}")));
            }
        }
        if self.leaf_type() != Some(ty) {
            return Err(mismatch(format!("cannot initialize a {ty} array with {}",
                                        self.describe())));
        }
        Ok(shape)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    /// `MismatchedType` if this value is not an array, `OutOfBounds` if the
    /// index is negative or past the end.
    pub fn element(&self, index: i64) -> EvalResult<&Self> {
        let Self::Array(elements) = self else {
            return Err(mismatch(format!("cannot index into {}", self.describe())));
        };
        checked_index(index, elements.len()).map(|i| &elements[i])
                                            .ok_or_else(|| {
                                                out_of_bounds(format!("index {index} outside \
                                                                       0..{}",
                                                                      elements.len()))
                                            })
    }

    /// Mutable counterpart of [`Value::element`].
    ///
    /// # Errors
    /// Same as [`Value::element`].
    pub fn element_mut(&mut self, index: i64) -> EvalResult<&mut Self> {
        let description = self.describe();
        let Self::Array(elements) = self else {
            return Err(mismatch(format!("cannot index into {description}")));
        };
        let len = elements.len();
        checked_index(index, len).map(|i| &mut elements[i])
                                 .ok_or_else(|| {
                                     out_of_bounds(format!("index {index} outside 0..{len}"))
                                 })
    }

    /// Follows `indices` from the outermost dimension inward.
    ///
    /// Fewer indices than dimensions yields a sub-array.
    ///
    /// # Errors
    /// Same as [`Value::element`], for whichever step fails first.
    pub fn at_path(&self, indices: &[i64]) -> EvalResult<&Self> {
        indices.iter().try_fold(self, |current, &index| current.element(index))
    }

    /// Mutable counterpart of [`Value::at_path`].
    ///
    /// # Errors
    /// Same as [`Value::element`], for whichever step fails first.
    pub fn at_path_mut(&mut self, indices: &[i64]) -> EvalResult<&mut Self> {
        let mut current = self;
        for &index in indices {
            current = current.element_mut(index)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn filled_builds_every_dimension() {
        let grid = Value::filled(&[2, 3], &Value::Float(0.0)).unwrap();
        assert_eq!(grid.shape(), vec![2, 3]);
        assert_eq!(grid.at_path(&[1, 2]).unwrap(), &Value::Float(0.0));
    }

    #[test]
    fn oversized_arrays_are_rejected_before_allocating() {
        assert!(Value::filled(&[4, 4, 4], &Value::Int(0)).is_ok());
        assert!(matches!(Value::filled(&[MAX_ARRAY_ELEMENTS + 1], &Value::Int(0)),
                         Err(RuntimeError::OutOfBounds { .. })));
        assert!(matches!(Value::filled(&[usize::MAX, 2], &Value::Int(0)),
                         Err(RuntimeError::OutOfBounds { .. })));
    }

    #[test]
    fn rows_must_share_a_shape() {
        assert!(Value::array_from(vec![ints(&[1, 2]), ints(&[3, 4])]).is_ok());
        assert!(matches!(Value::array_from(vec![ints(&[1, 2]), ints(&[3])]),
                         Err(RuntimeError::MismatchedType { .. })));
        assert!(Value::array_from(vec![ints(&[1]), Value::Int(2)]).is_err());
    }

    #[test]
    fn conform_infers_unsized_dimensions() {
        let rows = Value::array_from(vec![ints(&[1, 2, 3]), ints(&[4, 5, 6])]).unwrap();
        assert_eq!(rows.conform_to(TypeName::Int, &[None, Some(3)]).unwrap(), vec![2, 3]);
        assert!(rows.conform_to(TypeName::Int, &[Some(2), Some(4)]).is_err());
        assert!(rows.conform_to(TypeName::Float, &[None, None]).is_err());
        assert!(rows.conform_to(TypeName::Int, &[None]).is_err());
    }

    #[test]
    fn indexing_is_bounds_checked() {
        let mut list = ints(&[1, 2, 3]);
        assert_eq!(list.element(0).unwrap(), &Value::Int(1));
        assert!(matches!(list.element(3), Err(RuntimeError::OutOfBounds { .. })));
        assert!(matches!(list.element(-1), Err(RuntimeError::OutOfBounds { .. })));
        assert!(matches!(Value::Int(1).element(0), Err(RuntimeError::MismatchedType { .. })));

        *list.at_path_mut(&[1]).unwrap() = Value::Int(9);
        assert_eq!(list, ints(&[1, 9, 3]));
    }
}

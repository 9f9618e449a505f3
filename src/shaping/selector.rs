//! Sparse fieldset validation and selection

use super::field_map::{FieldDescriptor, FieldMap, Shapeable};

fn requested(expression: Option<&str>) -> Option<Vec<&str>> {
    let expression = expression.filter(|e| !e.trim().is_empty())?;
    let mut names: Vec<&str> = Vec::new();
    for name in expression.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            names.push(name);
        }
    }
    Some(names)
}

/// Whether every requested field exists on `T`
///
/// Missing or blank expressions are valid and mean "all fields".
pub fn validate_fields<T: Shapeable>(expression: Option<&str>) -> bool {
    let Some(names) = requested(expression) else {
        return true;
    };
    let map = FieldMap::<T>::of();
    names.iter().all(|name| map.contains(name))
}

/// Descriptors to emit for an expression
///
/// The output keeps the type's declared field order regardless of the
/// order the client listed them in. Unknown names are ignored.
pub fn select_fields<T: Shapeable>(expression: Option<&str>) -> Vec<FieldDescriptor<T>> {
    let map = FieldMap::<T>::of();
    match requested(expression) {
        None => map.descriptors().to_vec(),
        Some(names) => map
            .descriptors()
            .iter()
            .filter(|d| names.iter().any(|n| d.name.eq_ignore_ascii_case(n)))
            .copied()
            .collect(),
    }
}

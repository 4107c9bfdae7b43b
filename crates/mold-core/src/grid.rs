//! Grid layout helper for the render layer.
//!
//! Pure glue: turns the visible subset of a field list into rows of grid
//! cells. No markup or styling concerns live here.

use crate::field::FieldDescriptor;
use crate::visibility::VisibleFieldSet;

/// Lay the visible fields out into rows of `columns` cells.
///
/// Fields are placed in declaration order. Each field occupies its
/// `span` columns, clamped to the grid width; a field that does not fit
/// the remaining space of the current row starts a new one.
pub fn grid_rows<'a>(
    fields: &'a [FieldDescriptor],
    visible: &VisibleFieldSet,
    columns: u16,
) -> Vec<Vec<&'a FieldDescriptor>> {
    let columns = columns.max(1);
    let mut rows: Vec<Vec<&FieldDescriptor>> = Vec::new();
    let mut row: Vec<&FieldDescriptor> = Vec::new();
    let mut used = 0u16;

    for field in fields.iter().filter(|f| visible.contains(&f.key)) {
        let span = field.span.clamp(1, columns);
        if used + span > columns && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(field);
        used += span;
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rows: &[Vec<&FieldDescriptor>]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|f| f.key.clone()).collect())
            .collect()
    }

    fn visible_of(fields: &[FieldDescriptor]) -> VisibleFieldSet {
        fields.iter().map(|f| f.key.clone()).collect()
    }

    #[test]
    fn fills_rows_in_declaration_order() {
        let fields = vec![
            FieldDescriptor::new("a"),
            FieldDescriptor::new("b"),
            FieldDescriptor::new("c"),
        ];
        let rows = grid_rows(&fields, &visible_of(&fields), 2);

        assert_eq!(keys(&rows), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn spans_wrap_to_the_next_row() {
        let fields = vec![
            FieldDescriptor::new("a"),
            FieldDescriptor::new("wide").span(2),
            FieldDescriptor::new("b"),
        ];
        let rows = grid_rows(&fields, &visible_of(&fields), 2);

        assert_eq!(keys(&rows), vec![vec!["a"], vec!["wide"], vec!["b"]]);
    }

    #[test]
    fn oversized_span_clamps_to_grid_width() {
        let fields = vec![FieldDescriptor::new("huge").span(9)];
        let rows = grid_rows(&fields, &visible_of(&fields), 3);

        assert_eq!(keys(&rows), vec![vec!["huge"]]);
    }

    #[test]
    fn hidden_fields_take_no_cells() {
        let fields = vec![
            FieldDescriptor::new("a"),
            FieldDescriptor::new("hidden"),
            FieldDescriptor::new("b"),
        ];
        let visible: VisibleFieldSet =
            ["a".to_string(), "b".to_string()].into_iter().collect();
        let rows = grid_rows(&fields, &visible, 2);

        assert_eq!(keys(&rows), vec![vec!["a", "b"]]);
    }

    #[test]
    fn zero_columns_degrades_to_one() {
        let fields = vec![FieldDescriptor::new("a"), FieldDescriptor::new("b")];
        let rows = grid_rows(&fields, &visible_of(&fields), 0);

        assert_eq!(keys(&rows), vec![vec!["a"], vec!["b"]]);
    }
}

use crate::core::{Availability, Cell, Table};

const INGREDIENT: usize = 0;
const AVAILABLE: usize = 1;

/// Builds the set of in-stock ingredient names from the ingredients sheet.
pub struct AvailabilityLoader;

impl AvailabilityLoader {
    pub fn load(table: &Table) -> Availability {
        let mut availability = Availability::new();

        for (row_number, row) in table.data_rows() {
            let name = match row.get(INGREDIENT) {
                Some(cell) if !cell.is_blank() => cell.to_string().trim().to_string(),
                _ => continue,
            };

            if row.get(AVAILABLE).is_some_and(is_marked) {
                availability.insert(name);
            } else {
                tracing::debug!("Row {}: '{}' is not available", row_number, name);
            }
        }

        tracing::debug!(
            "{} ingredients available in '{}'",
            availability.len(),
            table.name
        );
        availability
    }
}

fn is_marked(flag: &Cell) -> bool {
    match flag {
        Cell::Empty => false,
        Cell::Text(s) => !s.trim().is_empty(),
        Cell::Bool(b) => *b,
        Cell::Int(i) => *i != 0,
        Cell::Float(f) => *f != 0.0,
    }
}

use crate::core::{Cell, Cocktail, CocktailIngredient, Table};
use crate::utils::error::{MenuError, Result};

const PREPARATION: usize = 0;
const ICE_TYPE: usize = 1;
const GARNISH: usize = 2;
const GLASSWARE: usize = 3;
const PAGE: usize = 4;
const CATEGORY: usize = 5;
const OBSERVATION: usize = 6;
const NAME: usize = 7;
const FIRST_INGREDIENT: usize = 8;

static EMPTY: Cell = Cell::Empty;

fn cell(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

/// Parses the recipes sheet into cocktails, in sheet order.
pub struct RecipeLoader;

impl RecipeLoader {
    pub fn load(table: &Table) -> Result<Vec<Cocktail>> {
        let mut cocktails = Vec::new();

        for (row_number, row) in table.data_rows() {
            if let Some(cocktail) = Self::parse_row(&table.name, row_number, row)? {
                cocktails.push(cocktail);
            }
        }

        tracing::debug!("Loaded {} cocktails from '{}'", cocktails.len(), table.name);
        Ok(cocktails)
    }

    /// `None` for rows without a name; those are blank or terminator rows.
    pub fn parse_row(table: &str, row_number: usize, row: &[Cell]) -> Result<Option<Cocktail>> {
        let name_cell = cell(row, NAME);
        if name_cell.is_blank() {
            tracing::debug!("Skipping row {} in '{}': no cocktail name", row_number, table);
            return Ok(None);
        }
        let name = name_cell.to_string().trim().to_string();

        let invalid = |column: &str, reason: String| MenuError::InvalidRowError {
            table: table.to_string(),
            row: row_number,
            column: column.to_string(),
            reason,
        };

        let category_cell = cell(row, CATEGORY);
        if category_cell.is_blank() {
            return Err(invalid("category", format!("cocktail '{}' has no category", name)));
        }
        let category = category_cell.to_string().trim().to_string();

        let page_cell = cell(row, PAGE);
        let page = page_cell
            .as_integer()
            .and_then(|p| u32::try_from(p).ok())
            .ok_or_else(|| {
                invalid(
                    "page",
                    format!("expected a non-negative integer, found '{}'", page_cell),
                )
            })?;

        Ok(Some(Cocktail {
            name,
            category,
            preparation: cell(row, PREPARATION).to_string(),
            garnish: cell(row, GARNISH).to_string(),
            glassware: cell(row, GLASSWARE).to_string(),
            page,
            ice_type: cell(row, ICE_TYPE).display(),
            observation: cell(row, OBSERVATION).display(),
            ingredients: parse_ingredients(row),
        }))
    }
}

/// Reads `(name, quantity)` column pairs from the first ingredient column on,
/// stopping at the first pair whose name is blank. A short final pair yields
/// an empty quantity.
pub fn parse_ingredients(row: &[Cell]) -> Vec<CocktailIngredient> {
    let mut ingredients = Vec::new();
    let mut column = FIRST_INGREDIENT;

    while column < row.len() {
        let name_cell = &row[column];
        if name_cell.is_blank() {
            break;
        }

        ingredients.push(CocktailIngredient {
            name: name_cell.to_string().trim().to_string(),
            quantity: cell(row, column + 1).to_string(),
        });
        column += 2;
    }

    ingredients
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn header() -> Vec<Cell> {
        [
            "Preparo", "Gelo", "Guarnição", "Copo", "Página", "Categoria", "Obs", "Nome",
            "Ingrediente 1", "Qtd 1",
        ]
        .iter()
        .map(|h| text(h))
        .collect()
    }

    fn daiquiri_row() -> Vec<Cell> {
        vec![
            text("Shake well"),
            Cell::Empty,
            text("Lime wheel"),
            text("Rocks"),
            Cell::Int(5),
            text(" Classics "),
            Cell::Empty,
            text(" Daiquiri "),
            text("Rum "),
            text("60ml"),
            text("Lime"),
            text("30ml"),
        ]
    }

    #[test]
    fn test_load_parses_full_row() {
        let table = Table::new("Receitas", vec![header(), daiquiri_row()]);

        let cocktails = RecipeLoader::load(&table).unwrap();

        assert_eq!(cocktails.len(), 1);
        let daiquiri = &cocktails[0];
        assert_eq!(daiquiri.name, "Daiquiri");
        assert_eq!(daiquiri.category, "Classics");
        assert_eq!(daiquiri.preparation, "Shake well");
        assert_eq!(daiquiri.garnish, "Lime wheel");
        assert_eq!(daiquiri.glassware, "Rocks");
        assert_eq!(daiquiri.page, 5);
        assert_eq!(daiquiri.ice_type, None);
        assert_eq!(daiquiri.observation, None);
        assert_eq!(
            daiquiri.ingredients,
            vec![
                CocktailIngredient {
                    name: "Rum".into(),
                    quantity: "60ml".into()
                },
                CocktailIngredient {
                    name: "Lime".into(),
                    quantity: "30ml".into()
                },
            ]
        );
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let mut blank = daiquiri_row();
        blank[NAME] = Cell::Empty;
        let mut whitespace = daiquiri_row();
        whitespace[NAME] = text("   ");
        let table = Table::new(
            "Receitas",
            vec![header(), blank, daiquiri_row(), whitespace, vec![], daiquiri_row()],
        );

        let cocktails = RecipeLoader::load(&table).unwrap();

        assert_eq!(cocktails.len(), 2);
    }

    #[test]
    fn test_header_row_is_never_parsed() {
        let table = Table::new("Receitas", vec![daiquiri_row()]);
        assert!(RecipeLoader::load(&table).unwrap().is_empty());
    }

    #[test]
    fn test_ingredient_scan_stops_at_first_blank_name() {
        let mut row = daiquiri_row();
        row[10] = Cell::Empty;
        row.extend([text("Sugar"), text("1 tsp")]);

        let ingredients = parse_ingredients(&row);

        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Rum");
    }

    #[test]
    fn test_missing_quantity_becomes_empty_text() {
        let mut row = daiquiri_row();
        row.push(text("Sugar"));

        let ingredients = parse_ingredients(&row);

        assert_eq!(ingredients.len(), 3);
        assert_eq!(ingredients[2].name, "Sugar");
        assert_eq!(ingredients[2].quantity, "");
    }

    #[test]
    fn test_quantities_pass_through_unvalidated() {
        let mut row = daiquiri_row();
        row[9] = Cell::Float(-2.0);
        row[11] = Cell::Float(0.75);

        let ingredients = parse_ingredients(&row);

        assert_eq!(ingredients[0].quantity, "-2");
        assert_eq!(ingredients[1].quantity, "0.75");
    }

    #[test]
    fn test_ingredient_parsing_is_repeatable() {
        let row = daiquiri_row();
        assert_eq!(parse_ingredients(&row), parse_ingredients(&row));
    }

    #[test]
    fn test_cocktail_without_ingredients() {
        let row: Vec<Cell> = daiquiri_row().into_iter().take(FIRST_INGREDIENT).collect();

        let cocktail = RecipeLoader::parse_row("Receitas", 2, &row).unwrap().unwrap();

        assert!(cocktail.ingredients.is_empty());
    }

    #[test]
    fn test_optional_fields_keep_presence() {
        let mut row = daiquiri_row();
        row[ICE_TYPE] = text("Crushed");
        row[OBSERVATION] = text("");

        let cocktail = RecipeLoader::parse_row("Receitas", 2, &row).unwrap().unwrap();

        assert_eq!(cocktail.ice_type.as_deref(), Some("Crushed"));
        assert_eq!(cocktail.observation.as_deref(), Some(""));
    }

    #[test]
    fn test_page_accepts_float_and_text() {
        let mut row = daiquiri_row();
        row[PAGE] = Cell::Float(12.0);
        assert_eq!(RecipeLoader::parse_row("R", 2, &row).unwrap().unwrap().page, 12);

        row[PAGE] = text("1001");
        assert_eq!(RecipeLoader::parse_row("R", 2, &row).unwrap().unwrap().page, 1001);
    }

    #[test]
    fn test_invalid_page_is_reported_with_row_number() {
        let mut row = daiquiri_row();
        row[PAGE] = text("five");

        let err = RecipeLoader::parse_row("Receitas", 7, &row).unwrap_err();

        match err {
            MenuError::InvalidRowError { row, column, .. } => {
                assert_eq!(row, 7);
                assert_eq!(column, "page");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_category_is_an_error() {
        let mut row = daiquiri_row();
        row[CATEGORY] = Cell::Empty;

        assert!(matches!(
            RecipeLoader::parse_row("Receitas", 3, &row),
            Err(MenuError::InvalidRowError { .. })
        ));
    }
}

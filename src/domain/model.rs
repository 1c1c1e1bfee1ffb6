use std::collections::HashSet;
use std::fmt;

/// A primitive cell value as produced by the workbook reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// True for missing cells and text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form of the value, `None` for an empty cell.
    pub fn display(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => Some(other.to_string()),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) => whole_number(*f),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Integral floats that fit in an `i64`; the cast would saturate otherwise.
fn whole_number(v: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

    (v.fract() == 0.0 && v >= -BOUND && v < BOUND).then_some(v as i64)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => match whole_number(*v) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", v),
            },
            Cell::Bool(true) => f.write_str("TRUE"),
            Cell::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// One named sheet, header row included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Data rows paired with their 1-based spreadsheet row number.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| (i + 1, row.as_slice()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CocktailIngredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cocktail {
    pub name: String,
    pub category: String,
    pub preparation: String,
    pub garnish: String,
    pub glassware: String,
    pub page: u32,
    pub ice_type: Option<String>,
    pub observation: Option<String>,
    pub ingredients: Vec<CocktailIngredient>,
}

impl Cocktail {
    /// Index entry: page padded to at least three digits, then the name.
    pub fn index_line(&self) -> String {
        format!("{:03} {}", self.page, self.name)
    }
}

/// Names of the ingredients currently in stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    names: HashSet<String>,
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Availability {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of the extract stage.
#[derive(Debug, Clone, Default)]
pub struct MenuSource {
    pub cocktails: Vec<Cocktail>,
    pub availability: Availability,
}

/// A unit of rendered content. Every section starts on a fresh page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub text: String,
    /// CSS-like family list, e.g. `Inconsolata, monospace`.
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDocument {
    pub title: String,
    pub sections: Vec<Section>,
    /// Number of cocktails that made it into the menu.
    pub cocktail_count: usize,
}

impl MenuDocument {
    pub fn index(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn content_sections(&self) -> &[Section] {
        self.sections.get(1..).unwrap_or(&[])
    }
}

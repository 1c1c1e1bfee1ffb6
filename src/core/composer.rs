use crate::core::{Availability, Cocktail, MenuDocument, Section};
use crate::domain::settings::{FieldLabels, MenuSettings};
use std::collections::HashMap;
use std::fmt::Write;

/// Line-continuation marker: ends a line without ending the paragraph.
const LINE_BREAK: &str = "\\\n";

/// Cocktails of one category, in recipe order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub cocktails: Vec<&'a Cocktail>,
}

/// A cocktail is available when every ingredient is in stock. A recipe
/// without ingredients is always available.
pub fn is_available(cocktail: &Cocktail, availability: &Availability) -> bool {
    cocktail
        .ingredients
        .iter()
        .all(|ingredient| availability.contains(&ingredient.name))
}

pub fn filter_available<'a>(
    cocktails: &'a [Cocktail],
    availability: &Availability,
) -> Vec<&'a Cocktail> {
    cocktails
        .iter()
        .filter(|cocktail| {
            let available = is_available(cocktail, availability);
            if !available {
                tracing::debug!("Dropping '{}': missing ingredients", cocktail.name);
            }
            available
        })
        .collect()
}

/// Groups by category in first-seen order, keeping recipe order inside each
/// group.
pub fn group_by_category<'a>(cocktails: &[&'a Cocktail]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for &cocktail in cocktails {
        let position = *positions
            .entry(cocktail.category.as_str())
            .or_insert_with(|| {
                groups.push(CategoryGroup {
                    category: cocktail.category.as_str(),
                    cocktails: Vec::new(),
                });
                groups.len() - 1
            });
        groups[position].cocktails.push(cocktail);
    }

    groups
}

pub struct MenuComposer {
    settings: MenuSettings,
}

impl MenuComposer {
    pub fn new(settings: MenuSettings) -> Self {
        Self { settings }
    }

    pub fn compose(&self, cocktails: &[Cocktail], availability: &Availability) -> MenuDocument {
        let available = filter_available(cocktails, availability);
        let groups = group_by_category(&available);

        tracing::debug!(
            "{} of {} cocktails available across {} categories",
            available.len(),
            cocktails.len(),
            groups.len()
        );

        let mut sections = Vec::with_capacity(groups.len() + 1);
        sections.push(self.section(self.index_text(&groups)));
        for group in &groups {
            sections.push(self.section(self.category_text(group)));
        }

        MenuDocument {
            title: self.settings.title.clone(),
            sections,
            cocktail_count: available.len(),
        }
    }

    fn section(&self, text: String) -> Section {
        Section {
            text,
            font_family: self.settings.font_family.clone(),
        }
    }

    pub fn index_text(&self, groups: &[CategoryGroup<'_>]) -> String {
        let mut text = format!("# {}\n", self.settings.title);

        for group in groups {
            let _ = writeln!(text, "## {}", group.category);
            for cocktail in &group.cocktails {
                let _ = writeln!(text, "- {}", cocktail.index_line());
            }
        }

        text
    }

    pub fn category_text(&self, group: &CategoryGroup<'_>) -> String {
        let mut text = format!("## {}\n", group.category);

        for cocktail in &group.cocktails {
            let _ = writeln!(text, "### {}", cocktail.name);
            for ingredient in &cocktail.ingredients {
                let _ = writeln!(text, "- {}: {}", ingredient.name, ingredient.quantity);
            }
            text.push('\n');
            text.push_str(&field_block(cocktail, &self.settings.labels));
        }

        text
    }
}

/// Labeled fields in fixed order; ice type and observation only when present.
fn field_block(cocktail: &Cocktail, labels: &FieldLabels) -> String {
    let page = cocktail.page.to_string();
    let mut fields: Vec<(&str, &str)> = vec![
        (labels.preparation.as_str(), cocktail.preparation.as_str()),
        (labels.garnish.as_str(), cocktail.garnish.as_str()),
        (labels.glassware.as_str(), cocktail.glassware.as_str()),
        (labels.page.as_str(), page.as_str()),
    ];
    if let Some(ice_type) = &cocktail.ice_type {
        fields.push((labels.ice_type.as_str(), ice_type.as_str()));
    }
    if let Some(observation) = &cocktail.observation {
        fields.push((labels.observation.as_str(), observation.as_str()));
    }

    let lines: Vec<String> = fields
        .iter()
        .map(|(label, value)| format!("**{}:** {}", label, value))
        .collect();
    let mut block = lines.join(LINE_BREAK);
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CocktailIngredient;

    fn cocktail(name: &str, category: &str, page: u32, ingredients: &[&str]) -> Cocktail {
        Cocktail {
            name: name.to_string(),
            category: category.to_string(),
            preparation: "Shake".to_string(),
            garnish: "Lime wheel".to_string(),
            glassware: "Rocks".to_string(),
            page,
            ice_type: None,
            observation: None,
            ingredients: ingredients
                .iter()
                .map(|i| CocktailIngredient {
                    name: i.to_string(),
                    quantity: "1 oz".to_string(),
                })
                .collect(),
        }
    }

    fn names(cocktails: &[&Cocktail]) -> Vec<String> {
        cocktails.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_filter_requires_every_ingredient() {
        let cocktails = vec![
            cocktail("Daiquiri", "Classics", 5, &["Rum", "Lime"]),
            cocktail("Martini", "Classics", 12, &["Gin", "Vermouth"]),
            cocktail("Water", "Other", 1, &[]),
        ];
        let availability: Availability = ["Rum", "Lime", "Gin"].into_iter().collect();

        let available = filter_available(&cocktails, &availability);

        assert_eq!(names(&available), vec!["Daiquiri", "Water"]);
    }

    #[test]
    fn test_removing_one_ingredient_removes_only_dependent_cocktails() {
        let cocktails = vec![
            cocktail("Daiquiri", "Classics", 5, &["Rum", "Lime"]),
            cocktail("Gimlet", "Classics", 8, &["Gin", "Lime"]),
            cocktail("Rum Old Fashioned", "Stirred", 9, &["Rum", "Sugar"]),
        ];
        let mut availability: Availability =
            ["Rum", "Lime", "Gin", "Sugar"].into_iter().collect();
        assert_eq!(filter_available(&cocktails, &availability).len(), 3);

        availability.remove("Gin");

        assert_eq!(
            names(&filter_available(&cocktails, &availability)),
            vec!["Daiquiri", "Rum Old Fashioned"]
        );
    }

    #[test]
    fn test_filter_is_exact_and_case_sensitive() {
        let cocktails = vec![cocktail("Daiquiri", "Classics", 5, &["Rum"])];
        let availability: Availability = ["rum", "Rum "].into_iter().collect();

        assert!(filter_available(&cocktails, &availability).is_empty());
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let cocktails = vec![
            cocktail("Mojito", "Highballs", 3, &[]),
            cocktail("Daiquiri", "Classics", 5, &[]),
            cocktail("Paloma", "Highballs", 1, &[]),
            cocktail("Martini", "Classics", 2, &[]),
            cocktail("Zombie", "Tiki", 4, &[]),
        ];
        let refs: Vec<&Cocktail> = cocktails.iter().collect();

        let groups = group_by_category(&refs);

        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Highballs", "Classics", "Tiki"]);
        assert_eq!(names(&groups[0].cocktails), vec!["Mojito", "Paloma"]);
        assert_eq!(names(&groups[1].cocktails), vec!["Daiquiri", "Martini"]);
        assert_eq!(names(&groups[2].cocktails), vec!["Zombie"]);
    }

    #[test]
    fn test_index_text_layout() {
        let cocktails = vec![
            cocktail("Daiquiri", "Classics", 5, &[]),
            cocktail("Mojito", "Highballs", 42, &[]),
            cocktail("Zombie", "Highballs", 1001, &[]),
        ];
        let composer = MenuComposer::new(MenuSettings::default());

        let document = composer.compose(&cocktails, &Availability::new());

        assert_eq!(
            document.index().unwrap().text,
            "# Cocktail Menu\n\
             ## Classics\n\
             - 005 Daiquiri\n\
             ## Highballs\n\
             - 042 Mojito\n\
             - 1001 Zombie\n"
        );
    }

    #[test]
    fn test_category_text_without_optional_fields() {
        let cocktails = vec![cocktail("Daiquiri", "Classics", 5, &["Rum", "Lime"])];
        let availability: Availability = ["Rum", "Lime"].into_iter().collect();
        let composer = MenuComposer::new(MenuSettings::default());

        let document = composer.compose(&cocktails, &availability);

        assert_eq!(document.content_sections().len(), 1);
        assert_eq!(
            document.content_sections()[0].text,
            "## Classics\n\
             ### Daiquiri\n\
             - Rum: 1 oz\n\
             - Lime: 1 oz\n\
             \n\
             **Preparation:** Shake\\\n\
             **Garnish:** Lime wheel\\\n\
             **Glassware:** Rocks\\\n\
             **Page:** 5\n"
        );
    }

    #[test]
    fn test_field_block_with_optional_fields() {
        let labels = FieldLabels::default();
        let mut drink = cocktail("Martini", "Classics", 12, &[]);

        drink.ice_type = Some("Cubes".to_string());
        assert!(field_block(&drink, &labels)
            .ends_with("**Page:** 12\\\n**Ice Type:** Cubes\n"));

        drink.observation = Some("Stir, don't shake".to_string());
        assert!(field_block(&drink, &labels).ends_with(
            "**Page:** 12\\\n**Ice Type:** Cubes\\\n**Observation:** Stir, don't shake\n"
        ));

        drink.ice_type = None;
        assert!(field_block(&drink, &labels)
            .ends_with("**Page:** 12\\\n**Observation:** Stir, don't shake\n"));
    }

    #[test]
    fn test_custom_labels_and_title() {
        let settings = MenuSettings {
            title: "Carta de Coquetéis".to_string(),
            font_family: "Courier".to_string(),
            labels: FieldLabels {
                preparation: "Preparo".to_string(),
                garnish: "Guarnição".to_string(),
                glassware: "Copo".to_string(),
                page: "Página".to_string(),
                ice_type: "Tipo de gelo".to_string(),
                observation: "Observação".to_string(),
            },
        };
        let cocktails = vec![cocktail("Daiquiri", "Clássicos", 5, &[])];

        let document = MenuComposer::new(settings).compose(&cocktails, &Availability::new());

        assert!(document.index().unwrap().text.starts_with("# Carta de Coquetéis\n"));
        assert!(document.content_sections()[0].text.contains("**Preparo:** Shake"));
        assert!(document
            .sections
            .iter()
            .all(|section| section.font_family == "Courier"));
    }

    #[test]
    fn test_empty_menu_keeps_index_only() {
        let cocktails = vec![cocktail("Martini", "Classics", 12, &["Gin"])];
        let composer = MenuComposer::new(MenuSettings::default());

        let document = composer.compose(&cocktails, &Availability::new());

        assert_eq!(document.cocktail_count, 0);
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.index().unwrap().text, "# Cocktail Menu\n");
        assert!(document.content_sections().is_empty());
    }
}

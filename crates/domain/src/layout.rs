use pagewright_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Named region of a page layout that hosts widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutArea {
    /// Repository-assigned identity.
    #[serde(default)]
    pub id: EntityId,
    /// Area name as referenced by layout templates.
    pub name: String,
}

impl Entity for LayoutArea {
    const KIND: &'static str = "layout area";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// Content block placed in a layout area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Repository-assigned identity.
    #[serde(default)]
    pub id: EntityId,
    /// Optional editor-facing name.
    #[serde(default)]
    pub name: Option<String>,
    /// Widget type name, e.g. `TextWidget`.
    pub widget_type: String,
    /// Page the widget belongs to.
    pub webpage_id: EntityId,
    /// Area the widget is rendered in.
    pub layout_area_id: EntityId,
    /// Position within the area.
    #[serde(default)]
    pub display_order: i32,
}

impl Widget {
    /// Returns the widget type split into words, e.g. `Text Widget`.
    #[must_use]
    pub fn formatted_type(&self) -> String {
        let characters: Vec<char> = self.widget_type.chars().collect();
        let mut formatted = String::with_capacity(characters.len() + 4);

        for (index, character) in characters.iter().enumerate() {
            if index > 0 && character.is_uppercase() {
                let previous = characters[index - 1];
                let next_is_lower = characters
                    .get(index + 1)
                    .is_some_and(|next| next.is_lowercase());
                if previous.is_lowercase()
                    || previous.is_ascii_digit()
                    || (previous.is_uppercase() && next_is_lower)
                {
                    formatted.push(' ');
                }
            }
            formatted.push(*character);
        }

        formatted
    }

    /// Returns the editor-facing label: `"name (type)"`, or just the type
    /// when the widget has no name. A non-blank name is shown as stored.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => format!("{name} ({})", self.formatted_type()),
            _ => self.formatted_type(),
        }
    }
}

impl Entity for Widget {
    const KIND: &'static str = "widget";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

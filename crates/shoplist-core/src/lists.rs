//! In-memory shopping lists. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_preference: Option<String>,
}

/// Item fields as entered by the user, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListItem {
    pub name: String,
    pub quantity: u32,
    pub store_preference: Option<String>,
}

impl NewListItem {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            store_preference: None,
        }
    }

    #[must_use]
    pub fn at_store(mut self, store: impl Into<String>) -> Self {
        self.store_preference = Some(store.into());
        self
    }

    fn into_item(self) -> Result<ListItem, CoreError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::InvalidArgument {
                name: "name",
                reason: "item name must be non-empty".to_string(),
            });
        }
        if self.quantity == 0 {
            return Err(CoreError::InvalidArgument {
                name: "quantity",
                reason: format!("item '{name}' must have a quantity of at least 1"),
            });
        }
        // An empty store selection means "no preference".
        let store_preference = self
            .store_preference
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(ListItem {
            id: Uuid::new_v4(),
            name,
            quantity: self.quantity,
            store_preference,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: Uuid,
    pub title: String,
    pub items: Vec<ListItem>,
}

impl ShoppingList {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] for an empty name or zero quantity.
    pub fn add_item(&mut self, item: NewListItem) -> Result<Uuid, CoreError> {
        let item = item.into_item()?;
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Returns `true` if an item was removed.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }
}

/// The user's lists for the current session, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ShoppingListBook {
    lists: Vec<ShoppingList>,
}

impl ShoppingListBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] for an empty title or any
    /// invalid item. Nothing is stored on error.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        items: Vec<NewListItem>,
    ) -> Result<Uuid, CoreError> {
        let list = ShoppingList {
            id: Uuid::new_v4(),
            title: validate_title(title.into())?,
            items: build_items(items)?,
        };
        let id = list.id;
        self.lists.push(list);
        Ok(id)
    }

    /// Replace the title and items of an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ListNotFound`] for an unknown id, or
    /// [`CoreError::InvalidArgument`] for invalid input.
    pub fn edit(
        &mut self,
        id: Uuid,
        title: impl Into<String>,
        items: Vec<NewListItem>,
    ) -> Result<(), CoreError> {
        let title = validate_title(title.into())?;
        let items = build_items(items)?;
        let list = self.get_mut(id).ok_or(CoreError::ListNotFound(id))?;
        list.title = title;
        list.items = items;
        Ok(())
    }

    /// Returns `true` if a list was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.lists.len();
        self.lists.retain(|list| list.id != id);
        self.lists.len() != before
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&ShoppingList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ShoppingList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShoppingList> {
        self.lists.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Unique item names across every list, compared ignoring case.
    /// The first spelling seen wins; order follows the lists.
    #[must_use]
    pub fn wanted_item_names(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.lists
            .iter()
            .flat_map(|list| list.items.iter())
            .filter(|item| seen.insert(item.name.to_lowercase()))
            .map(|item| item.name.clone())
            .collect()
    }
}

fn validate_title(title: String) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidArgument {
            name: "title",
            reason: "list title must be non-empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn build_items(items: Vec<NewListItem>) -> Result<Vec<ListItem>, CoreError> {
    items.into_iter().map(NewListItem::into_item).collect()
}

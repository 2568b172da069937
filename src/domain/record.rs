//! Record domain model
//!
//! This module defines the catalog entry type together with the two shapes
//! callers use to create and modify it.

use super::ids::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix marking an image payload embedded directly in `image_url`
pub const DATA_URL_PREFIX: &str = "data:";

/// A stored catalog entry
///
/// `id`, `created_at` and `updated_at` are owned by the store. Callers never
/// construct a `Record` with their own identity; they hand a [`NewRecord`] to
/// the store and get the id back.
///
/// # Examples
///
/// ```
/// use coupe::domain::record::{NewRecord, Record};
/// use coupe::domain::ids::RecordId;
/// use chrono::Utc;
///
/// let new = NewRecord::builder()
///     .name("Daiquiri")
///     .ingredients("white rum, lime, sugar")
///     .image_url("https://example.com/daiquiri.jpg")
///     .build()
///     .unwrap();
///
/// let record = Record::from_new(RecordId::new(1), new, Utc::now());
/// assert_eq!(record.created_at, record.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned identity
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Free-text ingredient list
    pub ingredients: String,

    /// Embedded `data:` URL or external image locator
    pub image_url: String,

    /// Original file name, informational only
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_name: String,

    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Builds a stored record from caller-supplied fields
    pub fn from_new(id: RecordId, new: NewRecord, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            ingredients: new.ingredients,
            image_url: new.image_url,
            file_name: new.file_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch into this record
    ///
    /// Provided fields overwrite, omitted fields are retained. `updated_at`
    /// is always refreshed and never falls behind `created_at`.
    pub fn apply(&mut self, patch: RecordPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(file_name) = patch.file_name {
            self.file_name = file_name;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive substring match against name or ingredients
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.ingredients.to_lowercase().contains(needle)
    }

    /// Converts back into the caller-facing shape, dropping store fields
    pub fn into_new(self) -> NewRecord {
        NewRecord {
            name: self.name,
            ingredients: self.ingredients,
            image_url: self.image_url,
            file_name: self.file_name,
        }
    }
}

/// Caller-supplied fields for a record that does not exist yet
///
/// Deliberately has no identity or timestamp fields, so imported data cannot
/// smuggle them into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Display name
    pub name: String,

    /// Free-text ingredient list
    pub ingredients: String,

    /// Embedded `data:` URL or external image locator
    pub image_url: String,

    /// Original file name, `null` reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_name: String,
}

impl NewRecord {
    /// Creates a new builder for constructing a NewRecord
    pub fn builder() -> NewRecordBuilder {
        NewRecordBuilder::default()
    }

    /// Checks the required fields
    ///
    /// # Errors
    ///
    /// Returns a message naming the first blank required field
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("ingredients", &self.ingredients)?;
        require_text("imageUrl", &self.image_url)?;
        Ok(())
    }
}

/// Builder for constructing NewRecord instances
#[derive(Debug, Default)]
pub struct NewRecordBuilder {
    name: Option<String>,
    ingredients: Option<String>,
    image_url: Option<String>,
    file_name: Option<String>,
}

impl NewRecordBuilder {
    /// Sets the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the ingredients
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Sets the image reference
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the file name
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Builds the NewRecord
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or blank
    pub fn build(self) -> Result<NewRecord, String> {
        let record = NewRecord {
            name: self.name.ok_or("name is required")?,
            ingredients: self.ingredients.ok_or("ingredients is required")?,
            image_url: self.image_url.ok_or("imageUrl is required")?,
            file_name: self.file_name.unwrap_or_default(),
        };
        record.validate()?;
        Ok(record)
    }
}

/// Partial update for an existing record
///
/// Every field is optional; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl RecordPatch {
    /// Creates an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overwrites the ingredients
    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Overwrites the image reference
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Overwrites the file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// True when the patch changes no field
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.ingredients.is_none()
            && self.image_url.is_none()
            && self.file_name.is_none()
    }

    /// Rejects provided fields that would break record invariants
    ///
    /// # Errors
    ///
    /// Returns a message naming the first blank field
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(ingredients) = &self.ingredients {
            require_text("ingredients", ingredients)?;
        }
        if let Some(image_url) = &self.image_url {
            require_text("imageUrl", image_url)?;
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

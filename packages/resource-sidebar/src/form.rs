//! Form state: the draft under edit and the resource it targets.

use resource_types::{Draft, DraftError, Field, Resource};

/// Holds the draft and switches between add and edit modes.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: Draft,
    target: Option<Resource>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `target` (edit mode) or reset to empty defaults (add mode).
    pub fn reinitialize(&mut self, target: Option<Resource>) {
        self.draft = target.as_ref().map(Draft::from_resource).unwrap_or_default();
        self.target = target;
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Resource being edited, if any.
    pub fn target(&self) -> Option<&Resource> {
        self.target.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.target.is_some()
    }

    /// Stored id of the edit target.
    pub fn target_id(&self) -> Option<&str> {
        self.target
            .as_ref()
            .and_then(|r| r.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Replace one field. On error the draft is left as it was.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        self.draft = self.draft.with_field(field, value)?;
        Ok(())
    }

    /// [`set_field`](Self::set_field) addressed by input name.
    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        self.set_field(name.parse()?, value)
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.draft = self.draft.with_image_url(url);
    }
}

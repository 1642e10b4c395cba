//! Framework-neutral description of what the sidebar renders.

use crate::dropdown::CurrencyDropdown;
use crate::form::FormState;
use resource_types::{CurrencyUnit, Field, TradeType};

/// Name of the file input. Not a [`Field`]: the image is set by upload only.
pub const IMAGE_INPUT: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    File,
    Text,
    TextArea,
    Number,
    Select(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub value: String,
    pub required: bool,
}

/// Wei/Eth picker rendered beside the price input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPickerView {
    pub selected: CurrencyUnit,
    pub open: bool,
    pub options: [CurrencyUnit; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    /// Panel slid in and backdrop shown.
    pub open: bool,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub show_delete: bool,
    pub fields: Vec<FieldView>,
    /// Present only for monetary trades.
    pub currency: Option<CurrencyPickerView>,
}

impl SidebarView {
    pub fn build(open: bool, form: &FormState, currency: &CurrencyDropdown) -> Self {
        let edit = form.is_edit_mode();
        let draft = form.draft();
        let input = |field: Field, label: &'static str, kind: InputKind, required: bool| FieldView {
            name: field.name(),
            label,
            kind,
            value: draft.value_of(field),
            required,
        };

        let mut fields = vec![
            FieldView {
                name: IMAGE_INPUT,
                label: "Upload Image:",
                kind: InputKind::File,
                value: draft.image_url.clone(),
                required: false,
            },
            input(Field::Title, "Title:", InputKind::Text, true),
            input(
                Field::Description,
                "Description (optional):",
                InputKind::TextArea,
                false,
            ),
            input(
                Field::TradeType,
                "Trade Type:",
                InputKind::Select(TradeType::ALL.iter().map(|t| t.as_str()).collect()),
                false,
            ),
        ];

        let picker = match draft.trade_type {
            TradeType::Monetary => {
                fields.push(input(Field::Price, "Price:", InputKind::Number, true));
                Some(CurrencyPickerView {
                    selected: currency.selected(),
                    open: currency.is_open(),
                    options: CurrencyUnit::ALL,
                })
            }
            TradeType::Barter => {
                fields.push(input(
                    Field::InReturn,
                    "What do you want in return?",
                    InputKind::Text,
                    true,
                ));
                None
            }
        };
        fields.push(input(Field::Quantity, "Quantity:", InputKind::Number, true));

        Self {
            open,
            heading: if edit { "Edit Resource" } else { "Add Resource" },
            submit_label: if edit { "Update Resource" } else { "Add Resource" },
            show_delete: edit,
            fields,
            currency: picker,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

//! Column model types
//!
//! A [`Column`] is one configurable field of the displayed table. Built-in
//! columns carry only identity and display flags; user-defined columns also
//! carry a typed [`ColumnKind`] payload.

use crate::formula::FormulaConfig;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Currency of a money-valued column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
    /// Unrecognized code, preserved verbatim so a stored snapshot
    /// round-trips without loss
    Other(String),
}

impl Currency {
    /// Display symbol, falling back to the raw code when unrecognized
    pub fn symbol(&self) -> &str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Other(code) => code,
        }
    }

    /// Canonical code string
    pub fn code(&self) -> &str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Other(code) => code,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Rub
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        match code.as_str() {
            "RUB" => Currency::Rub,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            _ => Currency::Other(code),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// Typed payload of a user-defined column
///
/// Each variant carries exactly the fields relevant to it; built-in columns
/// have no kind and are implicitly typed by their rendering logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text
    Text,
    /// Money amount displayed with a currency symbol
    Money { currency: Currency },
    /// Calendar date
    Date,
    /// Selection from a fixed set of options
    List {
        options: Vec<String>,
        #[serde(default)]
        multi_select: bool,
    },
    /// Plain number with a fixed number of fractional digits
    Numeric { precision: u8 },
    /// Value computed from other columns via an arithmetic chain
    Formula {
        config: FormulaConfig,
        precision: u8,
        /// Present only when the config's output type is Currency
        #[serde(default, skip_serializing_if = "Option::is_none")]
        currency: Option<Currency>,
    },
}

impl ColumnKind {
    /// The formula configuration, when this is a Formula column
    pub fn formula(&self) -> Option<&FormulaConfig> {
        match self {
            ColumnKind::Formula { config, .. } => Some(config),
            _ => None,
        }
    }
}

/// One configurable field of the displayed table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique within the union of all three collections, stable for the
    /// column's lifetime
    pub id: String,
    /// Display string shown in the table header
    pub label: String,
    /// Shown in the table when true; toggled independently of ordering
    pub visible: bool,
    /// Marked as a favorite, independent of visibility and collection
    #[serde(default)]
    pub favorite: bool,
    /// True only for user-defined columns
    #[serde(default)]
    pub custom: bool,
    /// Typed payload; `None` for built-ins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ColumnKind>,
}

impl Column {
    /// Create a built-in column
    pub fn builtin(id: impl Into<String>, label: impl Into<String>, visible: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible,
            favorite: false,
            custom: false,
            kind: None,
        }
    }

    /// Create a user-defined column, visible by default
    pub fn new_custom(id: String, label: String, kind: ColumnKind) -> Self {
        Self {
            id,
            label,
            visible: true,
            favorite: false,
            custom: true,
            kind: Some(kind),
        }
    }

    /// The formula configuration, when this is a Formula column
    pub fn formula(&self) -> Option<&FormulaConfig> {
        self.kind.as_ref().and_then(ColumnKind::formula)
    }

    /// Generate an id for a new custom column that collides with none of
    /// `existing_ids`
    ///
    /// Ids are derived from the creation timestamp (`custom_{millis}`); a
    /// bump loop resolves collisions from same-millisecond creations.
    pub fn generate_custom_id<'a>(existing_ids: impl Iterator<Item = &'a str>) -> String {
        let taken: Vec<&str> = existing_ids.collect();
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        loop {
            let candidate = format!("custom_{millis}");
            if !taken.iter().any(|id| *id == candidate) {
                return candidate;
            }
            millis += 1;
        }
    }
}

/// Identifies which of the three stored column sequences an operation targets
///
/// The serde names double as the persistence keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKey {
    #[serde(rename = "main-columns")]
    Primary,
    #[serde(rename = "additional-columns")]
    Secondary,
    #[serde(rename = "custom-columns")]
    Custom,
}

impl CollectionKey {
    /// Persistence key for this collection
    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKey::Primary => "main-columns",
            CollectionKey::Secondary => "additional-columns",
            CollectionKey::Custom => "custom-columns",
        }
    }
}

//! Enum definitions and the lookups the enum codec is built on.
//!
//! An enum is described explicitly, as an ordered list of `key => value`
//! variants. Values are numbers or strings and may repeat. The position of a
//! variant in the list is its default discriminator.
//!
//! ```rust
//! use codec_kit::{EnumDefinition, EnumStats};
//!
//! // Zero = 0, One = 1, Five = 5, Six = 6, Seven = "nana"
//! let hybrid = EnumDefinition::new()
//!     .implicit("Zero")
//!     .implicit("One")
//!     .explicit("Five", 5)
//!     .implicit("Six")
//!     .explicit("Seven", "nana");
//!
//! let stats = EnumStats::new(&hybrid);
//! assert_eq!(stats.numerical_values, [0, 1, 5, 6]);
//! assert_eq!(stats.string_values, ["Zero", "One", "Five", "Six", "Seven", "nana"]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of an enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Number(i64),
    Lexical(String),
}

impl EnumValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            EnumValue::Number(n) => Some(*n),
            EnumValue::Lexical(_) => None,
        }
    }

    pub fn as_lexical(&self) -> Option<&str> {
        match self {
            EnumValue::Number(_) => None,
            EnumValue::Lexical(s) => Some(s),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Number(n) => write!(f, "{}", n),
            EnumValue::Lexical(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EnumValue {
    fn from(value: i64) -> Self {
        EnumValue::Number(value)
    }
}

impl From<i32> for EnumValue {
    fn from(value: i32) -> Self {
        EnumValue::Number(value.into())
    }
}

impl From<u32> for EnumValue {
    fn from(value: u32) -> Self {
        EnumValue::Number(value.into())
    }
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        EnumValue::Lexical(value.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(value: String) -> Self {
        EnumValue::Lexical(value)
    }
}

/// One `key => value` entry of an enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub key: String,
    pub value: EnumValue,
}

impl EnumVariant {
    pub fn new(key: impl Into<String>, value: impl Into<EnumValue>) -> Self {
        EnumVariant {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of enum variants.
///
/// Serializes as a plain list of `{"key": ..., "value": ...}` objects, so a
/// definition can be loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumDefinition {
    variants: Vec<EnumVariant>,
}

impl EnumDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variants(variants: Vec<EnumVariant>) -> Self {
        EnumDefinition { variants }
    }

    /// Append `key` with the next number: one more than the last numeric
    /// value declared so far, or 0.
    pub fn implicit(mut self, key: impl Into<String>) -> Self {
        let next = self
            .variants
            .iter()
            .rev()
            .find_map(|variant| variant.value.as_number())
            .map_or(0, |last| last + 1);
        self.variants.push(EnumVariant::new(key, next));
        self
    }

    /// Append `key` with an explicit value.
    pub fn explicit(mut self, key: impl Into<String>, value: impl Into<EnumValue>) -> Self {
        self.variants.push(EnumVariant::new(key, value));
        self
    }

    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl FromIterator<EnumVariant> for EnumDefinition {
    fn from_iter<I: IntoIterator<Item = EnumVariant>>(iter: I) -> Self {
        EnumDefinition {
            variants: iter.into_iter().collect(),
        }
    }
}

/// Lookup tables derived from an [`EnumDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumStats {
    /// Keys in declaration order.
    pub enum_keys: Vec<String>,
    /// Values in declaration order, duplicates included.
    pub enum_values: Vec<EnumValue>,
    /// Distinct numeric values, ascending.
    pub numerical_values: Vec<i64>,
    /// Keys, then lexical values, without duplicates.
    pub string_values: Vec<String>,
}

impl EnumStats {
    pub fn new(definition: &EnumDefinition) -> Self {
        let enum_keys: Vec<String> = definition.variants.iter().map(|v| v.key.clone()).collect();
        let enum_values: Vec<EnumValue> = definition.variants.iter().map(|v| v.value.clone()).collect();

        let mut numerical_values: Vec<i64> = enum_values.iter().filter_map(EnumValue::as_number).collect();
        numerical_values.sort_unstable();
        numerical_values.dedup();

        let mut string_values: Vec<String> = Vec::new();
        let lexical = enum_values.iter().filter_map(EnumValue::as_lexical);
        for candidate in enum_keys.iter().map(String::as_str).chain(lexical) {
            if !string_values.iter().any(|existing| existing == candidate) {
                string_values.push(candidate.to_string());
            }
        }

        EnumStats {
            enum_keys,
            enum_values,
            numerical_values,
            string_values,
        }
    }

    pub fn len(&self) -> usize {
        self.enum_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enum_values.is_empty()
    }

    /// Lexical values, in declaration order.
    pub fn lexical_values(&self) -> Vec<String> {
        self.enum_values
            .iter()
            .filter_map(EnumValue::as_lexical)
            .map(str::to_string)
            .collect()
    }
}

pub fn get_enum_stats(definition: &EnumDefinition) -> EnumStats {
    EnumStats::new(definition)
}

/// Position of the variant matching `variant`.
///
/// Values are searched first, the last one winning on duplicates. Lexical
/// candidates then fall back to the first matching key.
pub fn get_enum_index_from_variant(stats: &EnumStats, variant: &EnumValue) -> Option<usize> {
    if let Some(index) = stats.enum_values.iter().rposition(|value| value == variant) {
        return Some(index);
    }
    let key = variant.as_lexical()?;
    stats.enum_keys.iter().position(|candidate| candidate == key)
}

/// Position of the variant a decoded discriminator refers to.
///
/// By default the discriminator is the position itself. With
/// `use_values_as_discriminators` it must equal a numeric value, the last
/// variant winning on duplicates.
pub fn get_enum_index_from_discriminator(
    stats: &EnumStats,
    discriminator: i64,
    use_values_as_discriminators: bool,
) -> Option<usize> {
    if use_values_as_discriminators {
        return stats
            .enum_values
            .iter()
            .rposition(|value| value.as_number() == Some(discriminator));
    }
    usize::try_from(discriminator)
        .ok()
        .filter(|&index| index < stats.len())
}

/// Render sorted integers with consecutive runs collapsed, e.g.
/// `1-3, 5, 12-15`.
pub fn format_numerical_values(values: &[i64]) -> String {
    let mut ranges: Vec<(i64, i64)> = Vec::new();
    for &value in values {
        match ranges.last_mut() {
            Some((_, end)) if end.checked_add(1) == Some(value) => *end = value,
            _ => ranges.push((value, value)),
        }
    }
    ranges
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

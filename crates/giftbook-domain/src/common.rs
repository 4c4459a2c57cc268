//! Shared traits and the known/unrecognized wrapper for taxonomy values.

use std::fmt;
use std::hash::Hash;

use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

/// Chooses which label set a taxonomy value is rendered with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelStyle {
    #[default]
    English,
    Korean,
}

/// A closed, ordered enumeration such as the event categories.
///
/// `ALL` is the declared order and doubles as the bucket emission order of the
/// statistics views, so implementors must list members explicitly.
pub trait Taxonomy: Copy + Eq + Hash + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Canonical key used in serialized documents.
    fn key(self) -> &'static str;

    /// Label used by the Korean-language record books this model descends from.
    fn local_label(self) -> &'static str;

    fn label(self, style: LabelStyle) -> &'static str {
        match style {
            LabelStyle::English => self.key(),
            LabelStyle::Korean => self.local_label(),
        }
    }

    /// Matches the canonical key (ASCII case-insensitive) or the local label.
    fn from_key(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.iter().copied().find(|member| {
            member.key().eq_ignore_ascii_case(trimmed) || member.local_label() == trimmed
        })
    }

    /// Position of the member in `ALL`.
    fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|member| *member == self)
            .unwrap_or(Self::ALL.len())
    }
}

/// A taxonomy value as it was stored.
///
/// Entry forms only produce `Known` values; `Unrecognized` keeps labels from
/// decoded documents that match no member, so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classified<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Taxonomy> Classified<T> {
    pub fn from_raw(raw: &str) -> Self {
        match T::from_key(raw) {
            Some(member) => Classified::Known(member),
            None => Classified::Unrecognized(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Classified::Known(member) => Some(*member),
            Classified::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Classified::Known(_))
    }

    /// Raw stored label: the canonical key for known members.
    pub fn as_str(&self) -> &str {
        match self {
            Classified::Known(member) => member.key(),
            Classified::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self, style: LabelStyle) -> &str {
        match self {
            Classified::Known(member) => member.label(style),
            Classified::Unrecognized(raw) => raw,
        }
    }
}

impl<T> From<T> for Classified<T> {
    fn from(member: T) -> Self {
        Classified::Known(member)
    }
}

impl<T: Taxonomy> fmt::Display for Classified<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Taxonomy> Serialize for Classified<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: Taxonomy> Deserialize<'de> for Classified<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Classified::from_raw(&raw))
    }
}

//! Closed taxonomies: event categories, relations to the counterparty, and
//! the income/expense direction of a record.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::common::{LabelStyle, Taxonomy};

/// Life event a gift was given or received for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Wedding,
    Condolence,
    FirstBirthday,
    SeventiethBirthday,
    Opening,
    Other,
}

impl Taxonomy for Category {
    const ALL: &'static [Self] = &[
        Category::Wedding,
        Category::Condolence,
        Category::FirstBirthday,
        Category::SeventiethBirthday,
        Category::Opening,
        Category::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            Category::Wedding => "Wedding",
            Category::Condolence => "Condolence",
            Category::FirstBirthday => "FirstBirthday",
            Category::SeventiethBirthday => "SeventiethBirthday",
            Category::Opening => "Opening",
            Category::Other => "Other",
        }
    }

    fn local_label(self) -> &'static str {
        match self {
            Category::Wedding => "결혼",
            Category::Condolence => "조의",
            Category::FirstBirthday => "돌",
            Category::SeventiethBirthday => "칠순",
            Category::Opening => "개업",
            Category::Other => "기타",
        }
    }
}

/// How the user knows the counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Congregation,
    Relative,
    BusinessContact,
    Presbytery,
    Friend,
    Neighbor,
    Workplace,
    Other,
}

impl Taxonomy for Relation {
    const ALL: &'static [Self] = &[
        Relation::Congregation,
        Relation::Relative,
        Relation::BusinessContact,
        Relation::Presbytery,
        Relation::Friend,
        Relation::Neighbor,
        Relation::Workplace,
        Relation::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            Relation::Congregation => "Congregation",
            Relation::Relative => "Relative",
            Relation::BusinessContact => "BusinessContact",
            Relation::Presbytery => "Presbytery",
            Relation::Friend => "Friend",
            Relation::Neighbor => "Neighbor",
            Relation::Workplace => "Workplace",
            Relation::Other => "Other",
        }
    }

    fn local_label(self) -> &'static str {
        match self {
            Relation::Congregation => "교우",
            Relation::Relative => "친척",
            Relation::BusinessContact => "거래처",
            Relation::Presbytery => "노회",
            Relation::Friend => "친구",
            Relation::Neighbor => "이웃",
            Relation::Workplace => "직장",
            Relation::Other => "기타",
        }
    }
}

/// Direction of the money: given away or received.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    #[default]
    #[serde(alias = "expense", alias = "지출")]
    Expense,
    #[serde(alias = "income", alias = "수입")]
    Income,
}

impl RecordKind {
    pub fn label(self, style: LabelStyle) -> &'static str {
        match (self, style) {
            (RecordKind::Expense, LabelStyle::English) => "Expense",
            (RecordKind::Income, LabelStyle::English) => "Income",
            (RecordKind::Expense, LabelStyle::Korean) => "지출",
            (RecordKind::Income, LabelStyle::Korean) => "수입",
        }
    }

    /// Sign applied to the amount in net calculations.
    pub fn sign(self) -> i64 {
        match self {
            RecordKind::Expense => -1,
            RecordKind::Income => 1,
        }
    }
}

/// Returned when a label matches no member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub taxonomy: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.taxonomy, self.value)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::from_key(value).ok_or_else(|| UnknownLabel {
            taxonomy: "category",
            value: value.to_string(),
        })
    }
}

impl FromStr for Relation {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Relation::from_key(value).ok_or_else(|| UnknownLabel {
            taxonomy: "relation",
            value: value.to_string(),
        })
    }
}

impl FromStr for RecordKind {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" | "지출" => Ok(RecordKind::Expense),
            "income" | "수입" => Ok(RecordKind::Income),
            _ => Err(UnknownLabel {
                taxonomy: "type",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(LabelStyle::English))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl Serialize for Relation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Classified;

    #[test]
    fn declared_order_is_preserved() {
        let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            [
                "Wedding",
                "Condolence",
                "FirstBirthday",
                "SeventiethBirthday",
                "Opening",
                "Other"
            ]
        );
        assert_eq!(Relation::ALL.len(), 8);
        assert_eq!(Relation::Workplace.ordinal(), 6);
    }

    #[test]
    fn from_key_accepts_keys_and_local_labels() {
        assert_eq!(Category::from_key("wedding"), Some(Category::Wedding));
        assert_eq!(Category::from_key("칠순"), Some(Category::SeventiethBirthday));
        assert_eq!(Relation::from_key(" 교우 "), Some(Relation::Congregation));
        assert_eq!(Category::from_key("Graduation"), None);
    }

    #[test]
    fn classified_keeps_unrecognized_labels() {
        let value: Classified<Category> = serde_json::from_str("\"Graduation\"").unwrap();
        assert_eq!(value, Classified::Unrecognized("Graduation".into()));
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"Graduation\"");

        let known: Classified<Category> = serde_json::from_str("\"조의\"").unwrap();
        assert_eq!(known.known(), Some(Category::Condolence));
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"Condolence\"");
    }

    #[test]
    fn record_kind_parses_aliases() {
        assert_eq!("INCOME".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!("지출".parse::<RecordKind>().unwrap(), RecordKind::Expense);
        let kind: RecordKind = serde_json::from_str("\"수입\"").unwrap();
        assert_eq!(kind, RecordKind::Income);
        assert!("gift".parse::<RecordKind>().is_err());
    }
}

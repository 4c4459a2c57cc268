//! Flag parsing and value conversion for command arguments.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use giftbook_domain::{Category, RecordKind, Relation, Taxonomy};
use strsim::levenshtein;
use uuid::Uuid;

use crate::errors::CliError;

/// Options that never take a value.
const SWITCHES: &[&str] = &["yes", "json"];

/// Arguments after the command name: positionals, `--key value` options and switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    positionals: Vec<String>,
    options: BTreeMap<String, String>,
    switches: BTreeSet<String>,
}

impl ParsedArgs {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, CliError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positionals.push(arg.to_string());
                continue;
            };
            if let Some((key, value)) = name.split_once('=') {
                parsed.options.insert(key.to_string(), value.to_string());
            } else if SWITCHES.contains(&name) {
                parsed.switches.insert(name.to_string());
            } else {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Input(format!("`--{name}` needs a value")))?;
                parsed.options.insert(name.to_string(), value.to_string());
            }
        }
        Ok(parsed)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn switch(&self, key: &str) -> bool {
        self.switches.contains(key)
    }

    /// Fails on any option or switch outside `allowed`.
    pub fn ensure_known(&self, allowed: &[&str]) -> Result<(), CliError> {
        let unknown = self
            .options
            .keys()
            .chain(self.switches.iter())
            .find(|key| !allowed.contains(&key.as_str()));
        match unknown {
            None => Ok(()),
            Some(key) => Err(CliError::Input(format!(
                "unknown option `--{key}`{}",
                did_you_mean(key, allowed.iter().copied())
                    .map(|best| format!("; did you mean `--{best}`?"))
                    .unwrap_or_default()
            ))),
        }
    }

    pub fn require(&self, key: &str) -> Result<&str, CliError> {
        self.option(key)
            .ok_or_else(|| CliError::Input(format!("`--{key}` is required")))
    }
}

/// Closest candidate within edit distance 3.
pub fn did_you_mean<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input = input.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (levenshtein(&input, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{raw}` is not a YYYY-MM-DD date")))
}

/// Whole amount; `,` and `_` separators are accepted.
pub fn parse_amount(raw: &str) -> Result<u64, CliError> {
    let digits: String = raw.chars().filter(|ch| !matches!(ch, ',' | '_')).collect();
    digits
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a whole, non-negative amount")))
}

pub fn parse_year(raw: &str) -> Result<i32, CliError> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a year")))
}

pub fn parse_id(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::Input(format!("`{raw}` is not a record id")))
}

pub fn parse_kind(raw: &str) -> Result<RecordKind, CliError> {
    raw.parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a type; expected Expense or Income")))
}

pub fn parse_category(raw: &str) -> Result<Category, CliError> {
    parse_taxonomy(raw, "category")
}

pub fn parse_relation(raw: &str) -> Result<Relation, CliError> {
    parse_taxonomy(raw, "relation")
}

fn parse_taxonomy<T: Taxonomy>(raw: &str, name: &str) -> Result<T, CliError> {
    T::from_key(raw).ok_or_else(|| {
        let keys: Vec<&str> = T::ALL.iter().map(|member| member.key()).collect();
        let hint = did_you_mean(raw, keys.iter().copied())
            .map(|best| format!(" Did you mean `{best}`?"))
            .unwrap_or_default();
        CliError::Input(format!(
            "unknown {name} `{raw}`; expected one of {}.{hint}",
            keys.join(", ")
        ))
    })
}

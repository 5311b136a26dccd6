// src/projects/overrides.rs
// =============================================================================
// Locally curated data that replaces or augments what GitHub reports.
//
// The site owner keeps a TOML file with one table per display field:
//
//   excluded = ["dotfiles"]            # never show these repositories
//   pinned   = ["astro"]               # show these first, in this order
//
//   [descriptions]      name -> text
//   [tech_stacks]       name -> ["React", "TypeScript"]
//   [demo_links]        name -> URL
//   [experience_links]  name -> { label = "...", href = "/experience#..." }
//   [blog_links]        name -> URL
//
// Keys are repository names, matched case-insensitively. Every lookup goes
// through normalize_name(), both when the tables are built and when a
// repository name is looked up, so "Astro", "astro" and "ASTRO" are the
// same key everywhere.
//
// The tables are loaded once at startup and never change afterwards.
//
// Rust concepts:
// - serde + toml: the file maps straight onto a struct
// - Lifetimes: ResolvedOverrides<'a> borrows from the tables, no cloning
// - Generics: normalize_keys works for every table value type
// =============================================================================

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::model::ExperienceLink;

/// The overrides shipped with the binary (the portfolio owner's entries)
pub const DEFAULT_OVERRIDES: &str = include_str!("../../data/overrides.toml");

/// Normalizes a repository name for case-insensitive comparison
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// True if `name` appears in `list`, ignoring case
pub fn name_in_list(list: &[String], name: &str) -> bool {
    let needle = normalize_name(name);
    list.iter().any(|entry| normalize_name(entry) == needle)
}

// On-disk shape of the override file. Every table is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OverrideFile {
    excluded: Vec<String>,
    pinned: Vec<String>,
    descriptions: BTreeMap<String, String>,
    tech_stacks: BTreeMap<String, Vec<String>>,
    demo_links: BTreeMap<String, String>,
    experience_links: BTreeMap<String, ExperienceLink>,
    blog_links: BTreeMap<String, String>,
}

/// Immutable, case-insensitive override tables
#[derive(Debug, Clone, Default)]
pub struct OverrideTables {
    descriptions: HashMap<String, String>,
    tech_stacks: HashMap<String, Vec<String>>,
    demo_links: HashMap<String, String>,
    experience_links: HashMap<String, ExperienceLink>,
    blog_links: HashMap<String, String>,
    excluded: Vec<String>,
    pinned: Vec<String>,
}

/// Everything the tables say about one repository
///
/// Each field is independent: `None` means "no override for this field".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedOverrides<'a> {
    pub description: Option<&'a str>,
    pub tech_stack: Option<&'a [String]>,
    pub demo_url: Option<&'a str>,
    pub experience_link: Option<&'a ExperienceLink>,
    pub blog_url: Option<&'a str>,
}

impl OverrideTables {
    /// Parses the TOML override format
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let file: OverrideFile = toml::from_str(contents)?;
        Ok(Self::from(file))
    }

    /// The tables embedded in the binary
    pub fn embedded() -> Result<Self, toml::de::Error> {
        Self::from_toml_str(DEFAULT_OVERRIDES)
    }

    /// Looks up all five per-repository overrides for `name`
    pub fn resolve(&self, name: &str) -> ResolvedOverrides<'_> {
        let key = normalize_name(name);
        ResolvedOverrides {
            description: self.descriptions.get(&key).map(String::as_str),
            tech_stack: self.tech_stacks.get(&key).map(Vec::as_slice),
            demo_url: self.demo_links.get(&key).map(String::as_str),
            experience_link: self.experience_links.get(&key),
            blog_url: self.blog_links.get(&key).map(String::as_str),
        }
    }

    /// Repository names that must never be shown
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Repository names to list first, in display order
    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }
}

impl From<OverrideFile> for OverrideTables {
    fn from(file: OverrideFile) -> Self {
        Self {
            descriptions: normalize_keys(drop_blank(file.descriptions)),
            tech_stacks: normalize_keys(file.tech_stacks),
            demo_links: normalize_keys(drop_blank(file.demo_links)),
            experience_links: normalize_keys(file.experience_links),
            blog_links: normalize_keys(drop_blank(file.blog_links)),
            excluded: file.excluded,
            pinned: file.pinned,
        }
    }
}

// A blank text entry (`foo = ""`) means "no override", so the lookup falls
// through to GitHub's value or the placeholder instead of an empty string.
fn drop_blank(table: BTreeMap<String, String>) -> BTreeMap<String, String> {
    table
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
}

// Re-keys a table by normalized name. If two keys collide after
// normalization the first one in sorted order wins.
fn normalize_keys<V>(table: BTreeMap<String, V>) -> HashMap<String, V> {
    let mut normalized = HashMap::with_capacity(table.len());
    for (name, value) in table {
        normalized.entry(normalize_name(&name)).or_insert(value);
    }
    normalized
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BTreeMap in OverrideFile but HashMap in OverrideTables?
//    - BTreeMap iterates in sorted key order, so when "Astro" and "astro"
//      both appear the same one always wins
//    - After normalization we only do lookups, which is what HashMap is for
//
// 2. What does #[serde(default, deny_unknown_fields)] do?
//    - default: a missing table becomes an empty map instead of an error
//    - deny_unknown_fields: a typo like [descripshuns] is reported, not
//      silently ignored
// -----------------------------------------------------------------------------

//! Identifier derivation shared by every template.
//!
//! All functions are pure: the same input always yields the same output, and
//! nothing here allocates state across calls. Names follow the conventions of
//! the generated web API (PascalCase types, camelCase locals).

use crate::domain::value_objects::{DtoKind, FeatureKind, ValidatorKind};

/// Singular words whose plural is not formed by a suffix rule.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

/// Words that are their own plural.
const UNCOUNTABLE: &[&str] = &[
    "sheep",
    "fish",
    "deer",
    "series",
    "species",
    "news",
    "equipment",
    "information",
    "money",
];

const F_TO_VES: &[&str] = &[
    "leaf", "loaf", "half", "wolf", "shelf", "calf", "knife", "life", "wife", "thief",
];

const O_TO_OES: &[&str] = &["hero", "potato", "tomato", "echo", "veto"];

// ============================================================================
// Casing
// ============================================================================

/// Lowercase only the first character: `"WidgetId"` → `"widgetId"`.
///
/// Idempotent: applying it twice equals applying it once.
pub fn lowercase_first_letter(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase only the first character: `"name"` → `"Name"`.
pub fn uppercase_first_letter(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_pascal_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| uppercase_first_letter(w))
        .collect()
}

/// Convert a string to snake_case. Dots count as separators so project
/// names like `Acme.Api` become `acme_api`.
pub fn to_snake_case(input: &str) -> String {
    split_words(&input.replace('.', "_")).join("_")
}

/// Split a string into lowercase words based on casing and separators.
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

// ============================================================================
// Pluralization
// ============================================================================

/// English plural of an identifier. Only the last word of a compound
/// identifier is inflected: `"SalesPerson"` → `"SalesPeople"`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let (head, last) = split_last_word(word);
    if last.is_empty() {
        return format!("{word}s");
    }

    let lower = last.to_lowercase();
    let plural = if UNCOUNTABLE.contains(&lower.as_str()) {
        last.to_string()
    } else if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        match_case(last, plural)
    } else if F_TO_VES.contains(&lower.as_str()) {
        let cut = if lower.ends_with("fe") { 2 } else { 1 };
        format!("{}{}", &last[..last.len() - cut], suffix(last, "ves"))
    } else if ends_with_single_z(&lower) {
        format!("{last}{}", suffix(last, "zes"))
    } else if O_TO_OES.contains(&lower.as_str())
        || ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s))
    {
        format!("{last}{}", suffix(last, "es"))
    } else if ends_with_consonant_y(&lower) {
        format!("{}{}", &last[..last.len() - 1], suffix(last, "ies"))
    } else {
        format!("{last}{}", suffix(last, "s"))
    };

    format!("{head}{plural}")
}

/// Byte-split at the start of the final word of a Pascal/camel/snake name.
fn split_last_word(word: &str) -> (&str, &str) {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, c) in word.char_indices() {
        if c == '_' || c == '-' || c.is_whitespace() {
            start = idx + c.len_utf8();
        } else if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase()) {
            start = idx;
        }
        prev = Some(c);
    }
    word.split_at(start)
}

fn ends_with_consonant_y(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(before)) => !"aeiou".contains(before),
        _ => false,
    }
}

/// Inflection suffix in the word's casing; shouted words stay shouted.
fn suffix(word: &str, ending: &str) -> String {
    if is_shouted(word) {
        ending.to_uppercase()
    } else {
        ending.to_string()
    }
}

fn is_shouted(word: &str) -> bool {
    word.len() > 1 && word.chars().all(|c| !c.is_lowercase())
}

/// `quiz`, `fez`: a lone `z` after a vowel doubles.
fn ends_with_single_z(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some('z'), Some('a' | 'e' | 'i' | 'o' | 'u'))
    )
}

fn match_case(original: &str, replacement: &str) -> String {
    if is_shouted(original) {
        replacement.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        uppercase_first_letter(replacement)
    } else {
        replacement.to_string()
    }
}

// ============================================================================
// Compound identifiers
// ============================================================================

/// Default lambda parameter for an entity: its first letter, lowercased.
pub fn lambda_variable(entity_name: &str) -> String {
    entity_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

/// `Widget` + `Creation` → `WidgetForCreationDto`.
pub fn dto_name(entity_name: &str, kind: DtoKind) -> String {
    format!("{entity_name}{}Dto", kind.infix())
}

/// `Widget` + `Update` → `WidgetForUpdateValidator`.
pub fn validator_name(entity_name: &str, kind: ValidatorKind) -> String {
    format!("{entity_name}{}Validator", kind.infix())
}

pub fn profile_name(entity_name: &str) -> String {
    format!("{entity_name}Profile")
}

pub fn controller_name(entity_plural: &str) -> String {
    format!("{entity_plural}Controller")
}

/// Static class wrapping a feature's request record and handler.
pub fn feature_class_name(kind: FeatureKind, entity_name: &str) -> String {
    match kind {
        FeatureKind::GetList => format!("Get{entity_name}List"),
        FeatureKind::AddListByFk => format!("Add{entity_name}List"),
        FeatureKind::AdHoc => entity_name.to_string(),
        other => format!("{}{entity_name}", other.verb()),
    }
}

/// Request record inside the feature class (`AddWidgetCommand`, `WidgetQuery`).
pub fn request_record_name(kind: FeatureKind, entity_name: &str) -> String {
    match kind {
        FeatureKind::GetRecord => format!("{entity_name}Query"),
        FeatureKind::GetList => format!("{entity_name}ListQuery"),
        FeatureKind::AddListByFk => format!("Add{entity_name}ListCommand"),
        FeatureKind::AdHoc => format!("{entity_name}Command"),
        other => format!("{}{entity_name}Command", other.verb()),
    }
}

/// Named route of the endpoint (`GetWidget`, `GetWidgets`, `AddWidgetList`).
pub fn route_name(kind: FeatureKind, entity_name: &str, entity_plural: &str) -> String {
    match kind {
        FeatureKind::GetList => format!("Get{entity_plural}"),
        FeatureKind::AddListByFk => format!("Add{entity_name}List"),
        FeatureKind::AdHoc => entity_name.to_string(),
        other => format!("{}{entity_name}", other.verb()),
    }
}

/// Permission checked by a protected endpoint when none is configured.
pub fn default_permission_name(kind: FeatureKind, entity_name: &str, entity_plural: &str) -> String {
    format!("Can{}", route_name(kind, entity_name, entity_plural))
}

pub fn test_class_name(feature_class: &str) -> String {
    format!("{feature_class}Tests")
}

/// Faker builder for an entity DTO: `FakeWidgetForCreationDto`.
pub fn fake_name(entity_name: &str, kind: DtoKind) -> String {
    format!("Fake{}", dto_name(entity_name, kind))
}

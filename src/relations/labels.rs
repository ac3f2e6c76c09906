//! Natural-language label of the eligible collections ("A, B or C")

use super::collection::{CollectionInfo, RelationTo};
use crate::i18n::Translator;

const LIST_SEPARATOR: &str = ", ";

/// Join items as a disjunction using the locale's word for "or"
///
/// `[]` → `""`, `[a]` → `a`, `[a, b]` → `a or b`, `[a, b, c]` → `a, b or c`.
#[must_use]
pub fn join_with_or(items: &[String], or: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} {or} {second}"),
        [init @ .., last] => format!("{} {or} {last}", init.join(LIST_SEPARATOR)),
    }
}

/// Label set for the collections a field relates to
///
/// Eligible collections keep the order in which the host declares them.
pub fn label_set(collections: &[CollectionInfo], relation_to: &RelationTo, translator: &dyn Translator) -> String {
    let labels: Vec<String> = collections
        .iter()
        .filter(|collection| relation_to.includes(&collection.slug))
        .map(|collection| collection.singular_label().to_string())
        .collect();

    join_with_or(&labels, &translator.t("general:or"))
}

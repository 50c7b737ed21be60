//! Pluralization: CLDR rule table, plural-form parser and form selection

mod forms;
mod pluralizer;
mod rules;

pub use forms::{FormMatcher, PluralForm, parse_forms};
pub use pluralizer::{PluralCount, Pluralizer};
pub use rules::{PluralCategory, PluralOperands, PluralRule, UnknownCategory, category};

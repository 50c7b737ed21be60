//! Translator integration tests
//!
//! Exercise resolution, fallback, pluralization and formatting together
//! through the public API.

use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;
use tolk_i18n::prelude::*;

/// A formatter whose `loc` modifier prints the formatting locale.
fn locale_echo_formatter() -> MessageFormatter {
	let mut formatter = MessageFormatter::new();
	formatter.register_modifier("loc", |ctx: &ModifierContext<'_>| ctx.locale.to_string());
	formatter
}

#[fixture]
fn translator() -> Translator {
	Translator::new("es", "en")
		.with_formatter(locale_echo_formatter())
		.with_loader(
			StaticLoader::new()
				.with_bundle(
					"en",
					"messages",
					None,
					json!({
						"welcome": "Welcome {name|loc}",
						"items": "one: :count item [{name|loc}]|other: :count items [{name|loc}]",
						"user": { "profile": "Profile", "settings": "Settings" }
					}),
				)
				.with_bundle(
					"es",
					"messages",
					None,
					json!({
						"hello": "Hola {name|loc}",
						"items": "one: :count artículo|other: :count artículos"
					}),
				),
		)
}

#[rstest]
fn test_fallback_formats_in_fallback_locale(translator: Translator) {
	// Arrange
	let replacements = Replacements::new().with("name", "x");

	// Act
	let fallback = translator.trans("messages.welcome", &replacements, None);
	let direct = translator.trans("messages.hello", &replacements, None);

	// Assert
	assert_eq!(fallback, "Welcome en");
	assert_eq!(direct, "Hola es");
}

#[rstest]
#[case(1.0, "1 artículo")]
#[case(0.0, "0 artículos")]
#[case(2.5, "2.5 artículos")]
fn test_choice_in_requested_locale(translator: Translator, #[case] count: f64, #[case] expected: &str) {
	assert_eq!(
		translator.choice("messages.items", count, &Replacements::new(), None),
		expected
	);
}

#[rstest]
fn test_choice_in_fallback_uses_fallback_rules() {
	// Arrange
	let replacements = Replacements::new().with("name", "x");
	let french = Translator::new("fr", "en")
		.with_formatter(locale_echo_formatter())
		.with_loader(StaticLoader::new().with_bundle(
			"en",
			"messages",
			None,
			json!({ "items": "one: :count item [{name|loc}]|other: :count items [{name|loc}]" }),
		));

	// Act
	// fr treats 0 as `one`; en does not
	let zero = french.choice("messages.items", 0, &replacements, None);

	// Assert
	assert_eq!(zero, "0 items [en]");
}

#[rstest]
#[case(1, "One ADA")]
#[case(3, "3 items for ADA")]
fn test_choice_keeps_modifiers_inside_forms(#[case] count: i64, #[case] expected: &str) {
	// Arrange
	let translator = Translator::new("en", "en").with_loader(StaticLoader::new().with_bundle(
		"en",
		"cart",
		None,
		json!({ "items": "one: One {name|upper}|other: :count items for {name|upper}" }),
	));
	let replacements = Replacements::new().with("name", "ada");

	// Act
	let result = translator.choice("cart.items", count, &replacements, None);

	// Assert
	assert_eq!(result, expected);
}

#[rstest]
fn test_unresolved_key_round_trips(translator: Translator) {
	// Arrange
	let replacements = Replacements::new().with("name", "x");

	// Act
	let result = translator.trans("nowhere.to.be.found", &replacements, None);

	// Assert
	assert_eq!(result, "nowhere.to.be.found");
}

#[rstest]
fn test_deep_merge_across_loaders() {
	// Arrange
	let translator = Translator::new("en", "en");
	translator.add_loader(Arc::new(StaticLoader::new().with_bundle(
		"en",
		"messages",
		None,
		json!({ "user": { "profile": "P", "settings": "S" } }),
	)));
	translator.add_loader(Arc::new(StaticLoader::new().with_bundle(
		"en",
		"messages",
		None,
		json!({ "user": { "profile": "P2" } }),
	)));

	// Act
	let profile = translator.trans("messages.user.profile", &Replacements::new(), None);
	let settings = translator.trans("messages.user.settings", &Replacements::new(), None);

	// Assert
	assert_eq!(profile, "P2");
	assert_eq!(settings, "S");
}

#[rstest]
fn test_missing_log_records_request_locale(translator: Translator) {
	// Arrange
	translator.set_track_missing(true);

	// Act
	translator.trans("messages.absent", &Replacements::new(), None);
	translator.choice("messages.absent", 2, &Replacements::new(), Some("de"));
	translator.trans("messages.welcome", &Replacements::new(), None);

	// Assert
	assert_eq!(
		translator.missing_translations(),
		vec![
			"es.messages.absent".to_string(),
			"de.messages.absent".to_string()
		]
	);
}

#[rstest]
fn test_shared_translator_across_threads(translator: Translator) {
	// Arrange
	let translator = Arc::new(translator);

	// Act
	let results: Vec<String> = (0..4)
		.map(|i| {
			let translator = Arc::clone(&translator);
			std::thread::spawn(move || {
				translator.choice("messages.items", i, &Replacements::new(), None)
			})
		})
		.map(|handle| handle.join().unwrap())
		.collect();

	// Assert
	assert_eq!(
		results,
		vec!["0 artículos", "1 artículo", "2 artículos", "3 artículos"]
	);
}

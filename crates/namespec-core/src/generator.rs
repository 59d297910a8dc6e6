use std::collections::BTreeMap;

use crate::config::NamingConfig;
use crate::error::Error;
use crate::matcher::match_name;
use crate::registry;
use crate::spec::{Category, NameStructure, Slot};

/// Value supplied for one token when building or editing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Use this text verbatim (validated against the token's rules).
    Literal(String),
    /// Draw the next value from the session counters. Only the
    /// increment tokens accept this.
    Auto,
}

/// Inputs for building one name from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub base_name: String,
    values: BTreeMap<Category, TokenValue>,
}

impl GenerationRequest {
    pub fn new(base_name: impl Into<String>) -> Self {
        GenerationRequest {
            base_name: base_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, category: Category, value: TokenValue) -> Self {
        self.set(category, value);
        self
    }

    pub fn set(&mut self, category: Category, value: TokenValue) {
        self.values.insert(category, value);
    }

    fn get(&self, category: Category) -> Option<&TokenValue> {
        self.values.get(&category)
    }
}

/// A batch edit: token values to change on names that already exist.
/// A `Name` entry replaces the base name itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameEdit {
    values: BTreeMap<Category, TokenValue>,
}

impl RenameEdit {
    pub fn new() -> Self {
        RenameEdit::default()
    }

    pub fn with(mut self, category: Category, value: TokenValue) -> Self {
        self.set(category, value);
        self
    }

    pub fn set(&mut self, category: Category, value: TokenValue) {
        self.values.insert(category, value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, &TokenValue)> {
        self.values.iter().map(|(c, v)| (*c, v))
    }
}

/// Increment state threaded through a generation session.
///
/// Callers own the counters; nothing here is process-global, so two
/// concurrent sessions never contend or interleave their sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub alphabetical: u32,
    pub numerical: u32,
}

impl Counters {
    /// Next value in the sequence A, B, .., Z, AA, AB, ..
    pub fn next_alphabetical(&mut self) -> String {
        self.alphabetical += 1;
        let mut n = self.alphabetical;
        let mut out = String::new();
        while n > 0 {
            n -= 1;
            out.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        out
    }

    /// Next zero-padded value, or an overflow error once the width is
    /// exhausted (e.g. past 999 at three digits).
    pub fn next_numerical(&mut self, digits: u32) -> Result<String, Error> {
        let max = 10u32.pow(digits) - 1;
        let next = self.numerical + 1;
        if next > max {
            return Err(Error::IncrementOverflow {
                value: next,
                digits,
            });
        }
        self.numerical = next;
        Ok(format!("{next:0width$}", width = digits as usize))
    }
}

/// Result of applying an edit to one existing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub original: String,
    pub outcome: Result<String, Error>,
}

/// Build one name from the request. No match step afterwards could
/// disagree with what this produces: values are validated slot by slot
/// before assembly, and absent optional tokens simply render nothing.
pub fn generate(
    structure: &NameStructure,
    config: &NamingConfig,
    request: &GenerationRequest,
    counters: &mut Counters,
) -> Result<String, Error> {
    let mut rendered: Vec<String> = Vec::new();

    for segment in &structure.segments {
        let mut text = String::new();
        for slot in &segment.slots {
            if let Some(value) = render_slot(slot, config, request, counters)? {
                text.push_str(&value);
            }
        }
        if !text.is_empty() {
            rendered.push(text);
        }
    }

    Ok(rendered.join("_"))
}

fn render_slot(
    slot: &Slot,
    config: &NamingConfig,
    request: &GenerationRequest,
    counters: &mut Counters,
) -> Result<Option<String>, Error> {
    if slot.category == Category::Name {
        let base = request.base_name.as_str();
        if !registry::validate_value(Category::Name, config, base) {
            return Err(Error::InvalidTokenValue {
                category: Category::Name,
                value: base.to_string(),
                message: registry::describe_expected(Category::Name, config),
            });
        }
        return Ok(Some(base.to_string()));
    }

    match request.get(slot.category) {
        None => {
            if config.is_optional(slot.category) {
                Ok(None)
            } else {
                Err(Error::MissingRequiredValue {
                    category: slot.category,
                })
            }
        }
        Some(TokenValue::Literal(value)) => {
            if !registry::validate_value(slot.category, config, value) {
                return Err(Error::InvalidTokenValue {
                    category: slot.category,
                    value: value.clone(),
                    message: registry::describe_expected(slot.category, config),
                });
            }
            Ok(Some(value.clone()))
        }
        Some(TokenValue::Auto) => match slot.category {
            Category::AlphabeticalInc => Ok(Some(counters.next_alphabetical())),
            Category::NumericalInc => Ok(Some(counters.next_numerical(config.numeric_digits)?)),
            other => Err(Error::InvalidTokenValue {
                category: other,
                value: "auto".to_string(),
                message: "only increment tokens can use auto values".to_string(),
            }),
        },
    }
}

/// Re-render an existing name with some token values changed.
///
/// The current name is decomposed first; whatever it already carries
/// is kept unless the edit overrides it. The result goes back through
/// full generation, so an invalid carried value surfaces as an error
/// instead of being copied through silently.
pub fn apply_edit(
    structure: &NameStructure,
    config: &NamingConfig,
    current_name: &str,
    edit: &RenameEdit,
    counters: &mut Counters,
) -> Result<String, Error> {
    let matched = match_name(structure, config, current_name);

    let mut request = GenerationRequest::default();
    let mut have_base = false;

    for (category, value) in matched.values() {
        if category == Category::Name {
            request.base_name = value.to_string();
            have_base = true;
        } else {
            request.set(category, TokenValue::Literal(value.to_string()));
        }
    }

    for (category, value) in edit.entries() {
        if category == Category::Name {
            match value {
                TokenValue::Literal(base) => {
                    request.base_name = base.clone();
                    have_base = true;
                }
                TokenValue::Auto => {
                    return Err(Error::InvalidTokenValue {
                        category: Category::Name,
                        value: "auto".to_string(),
                        message: "the name token has no counter to draw from".to_string(),
                    });
                }
            }
        } else {
            request.set(category, value.clone());
        }
    }

    if !have_base {
        return Err(Error::MissingRequiredValue {
            category: Category::Name,
        });
    }

    generate(structure, config, &request, counters)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DEFAULT_TEMPLATE;
    use crate::structure::parse_structure;

    fn default_parts() -> (NameStructure, NamingConfig) {
        (
            parse_structure(DEFAULT_TEMPLATE).unwrap(),
            NamingConfig::default(),
        )
    }

    #[test]
    fn generate_with_all_tokens() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("arm")
            .with(Category::Symmetry, TokenValue::Literal("L".into()))
            .with(Category::Type, TokenValue::Literal("hi".into()))
            .with(Category::Zoning, TokenValue::Literal("Lt".into()))
            .with(Category::Orientation, TokenValue::Literal("Nt".into()))
            .with(Category::AlphabeticalInc, TokenValue::Auto)
            .with(Category::NumericalInc, TokenValue::Auto);

        let name = generate(&structure, &config, &request, &mut counters).unwrap();
        assert_eq!(name, "L_hi_armLtNtA_001");
    }

    #[test]
    fn absent_optional_tokens_render_nothing() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request =
            GenerationRequest::new("body").with(Category::Type, TokenValue::Literal("grp".into()));

        let name = generate(&structure, &config, &request, &mut counters).unwrap();
        assert_eq!(name, "grp_body");
    }

    #[test]
    fn missing_mandatory_token_is_an_error() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("body");

        let err = generate(&structure, &config, &request, &mut counters).unwrap_err();
        assert_eq!(
            err,
            Error::MissingRequiredValue {
                category: Category::Type
            }
        );
    }

    #[test]
    fn invalid_literal_is_an_error() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("body")
            .with(Category::Type, TokenValue::Literal("widget".into()));

        let err = generate(&structure, &config, &request, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTokenValue {
                category: Category::Type,
                ..
            }
        ));
    }

    #[test]
    fn invalid_base_name_is_an_error() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("my body")
            .with(Category::Type, TokenValue::Literal("grp".into()));

        let err = generate(&structure, &config, &request, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTokenValue {
                category: Category::Name,
                ..
            }
        ));
    }

    #[test]
    fn auto_on_non_increment_token_is_an_error() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("body")
            .with(Category::Type, TokenValue::Literal("grp".into()))
            .with(Category::Zoning, TokenValue::Auto);

        let err = generate(&structure, &config, &request, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTokenValue {
                category: Category::Zoning,
                ..
            }
        ));
    }

    #[test]
    fn numerical_counter_sequences_and_pads() {
        let mut counters = Counters::default();
        assert_eq!(counters.next_numerical(3).unwrap(), "001");
        assert_eq!(counters.next_numerical(3).unwrap(), "002");
        assert_eq!(counters.next_numerical(3).unwrap(), "003");
    }

    #[test]
    fn numerical_counter_overflows_past_width() {
        let mut counters = Counters {
            alphabetical: 0,
            numerical: 999,
        };
        let err = counters.next_numerical(3).unwrap_err();
        assert_eq!(
            err,
            Error::IncrementOverflow {
                value: 1000,
                digits: 3
            }
        );
        // state is untouched after a failed draw
        assert_eq!(counters.numerical, 999);
    }

    #[test]
    fn alphabetical_counter_rolls_to_double_letters() {
        let mut counters = Counters::default();
        assert_eq!(counters.next_alphabetical(), "A");
        assert_eq!(counters.next_alphabetical(), "B");

        counters.alphabetical = 25;
        assert_eq!(counters.next_alphabetical(), "Z");
        assert_eq!(counters.next_alphabetical(), "AA");
        assert_eq!(counters.next_alphabetical(), "AB");

        counters.alphabetical = 26 + 26 * 26 - 1;
        assert_eq!(counters.next_alphabetical(), "ZZ");
        assert_eq!(counters.next_alphabetical(), "AAA");
    }

    #[test]
    fn generated_names_match_their_structure() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("door")
            .with(Category::Type, TokenValue::Literal("prp".into()))
            .with(Category::Zoning, TokenValue::Literal("TpLt".into()))
            .with(Category::NumericalInc, TokenValue::Auto);

        let name = generate(&structure, &config, &request, &mut counters).unwrap();
        let matched = match_name(&structure, &config, &name);
        assert!(matched.is_valid(), "problems: {:?}", matched.problems());
        assert_eq!(matched.value(Category::Name), Some("door"));
        assert_eq!(matched.value(Category::Zoning), Some("TpLt"));
        assert_eq!(matched.value(Category::NumericalInc), Some("001"));
    }

    #[test]
    fn edit_swaps_one_token_and_keeps_the_rest() {
        let structure = parse_structure("[symmetry]_[name]_[type]").unwrap();
        let config = NamingConfig::default();
        let mut counters = Counters::default();

        let edit = RenameEdit::new().with(Category::Type, TokenValue::Literal("ctrl".into()));
        let renamed = apply_edit(&structure, &config, "L_arm_grp", &edit, &mut counters).unwrap();
        assert_eq!(renamed, "L_arm_ctrl");
    }

    #[test]
    fn edit_can_replace_the_base_name() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();

        let edit = RenameEdit::new().with(Category::Name, TokenValue::Literal("leg".into()));
        let renamed = apply_edit(&structure, &config, "L_hi_armLtNtA_001", &edit, &mut counters)
            .unwrap();
        assert_eq!(renamed, "L_hi_legLtNtA_001");
    }

    #[test]
    fn edit_of_unparseable_name_reports_what_is_missing() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();

        // "arm" alone carries a name but no type, and the edit does
        // not supply one, so re-rendering must fail on the type
        let edit = RenameEdit::new().with(Category::Symmetry, TokenValue::Literal("L".into()));
        let err = apply_edit(&structure, &config, "arm", &edit, &mut counters).unwrap_err();
        assert_eq!(
            err,
            Error::MissingRequiredValue {
                category: Category::Type
            }
        );
    }

    #[test]
    fn edit_surfaces_invalid_carried_values() {
        let structure = parse_structure("[symmetry]_[name]_[type]").unwrap();
        let config = NamingConfig::default();
        let mut counters = Counters::default();

        // the carried symmetry "LX" is invalid and the edit leaves it
        // in place, so the rename must refuse rather than copy it
        let edit = RenameEdit::new().with(Category::Type, TokenValue::Literal("ctrl".into()));
        let err = apply_edit(&structure, &config, "LX_arm_grp", &edit, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTokenValue {
                category: Category::Symmetry,
                ..
            }
        ));
    }

    #[test]
    fn edit_with_auto_name_is_refused() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();

        let edit = RenameEdit::new().with(Category::Name, TokenValue::Auto);
        let err =
            apply_edit(&structure, &config, "grp_arm", &edit, &mut counters).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTokenValue {
                category: Category::Name,
                ..
            }
        ));
    }

    #[test]
    fn shared_counters_number_a_batch_without_repeats() {
        let (structure, config) = default_parts();
        let mut counters = Counters::default();
        let request = GenerationRequest::new("bolt")
            .with(Category::Type, TokenValue::Literal("prp".into()))
            .with(Category::NumericalInc, TokenValue::Auto);

        let a = generate(&structure, &config, &request, &mut counters).unwrap();
        let b = generate(&structure, &config, &request, &mut counters).unwrap();
        let c = generate(&structure, &config, &request, &mut counters).unwrap();
        assert_eq!(a, "prp_bolt_001");
        assert_eq!(b, "prp_bolt_002");
        assert_eq!(c, "prp_bolt_003");
    }
}

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::spec::Category;

/// Structure template used when the host has not chosen one.
pub const DEFAULT_TEMPLATE: &str =
    "[symmetry]_[type]_[name][zoning][orientation][alphabetical_inc]_[numerical_inc]";

/// Host-built naming configuration.
///
/// Built once when the user edits settings, validated eagerly, then
/// passed by reference into matching and generation. Never re-parsed
/// per candidate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Type values for grouping nodes, e.g. `grp`, `ctrl`.
    pub group_types: Vec<String>,

    /// Type values for geometry nodes, e.g. `hi`, `lo`.
    pub mesh_types: Vec<String>,

    /// Allowed symmetry sides.
    pub symmetry_options: Vec<String>,

    pub zoning: ZoneCodes,
    pub orientation: OrientationCodes,

    /// Digit width of `[numerical_inc]` values.
    pub numeric_digits: u32,

    pub optional: OptionalTokens,

    /// Approved words for the `name` token. `None` disables the check;
    /// structurally valid names with unlisted words classify as
    /// needs-review, not invalid.
    pub lexicon: Option<Vec<String>>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            group_types: to_strings(&["prx", "prp", "grp", "ctrl", "proxy", "render"]),
            mesh_types: to_strings(&["hi", "lo"]),
            symmetry_options: to_strings(&["L", "R"]),
            zoning: ZoneCodes::default(),
            orientation: OrientationCodes::default(),
            numeric_digits: 3,
            optional: OptionalTokens::default(),
            lexicon: None,
        }
    }
}

impl NamingConfig {
    pub fn is_optional(&self, category: Category) -> bool {
        match category {
            Category::Symmetry => self.optional.symmetry,
            Category::Type => self.optional.type_,
            // The name token anchors every structure and can never be
            // dropped from a candidate.
            Category::Name => false,
            Category::Zoning => self.optional.zoning,
            Category::Orientation => self.optional.orientation,
            Category::AlphabeticalInc => self.optional.alphabetical_inc,
            Category::NumericalInc => self.optional.numerical_inc,
        }
    }

    /// All accepted type values: group types plus mesh types.
    pub fn type_values(&self) -> impl Iterator<Item = &str> {
        self.group_types
            .iter()
            .chain(self.mesh_types.iter())
            .map(String::as_str)
    }

    /// `Some(true)` when the word is listed, `Some(false)` when a
    /// lexicon is configured and the word is not in it, `None` when no
    /// lexicon is configured.
    pub fn lexicon_contains(&self, word: &str) -> Option<bool> {
        self.lexicon
            .as_ref()
            .map(|words| words.iter().any(|w| w == word))
    }

    pub fn validate(&self) -> Result<(), Error> {
        require_letters("group_types", &self.group_types)?;
        require_letters("mesh_types", &self.mesh_types)?;
        require_letters("symmetry_options", &self.symmetry_options)?;
        require_letters("zoning codes", &self.zoning.codes())?;
        require_letters("orientation codes", &self.orientation.codes())?;

        if self.group_types.is_empty() && self.mesh_types.is_empty() {
            return Err(Error::InvalidConfig {
                message: "at least one type value is required".into(),
            });
        }
        if self.symmetry_options.is_empty() {
            return Err(Error::InvalidConfig {
                message: "at least one symmetry value is required".into(),
            });
        }

        // Width 9 keeps 10^digits - 1 within u32.
        if self.numeric_digits == 0 || self.numeric_digits > 9 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "numeric_digits must be between 1 and 9, got {}",
                    self.numeric_digits
                ),
            });
        }

        Ok(())
    }
}

/// Codes for the eight zoning positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneCodes {
    pub left: String,
    pub center: String,
    pub right: String,
    pub top: String,
    pub middle: String,
    pub bottom: String,
    pub front: String,
    pub back: String,
}

impl Default for ZoneCodes {
    fn default() -> Self {
        Self {
            left: "Lt".into(),
            center: "Ct".into(),
            right: "Rt".into(),
            top: "Tp".into(),
            middle: "Md".into(),
            bottom: "Bt".into(),
            front: "Ft".into(),
            back: "Bk".into(),
        }
    }
}

impl ZoneCodes {
    pub fn codes(&self) -> Vec<String> {
        vec![
            self.left.clone(),
            self.center.clone(),
            self.right.clone(),
            self.top.clone(),
            self.middle.clone(),
            self.bottom.clone(),
            self.front.clone(),
            self.back.clone(),
        ]
    }

    /// Singles plus the composites: each vertical zone (top, middle,
    /// bottom, front, back) concatenated with each horizontal zone
    /// (left, center, right), e.g. `TpLt`, `BkRt`.
    pub fn allowed_values(&self) -> Vec<String> {
        let mut values = self.codes();
        for row in [
            &self.top,
            &self.middle,
            &self.bottom,
            &self.front,
            &self.back,
        ] {
            for col in [&self.left, &self.center, &self.right] {
                values.push(format!("{row}{col}"));
            }
        }
        values
    }
}

/// Codes for the four orientation cardinals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationCodes {
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
}

impl Default for OrientationCodes {
    fn default() -> Self {
        Self {
            north: "Nt".into(),
            south: "St".into(),
            east: "Et".into(),
            west: "Wt".into(),
        }
    }
}

impl OrientationCodes {
    pub fn codes(&self) -> Vec<String> {
        vec![
            self.north.clone(),
            self.south.clone(),
            self.east.clone(),
            self.west.clone(),
        ]
    }

    /// Singles plus north/south combined with east/west, e.g. `NtEt`.
    pub fn allowed_values(&self) -> Vec<String> {
        let mut values = self.codes();
        for ns in [&self.north, &self.south] {
            for ew in [&self.east, &self.west] {
                values.push(format!("{ns}{ew}"));
            }
        }
        values
    }
}

/// Which categories a candidate name may omit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalTokens {
    pub symmetry: bool,
    #[serde(rename = "type")]
    pub type_: bool,
    pub zoning: bool,
    pub orientation: bool,
    pub alphabetical_inc: bool,
    pub numerical_inc: bool,
}

impl Default for OptionalTokens {
    fn default() -> Self {
        Self {
            symmetry: true,
            type_: false,
            zoning: true,
            orientation: true,
            alphabetical_inc: true,
            numerical_inc: true,
        }
    }
}

/// Split a user-entered comma list into trimmed, non-empty values.
/// `"hi, lo,"` becomes `["hi", "lo"]`. Validation of the values
/// themselves happens in [`NamingConfig::validate`].
pub fn parse_custom_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn require_letters(what: &str, values: &[String]) -> Result<(), Error> {
    for v in values {
        if v.is_empty() || !v.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidConfig {
                message: format!("{what} must contain letters only, got {v:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        NamingConfig::default().validate().unwrap();
    }

    #[test]
    fn custom_list_splits_and_trims() {
        assert_eq!(parse_custom_list("hi, lo"), vec!["hi", "lo"]);
        assert_eq!(parse_custom_list(" grp ,ctrl,, "), vec!["grp", "ctrl"]);
        assert!(parse_custom_list("").is_empty());
    }

    #[test]
    fn non_letter_values_rejected() {
        let mut config = NamingConfig::default();
        config.group_types = parse_custom_list("grp, ctrl2");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn empty_type_lists_rejected() {
        let mut config = NamingConfig::default();
        config.group_types.clear();
        config.mesh_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn digit_width_bounds() {
        let mut config = NamingConfig::default();
        config.numeric_digits = 0;
        assert!(config.validate().is_err());
        config.numeric_digits = 10;
        assert!(config.validate().is_err());
        config.numeric_digits = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zoning_composites_cover_rows_and_columns() {
        let values = ZoneCodes::default().allowed_values();
        assert_eq!(values.len(), 8 + 15);
        assert!(values.iter().any(|v| v == "TpLt"));
        assert!(values.iter().any(|v| v == "BkRt"));
        assert!(!values.iter().any(|v| v == "LtTp"));
    }

    #[test]
    fn orientation_composites_are_ns_by_ew() {
        let values = OrientationCodes::default().allowed_values();
        assert_eq!(values.len(), 4 + 4);
        assert!(values.iter().any(|v| v == "NtEt"));
        assert!(values.iter().any(|v| v == "StWt"));
        assert!(!values.iter().any(|v| v == "EtNt"));
    }

    #[test]
    fn name_is_never_optional() {
        let config = NamingConfig::default();
        assert!(!config.is_optional(Category::Name));
        assert!(config.is_optional(Category::Symmetry));
        assert!(!config.is_optional(Category::Type));
    }
}

//! Java source level and the features each level enables.
//!
//! Unlike a superset parser that reports gated features after the fact, mend
//! changes how tokens are read below a feature's level: `assert` and `enum`
//! lex as identifiers, and the `@`, `<`, `...`, `->`, `::` of gated constructs
//! become unexpected tokens that recovery deals with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The configured source level. `major` follows the old `1.x` numbering, so
/// `1.5` is `major == 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JavaLanguageLevel {
    pub major: u16,
}

impl JavaLanguageLevel {
    pub const JAVA_1_3: Self = Self { major: 3 };
    pub const JAVA_1_4: Self = Self { major: 4 };
    pub const JAVA_1_5: Self = Self { major: 5 };
    pub const JAVA_1_6: Self = Self { major: 6 };
    pub const JAVA_1_7: Self = Self { major: 7 };
    pub const JAVA_1_8: Self = Self { major: 8 };

    /// Lowest level the grammar models.
    pub const MIN: Self = Self::JAVA_1_3;
    /// Highest level the grammar models; later levels parse as 1.8.
    pub const MAX: Self = Self::JAVA_1_8;

    pub fn is_enabled(self, feature: JavaFeature) -> bool {
        self.major >= feature.stable_since()
    }

    #[inline]
    pub fn supports_generics(self) -> bool {
        self.is_enabled(JavaFeature::Generics)
    }

    #[inline]
    pub fn supports_annotations(self) -> bool {
        self.is_enabled(JavaFeature::Annotations)
    }

    #[inline]
    pub fn supports_lambdas(self) -> bool {
        self.is_enabled(JavaFeature::Lambdas)
    }
}

impl Default for JavaLanguageLevel {
    fn default() -> Self {
        JavaLanguageLevel::JAVA_1_8
    }
}

impl fmt::Display for JavaLanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.{}", self.major)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported Java source level `{0}` (expected 1.3 through 1.8)")]
pub struct UnknownLanguageLevel(pub String);

impl FromStr for JavaLanguageLevel {
    type Err = UnknownLanguageLevel;

    /// Accepts `1.5` as well as `5`. Levels past 1.8 clamp to 1.8.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("1.").unwrap_or(trimmed);
        let major: u16 = digits
            .parse()
            .map_err(|_| UnknownLanguageLevel(trimmed.to_owned()))?;
        if major < Self::MIN.major {
            return Err(UnknownLanguageLevel(trimmed.to_owned()));
        }
        Ok(Self {
            major: major.min(Self::MAX.major),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaFeature {
    Assertions,            // 1.4
    Generics,              // 1.5
    Annotations,           // 1.5
    Enums,                 // 1.5
    Varargs,               // 1.5
    EnhancedFor,           // 1.5
    StaticImports,         // 1.5
    Diamond,               // 1.7
    MultiCatch,            // 1.7
    TryWithResources,      // 1.7
    BinaryLiterals,        // 1.7
    UnderscoresInLiterals, // 1.7
    Lambdas,               // 1.8
    MethodReferences,      // 1.8
    DefaultMethods,        // 1.8
}

impl JavaFeature {
    pub const fn diagnostic_code(self) -> &'static str {
        match self {
            JavaFeature::Assertions => "JAVA_FEATURE_ASSERTIONS",
            JavaFeature::Generics => "JAVA_FEATURE_GENERICS",
            JavaFeature::Annotations => "JAVA_FEATURE_ANNOTATIONS",
            JavaFeature::Enums => "JAVA_FEATURE_ENUMS",
            JavaFeature::Varargs => "JAVA_FEATURE_VARARGS",
            JavaFeature::EnhancedFor => "JAVA_FEATURE_ENHANCED_FOR",
            JavaFeature::StaticImports => "JAVA_FEATURE_STATIC_IMPORTS",
            JavaFeature::Diamond => "JAVA_FEATURE_DIAMOND",
            JavaFeature::MultiCatch => "JAVA_FEATURE_MULTI_CATCH",
            JavaFeature::TryWithResources => "JAVA_FEATURE_TRY_WITH_RESOURCES",
            JavaFeature::BinaryLiterals => "JAVA_FEATURE_BINARY_LITERALS",
            JavaFeature::UnderscoresInLiterals => "JAVA_FEATURE_UNDERSCORES_IN_LITERALS",
            JavaFeature::Lambdas => "JAVA_FEATURE_LAMBDAS",
            JavaFeature::MethodReferences => "JAVA_FEATURE_METHOD_REFERENCES",
            JavaFeature::DefaultMethods => "JAVA_FEATURE_DEFAULT_METHODS",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            JavaFeature::Assertions => "assertions",
            JavaFeature::Generics => "generics",
            JavaFeature::Annotations => "annotations",
            JavaFeature::Enums => "enums",
            JavaFeature::Varargs => "variable arity parameters",
            JavaFeature::EnhancedFor => "enhanced `for` loops",
            JavaFeature::StaticImports => "static imports",
            JavaFeature::Diamond => "the diamond operator",
            JavaFeature::MultiCatch => "multi-catch",
            JavaFeature::TryWithResources => "try-with-resources",
            JavaFeature::BinaryLiterals => "binary literals",
            JavaFeature::UnderscoresInLiterals => "underscores in numeric literals",
            JavaFeature::Lambdas => "lambda expressions",
            JavaFeature::MethodReferences => "method references",
            JavaFeature::DefaultMethods => "default methods",
        }
    }

    pub const fn stable_since(self) -> u16 {
        match self {
            JavaFeature::Assertions => 4,
            JavaFeature::Generics
            | JavaFeature::Annotations
            | JavaFeature::Enums
            | JavaFeature::Varargs
            | JavaFeature::EnhancedFor
            | JavaFeature::StaticImports => 5,
            JavaFeature::Diamond
            | JavaFeature::MultiCatch
            | JavaFeature::TryWithResources
            | JavaFeature::BinaryLiterals
            | JavaFeature::UnderscoresInLiterals => 7,
            JavaFeature::Lambdas | JavaFeature::MethodReferences | JavaFeature::DefaultMethods => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("1.4".parse::<JavaLanguageLevel>(), Ok(JavaLanguageLevel::JAVA_1_4));
        assert_eq!("7".parse::<JavaLanguageLevel>(), Ok(JavaLanguageLevel::JAVA_1_7));
        assert_eq!("17".parse::<JavaLanguageLevel>(), Ok(JavaLanguageLevel::JAVA_1_8));
        assert!("1.2".parse::<JavaLanguageLevel>().is_err());
        assert!("latest".parse::<JavaLanguageLevel>().is_err());
    }

    #[test]
    fn feature_thresholds() {
        assert!(!JavaLanguageLevel::JAVA_1_3.is_enabled(JavaFeature::Assertions));
        assert!(JavaLanguageLevel::JAVA_1_4.is_enabled(JavaFeature::Assertions));
        assert!(!JavaLanguageLevel::JAVA_1_4.supports_generics());
        assert!(JavaLanguageLevel::JAVA_1_5.supports_annotations());
        assert!(!JavaLanguageLevel::JAVA_1_6.is_enabled(JavaFeature::MultiCatch));
        assert!(JavaLanguageLevel::JAVA_1_8.supports_lambdas());
        assert_eq!(JavaLanguageLevel::JAVA_1_5.to_string(), "1.5");
    }
}

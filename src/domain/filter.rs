use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

macro_rules! facet {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Code sent to the news API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let known: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "Unknown {} '{}'. Expected one of: {}",
                            stringify!($name).to_lowercase(),
                            s,
                            known.join(", ")
                        )
                    })
            }
        }
    };
}

facet!(
    /// Top-headlines category.
    Category {
        Business => "business",
        Entertainment => "entertainment",
        General => "general",
        Health => "health",
        Science => "science",
        Sports => "sports",
        Technology => "technology",
    }
);

facet!(
    /// News source identifier.
    Source {
        Cnn => "cnn",
        BbcNews => "bbc-news",
    }
);

facet!(
    /// ISO 3166-1 country code.
    Country {
        UnitedStates => "us",
        UnitedKingdom => "gb",
        Finland => "fi",
        Germany => "de",
    }
);

facet!(
    /// ISO 639-1 language code.
    Language {
        English => "en",
        French => "fr",
        Spanish => "es",
    }
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// ISO-8601 date of the lower bound, `None` when unbounded.
    pub fn from_param(&self) -> Option<String> {
        self.from.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn to_param(&self) -> Option<String> {
        self.to.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// A search query plus optional filter facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilterState {
    pub keyword: String,
    pub category: Option<Category>,
    pub source: Option<Source>,
    pub country: Option<Country>,
    pub language: Option<Language>,
    pub date_range: DateRange,
}

impl SearchFilterState {
    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    /// Fresh filter state for a new entry session: the keyword always starts
    /// empty, facets are copied from `saved` when given.
    pub fn seeded(saved: Option<&SearchFilterState>) -> Self {
        match saved {
            Some(saved) => Self {
                keyword: String::new(),
                category: saved.category,
                source: saved.source,
                country: saved.country,
                language: saved.language,
                date_range: saved.date_range,
            },
            None => Self::default(),
        }
    }

    /// Reset facets when the filter screen regains focus. The keyword the
    /// user has typed so far is kept.
    pub fn reset(&mut self, saved: Option<&SearchFilterState>) {
        let keyword = std::mem::take(&mut self.keyword);
        *self = Self::seeded(saved);
        self.keyword = keyword;
    }

    /// Trimmed keyword, `None` when blank.
    pub fn keyword(&self) -> Option<&str> {
        let trimmed = self.keyword.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Facets that select the top-headlines endpoint.
    pub fn has_headline_facets(&self) -> bool {
        self.category.is_some() || self.country.is_some()
    }

    /// Facets that select the everything endpoint.
    pub fn has_everything_facets(&self) -> bool {
        self.source.is_some() || self.language.is_some() || self.keyword().is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_headline_facets() && !self.has_everything_facets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_codes_round_trip_through_from_str() {
        assert_eq!("bbc-news".parse::<Source>().unwrap(), Source::BbcNews);
        assert_eq!(" Business ".parse::<Category>().unwrap(), Category::Business);
        assert_eq!(Country::UnitedKingdom.to_string(), "gb");
    }

    #[test]
    fn test_unknown_facet_lists_choices() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(err.contains("en, fr, es"));
    }

    #[test]
    fn test_seeded_copies_facets_and_clears_keyword() {
        let saved = SearchFilterState {
            keyword: "old".into(),
            category: Some(Category::Health),
            country: Some(Country::Finland),
            ..Default::default()
        };
        let state = SearchFilterState::seeded(Some(&saved));
        assert_eq!(state.keyword, "");
        assert_eq!(state.category, Some(Category::Health));
        assert_eq!(state.country, Some(Country::Finland));
        assert_eq!(SearchFilterState::seeded(None), SearchFilterState::default());
    }

    #[test]
    fn test_reset_keeps_keyword() {
        let mut state = SearchFilterState::with_keyword("climate");
        state.language = Some(Language::French);
        state.reset(None);
        assert_eq!(state.keyword, "climate");
        assert_eq!(state.language, None);
    }

    #[test]
    fn test_blank_keyword_is_not_a_facet() {
        let state = SearchFilterState::with_keyword("   ");
        assert_eq!(state.keyword(), None);
        assert!(state.is_empty());
    }

    #[test]
    fn test_date_params_are_iso_dates() {
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2024, 3, 1),
            to: None,
        };
        assert_eq!(range.from_param(), Some("2024-03-01".to_string()));
        assert_eq!(range.to_param(), None);
    }

    #[test]
    fn test_deserialize_saved_filters() {
        let json = r#"{"category":"sports","dateRange":{"from":"2024-01-05","to":null}}"#;
        let state: SearchFilterState = serde_json::from_str(json).unwrap();
        assert_eq!(state.category, Some(Category::Sports));
        assert_eq!(state.date_range.from, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(state.keyword, "");
    }
}

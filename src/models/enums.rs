use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Generates a closed enum with its wire name, optional input aliases,
/// `as_str` and a case-insensitive `FromStr`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $s $(, alias = $alias)*)]
                $variant
            ),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($s $(| $alias)* => Ok(Self::$variant)),+,
                    _ => Err(ValidationError::InvalidEnum {
                        field: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

str_enum!(TimeOfDay {
    Morning => "morning",
    Afternoon => "afternoon",
    Night => "night",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(Diet {
    Vegetarian => "vegetarian" | "veg",
    NonVegetarian => "non-vegetarian" | "non-veg",
    Vegan => "vegan",
});

str_enum!(ChatRole {
    User => "user",
    Assistant => "assistant",
});

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Night];

    /// Slot a wall-clock hour falls into. Early hours belong to the night dose.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Night,
        }
    }
}

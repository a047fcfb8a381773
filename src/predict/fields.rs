// src/predict/fields.rs — The sixteen inputs of a prediction request.

/// How a free-text numeric entry is coerced before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Float,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Budget,
    Clicks,
    Ctr,
    Cpc,
    Conversions,
    Cpa,
    ConversionRate,
    Duration,
    Revenue,
    Spend,
    Impressions,
}

impl NumericField {
    pub const ALL: [NumericField; 11] = [
        NumericField::Budget,
        NumericField::Clicks,
        NumericField::Ctr,
        NumericField::Cpc,
        NumericField::Conversions,
        NumericField::Cpa,
        NumericField::ConversionRate,
        NumericField::Duration,
        NumericField::Revenue,
        NumericField::Spend,
        NumericField::Impressions,
    ];

    /// Key in the `/predict` request body.
    pub fn key(&self) -> &'static str {
        match self {
            NumericField::Budget => "Budget",
            NumericField::Clicks => "Clicks",
            NumericField::Ctr => "CTR",
            NumericField::Cpc => "CPC",
            NumericField::Conversions => "Conversions",
            NumericField::Cpa => "CPA",
            NumericField::ConversionRate => "Conversion_Rate",
            NumericField::Duration => "Duration",
            NumericField::Revenue => "Revenue",
            NumericField::Spend => "Spend",
            NumericField::Impressions => "Impressions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NumericField::Ctr => "CTR (%)",
            NumericField::ConversionRate => "Conversion Rate (%)",
            NumericField::Duration => "Duration (days)",
            other => other.key(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            NumericField::Budget => "e.g. 10000",
            NumericField::Clicks => "e.g. 1200",
            NumericField::Ctr => "e.g. 2.5",
            NumericField::Cpc => "e.g. 1.2",
            NumericField::Conversions => "e.g. 60",
            NumericField::Cpa => "e.g. 24",
            NumericField::ConversionRate => "e.g. 5.0",
            NumericField::Duration => "e.g. 30",
            NumericField::Revenue => "e.g. 10000",
            NumericField::Spend => "e.g. 1400",
            NumericField::Impressions => "e.g. 48000",
        }
    }

    pub fn kind(&self) -> NumberKind {
        match self {
            NumericField::Clicks
            | NumericField::Conversions
            | NumericField::Duration
            | NumericField::Impressions => NumberKind::Integer,
            _ => NumberKind::Float,
        }
    }

    pub fn index(&self) -> usize {
        NumericField::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Platform,
    ContentType,
    TargetAge,
    TargetGender,
    Region,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Platform,
        CategoricalField::ContentType,
        CategoricalField::TargetAge,
        CategoricalField::TargetGender,
        CategoricalField::Region,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CategoricalField::Platform => "Platform",
            CategoricalField::ContentType => "Content_Type",
            CategoricalField::TargetAge => "Target_Age",
            CategoricalField::TargetGender => "Target_Gender",
            CategoricalField::Region => "Region",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoricalField::Platform => "Platform",
            CategoricalField::ContentType => "Content Type",
            CategoricalField::TargetAge => "Target Age",
            CategoricalField::TargetGender => "Target Gender",
            CategoricalField::Region => "Region",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            CategoricalField::Platform => "Select platform",
            CategoricalField::ContentType => "Select content",
            CategoricalField::TargetAge => "Select age group",
            CategoricalField::TargetGender => "Select gender",
            CategoricalField::Region => "Select region",
        }
    }

    /// The closed set of values the form offers.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            CategoricalField::Platform => {
                &["Facebook", "Google", "Instagram", "LinkedIn", "Twitter"]
            }
            CategoricalField::ContentType => &["Video", "Image", "Text", "Carousel"],
            CategoricalField::TargetAge => &["18-24", "25-34", "35-44", "45-54", "55+"],
            CategoricalField::TargetGender => &["All", "Male", "Female"],
            CategoricalField::Region => &[
                "Asia",
                "Europe",
                "North America",
                "South America",
                "Africa",
                "Oceania",
            ],
        }
    }

    /// Look up an option by exact or case-insensitive match.
    pub fn parse_option(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.options()
            .iter()
            .find(|o| o.eq_ignore_ascii_case(value))
            .copied()
    }

    pub fn index(&self) -> usize {
        CategoricalField::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or(0)
    }
}

/// Any form input, in on-screen order: numerics first, then selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl FormField {
    pub const COUNT: usize = NumericField::ALL.len() + CategoricalField::ALL.len();

    pub fn at(position: usize) -> FormField {
        let n = NumericField::ALL.len();
        let position = position % Self::COUNT;
        if position < n {
            FormField::Numeric(NumericField::ALL[position])
        } else {
            FormField::Categorical(CategoricalField::ALL[position - n])
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Numeric(f) => f.label(),
            FormField::Categorical(f) => f.label(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Numeric(f) => f.placeholder(),
            FormField::Categorical(f) => f.placeholder(),
        }
    }
}

// src/cli/mod.rs — CLI definition (clap derive)

pub mod load;
pub mod predict;

use clap::{Args, Parser, Subcommand};

use crate::predict::{CategoricalField, NumericField, PredictionRequest};

#[derive(Parser)]
#[command(
    name = "roas-dash",
    about = "Terminal dashboard for a ROAS prediction backend",
    version
)]
pub struct Cli {
    /// Backend base URL to connect to on launch (not persisted)
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI dashboard (default)
    Dashboard {
        /// Backend base URL to connect to on launch
        #[arg(long)]
        url: Option<String>,
    },
    /// Load the dataset once and print metrics and top features
    Load {
        /// Backend base URL (prompted for when omitted)
        url: Option<String>,
        /// Print the loaded dataset as JSON
        #[arg(long)]
        json: bool,
    },
    /// Request a single ROAS prediction
    Predict {
        /// Backend base URL (prompted for when omitted)
        url: Option<String>,
        #[command(flatten)]
        inputs: PredictArgs,
    },
}

/// Prediction inputs as free text. Anything that does not parse as a
/// number is sent as 0, as in the dashboard form.
#[derive(Args, Debug, Clone, Default)]
pub struct PredictArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub budget: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub clicks: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub ctr: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cpc: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub conversions: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cpa: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub conversion_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub revenue: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub spend: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub impressions: Option<String>,

    /// Facebook, Google, Instagram, LinkedIn or Twitter
    #[arg(long)]
    pub platform: Option<String>,
    /// Video, Image, Text or Carousel
    #[arg(long)]
    pub content_type: Option<String>,
    /// 18-24, 25-34, 35-44, 45-54 or 55+
    #[arg(long)]
    pub target_age: Option<String>,
    /// All, Male or Female
    #[arg(long)]
    pub target_gender: Option<String>,
    /// Asia, Europe, North America, South America, Africa or Oceania
    #[arg(long)]
    pub region: Option<String>,
}

impl PredictArgs {
    fn numeric(&self, field: NumericField) -> Option<&str> {
        let value = match field {
            NumericField::Budget => &self.budget,
            NumericField::Clicks => &self.clicks,
            NumericField::Ctr => &self.ctr,
            NumericField::Cpc => &self.cpc,
            NumericField::Conversions => &self.conversions,
            NumericField::Cpa => &self.cpa,
            NumericField::ConversionRate => &self.conversion_rate,
            NumericField::Duration => &self.duration,
            NumericField::Revenue => &self.revenue,
            NumericField::Spend => &self.spend,
            NumericField::Impressions => &self.impressions,
        };
        value.as_deref()
    }

    fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Platform => &self.platform,
            CategoricalField::ContentType => &self.content_type,
            CategoricalField::TargetAge => &self.target_age,
            CategoricalField::TargetGender => &self.target_gender,
            CategoricalField::Region => &self.region,
        };
        value.as_deref()
    }

    /// Build the request body. Categorical values that name one of the
    /// form's options (case-insensitive) take its spelling; anything else is
    /// sent as entered for the backend to judge. Omitted ones are sent empty.
    pub fn to_request(&self) -> PredictionRequest {
        let categorical = CategoricalField::ALL.into_iter().filter_map(|field| {
            let raw = self.categorical(field)?;
            let value: &str = match field.parse_option(raw) {
                Some(option) => option,
                None => {
                    tracing::warn!(
                        "{} '{}' is not one of: {}",
                        field.label(),
                        raw,
                        field.options().join(", ")
                    );
                    raw
                }
            };
            Some((field, value))
        });

        let numeric = NumericField::ALL
            .into_iter()
            .filter_map(|field| self.numeric(field).map(|raw| (field, raw)));

        PredictionRequest::from_entries(numeric, categorical)
    }
}

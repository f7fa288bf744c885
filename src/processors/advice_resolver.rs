use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::utils::constants::LABEL_SEPARATOR;

pub const UNKNOWN_ADVICE: &str = "❓ Unknown advice.";

/// Crop-agnostic recommendation categories the classifiers are trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceAction {
    PlantNow,
    PlantButPrepareForDrySpell,
    DelayPlantingDrought,
    MonitorConditions,
}

impl AdviceAction {
    pub const ALL: [AdviceAction; 4] = [
        AdviceAction::PlantNow,
        AdviceAction::PlantButPrepareForDrySpell,
        AdviceAction::DelayPlantingDrought,
        AdviceAction::MonitorConditions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AdviceAction::PlantNow => "plant_now",
            AdviceAction::PlantButPrepareForDrySpell => "plant_but_prepare_for_dry_spell",
            AdviceAction::DelayPlantingDrought => "delay_planting_drought",
            AdviceAction::MonitorConditions => "monitor_conditions",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            AdviceAction::PlantNow => {
                "✅ Good time to plant {crop}! Recent rain ({rain}mm) and warm soil."
            }
            AdviceAction::PlantButPrepareForDrySpell => {
                "🌱 Plant {crop} now, but prepare for dry spell in next week."
            }
            AdviceAction::DelayPlantingDrought => {
                "⚠️ Delay planting {crop} — drought conditions expected."
            }
            AdviceAction::MonitorConditions => "🔍 Keep monitoring {crop} — no clear signal yet.",
        }
    }
}

impl fmt::Display for AdviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AdviceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdviceAction::ALL
            .into_iter()
            .find(|action| action.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A classifier label split into `<action_key>_<crop>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLabel<'a> {
    pub action_key: &'a str,
    pub crop: &'a str,
}

/// Why a label did not resolve to a known action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownAdviceLabel {
    /// Fewer than two underscore-delimited tokens.
    Malformed(String),
    /// Well-formed, but the action key is not in the vocabulary.
    UnknownAction(String),
}

impl fmt::Display for UnknownAdviceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownAdviceLabel::Malformed(label) => {
                write!(f, "label '{}' is not of the form <action>_<crop>", label)
            }
            UnknownAdviceLabel::UnknownAction(label) => {
                write!(f, "label '{}' has an unknown action key", label)
            }
        }
    }
}

impl<'a> ActionLabel<'a> {
    pub fn parse(label: &'a str) -> Result<Self, UnknownAdviceLabel> {
        match label.rsplit_once(LABEL_SEPARATOR) {
            Some((action_key, crop)) if !action_key.is_empty() && !crop.is_empty() => {
                Ok(Self { action_key, crop })
            }
            _ => Err(UnknownAdviceLabel::Malformed(label.to_string())),
        }
    }
}

/// Maps classifier labels to rendered advice text.
#[derive(Debug, Clone)]
pub struct AdviceResolver {
    templates: HashMap<&'static str, &'static str>,
}

impl AdviceResolver {
    pub fn new() -> Self {
        Self {
            templates: AdviceAction::ALL
                .into_iter()
                .map(|action| (action.key(), action.template()))
                .collect(),
        }
    }

    /// Resolve to a known action, or report why the label is unusable.
    pub fn action_for(&self, raw_label: &str) -> Result<AdviceAction, UnknownAdviceLabel> {
        let label = ActionLabel::parse(raw_label)?;
        label
            .action_key
            .parse()
            .map_err(|_| UnknownAdviceLabel::UnknownAction(raw_label.to_string()))
    }

    /// Render the advice for `raw_label`. Never fails: unusable labels yield
    /// [`UNKNOWN_ADVICE`].
    pub fn resolve(&self, raw_label: &str, crop: &str, rain_3d: f64) -> String {
        let label = match ActionLabel::parse(raw_label) {
            Ok(label) => label,
            Err(err) => {
                warn!("{}", err);
                return UNKNOWN_ADVICE.to_string();
            }
        };

        if label.crop != crop {
            warn!(
                label = raw_label,
                crop, "classifier label crop suffix does not match requested crop"
            );
        }

        match self.templates.get(label.action_key) {
            Some(template) => render(template, crop, rain_3d),
            None => {
                warn!("{}", UnknownAdviceLabel::UnknownAction(raw_label.to_string()));
                UNKNOWN_ADVICE.to_string()
            }
        }
    }
}

impl Default for AdviceResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn render(template: &str, crop: &str, rain_3d: f64) -> String {
    template
        .replace("{crop}", crop)
        .replace("{rain}", &format!("{:.1}", rain_3d))
}

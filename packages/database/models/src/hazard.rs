//! FEMA National Risk Index county rows and the hazard catalog.
//!
//! Per-hazard ratings are accessed through the typed [`HazardKey`] catalog
//! rather than by string column name, so every hazard a card can render is
//! known at compile time.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An NRI county row from `nri_counties`.
///
/// Ratings are free-form strings from the source data ("Very Low",
/// "Relatively Moderate", "No Rating", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HazardRow {
    /// Full state name.
    pub state: Option<String>,
    /// Two-letter state abbreviation.
    pub stateabbrv: Option<String>,
    /// County name.
    pub county: Option<String>,
    /// Administrative unit type.
    pub countytype: Option<String>,
    /// NRI record identifier.
    pub nri_id: Option<String>,

    /// County population.
    pub population: Option<f64>,
    /// Building value exposure in dollars.
    pub buildvalue: Option<f64>,
    /// Agricultural value exposure in dollars.
    pub agrivalue: Option<f64>,
    /// County area in square miles.
    pub area: Option<f64>,

    /// Composite risk value in dollars.
    pub risk_value: Option<f64>,
    /// Composite risk score.
    pub risk_score: Option<f64>,
    /// Composite risk rating.
    pub risk_ratng: Option<String>,
    /// Composite risk percentile.
    pub risk_spctl: Option<f64>,

    /// Expected annual loss score.
    pub eal_score: Option<f64>,
    /// Expected annual loss rating.
    pub eal_ratng: Option<String>,
    /// Expected annual loss percentile.
    pub eal_spctl: Option<f64>,

    /// Social vulnerability score.
    pub sovi_score: Option<f64>,
    /// Social vulnerability rating.
    pub sovi_ratng: Option<String>,
    /// Social vulnerability percentile.
    pub sovi_spctl: Option<f64>,

    /// Community resilience score.
    pub resl_score: Option<f64>,
    /// Community resilience rating.
    pub resl_ratng: Option<String>,
    /// Community resilience percentile.
    pub resl_spctl: Option<f64>,

    /// Riverine flood rating.
    pub rfld_riskr: Option<String>,
    /// Coastal surge rating.
    pub cfld_riskr: Option<String>,
    /// Earthquake rating.
    pub erqk_riskr: Option<String>,
    /// Hurricane rating.
    pub hrcn_riskr: Option<String>,
    /// Tornado rating.
    pub trnd_riskr: Option<String>,
    /// Wildfire rating.
    pub wfir_riskr: Option<String>,
    /// Drought rating.
    pub drgt_riskr: Option<String>,
    /// Extreme heat rating.
    pub hwav_riskr: Option<String>,
    /// Landslide rating.
    pub lnds_riskr: Option<String>,
    /// Severe winter weather rating.
    pub wntw_riskr: Option<String>,
    /// Avalanche rating.
    pub avln_riskr: Option<String>,
    /// Coastal wave rating.
    pub cwav_riskr: Option<String>,
    /// Hail rating.
    pub hail_riskr: Option<String>,
    /// Ice storm rating.
    pub isth_riskr: Option<String>,
    /// Lightning rating.
    pub ltng_riskr: Option<String>,
    /// Strong wind rating.
    pub swnd_riskr: Option<String>,
    /// Tsunami rating.
    pub tsun_riskr: Option<String>,
    /// Volcanic activity rating.
    pub vlcn_riskr: Option<String>,
}

impl HazardRow {
    /// Rating for one hazard from the catalog.
    #[must_use]
    pub fn rating(&self, key: HazardKey) -> Option<&str> {
        let field = match key {
            HazardKey::RiverineFlood => &self.rfld_riskr,
            HazardKey::CoastalSurge => &self.cfld_riskr,
            HazardKey::Earthquake => &self.erqk_riskr,
            HazardKey::Hurricane => &self.hrcn_riskr,
            HazardKey::Tornado => &self.trnd_riskr,
            HazardKey::Wildfire => &self.wfir_riskr,
            HazardKey::Drought => &self.drgt_riskr,
            HazardKey::ExtremeHeat => &self.hwav_riskr,
            HazardKey::Landslide => &self.lnds_riskr,
            HazardKey::SevereWinterWeather => &self.wntw_riskr,
            HazardKey::Avalanche => &self.avln_riskr,
            HazardKey::CoastalWave => &self.cwav_riskr,
            HazardKey::Hail => &self.hail_riskr,
            HazardKey::IceStorm => &self.isth_riskr,
            HazardKey::Lightning => &self.ltng_riskr,
            HazardKey::StrongWind => &self.swnd_riskr,
            HazardKey::Tsunami => &self.tsun_riskr,
            HazardKey::VolcanicActivity => &self.vlcn_riskr,
        };
        field.as_deref()
    }

    /// Iterates the full hazard catalog with this row's ratings.
    pub fn ratings(&self) -> impl Iterator<Item = (HazardKey, Option<&str>)> {
        HazardKey::ALL.iter().map(|&key| (key, self.rating(key)))
    }
}

/// The fixed per-hazard catalog.
///
/// Drives card iteration: column, display name, and icon are all static,
/// so there is no runtime property lookup by string key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardKey {
    /// Riverine flood.
    RiverineFlood,
    /// Coastal surge.
    CoastalSurge,
    /// Earthquake.
    Earthquake,
    /// Hurricane.
    Hurricane,
    /// Tornado.
    Tornado,
    /// Wildfire.
    Wildfire,
    /// Drought.
    Drought,
    /// Extreme heat.
    ExtremeHeat,
    /// Landslide.
    Landslide,
    /// Severe winter weather.
    SevereWinterWeather,
    /// Avalanche.
    Avalanche,
    /// Coastal wave.
    CoastalWave,
    /// Hail.
    Hail,
    /// Ice storm.
    IceStorm,
    /// Lightning.
    Lightning,
    /// Strong wind.
    StrongWind,
    /// Tsunami.
    Tsunami,
    /// Volcanic activity.
    VolcanicActivity,
}

impl HazardKey {
    /// Every hazard, in card display order.
    pub const ALL: &[Self] = &[
        Self::RiverineFlood,
        Self::CoastalSurge,
        Self::Earthquake,
        Self::Hurricane,
        Self::Tornado,
        Self::Wildfire,
        Self::Drought,
        Self::ExtremeHeat,
        Self::Landslide,
        Self::SevereWinterWeather,
        Self::Avalanche,
        Self::CoastalWave,
        Self::Hail,
        Self::IceStorm,
        Self::Lightning,
        Self::StrongWind,
        Self::Tsunami,
        Self::VolcanicActivity,
    ];

    /// Store column carrying this hazard's rating.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::RiverineFlood => "rfld_riskr",
            Self::CoastalSurge => "cfld_riskr",
            Self::Earthquake => "erqk_riskr",
            Self::Hurricane => "hrcn_riskr",
            Self::Tornado => "trnd_riskr",
            Self::Wildfire => "wfir_riskr",
            Self::Drought => "drgt_riskr",
            Self::ExtremeHeat => "hwav_riskr",
            Self::Landslide => "lnds_riskr",
            Self::SevereWinterWeather => "wntw_riskr",
            Self::Avalanche => "avln_riskr",
            Self::CoastalWave => "cwav_riskr",
            Self::Hail => "hail_riskr",
            Self::IceStorm => "isth_riskr",
            Self::Lightning => "ltng_riskr",
            Self::StrongWind => "swnd_riskr",
            Self::Tsunami => "tsun_riskr",
            Self::VolcanicActivity => "vlcn_riskr",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::RiverineFlood => "Riverine Flood",
            Self::CoastalSurge => "Coastal Surge",
            Self::Earthquake => "Earthquake",
            Self::Hurricane => "Hurricane",
            Self::Tornado => "Tornado",
            Self::Wildfire => "Wildfire",
            Self::Drought => "Drought",
            Self::ExtremeHeat => "Extreme Heat",
            Self::Landslide => "Landslide",
            Self::SevereWinterWeather => "Severe Winter Weather",
            Self::Avalanche => "Avalanche",
            Self::CoastalWave => "Coastal Wave",
            Self::Hail => "Hail",
            Self::IceStorm => "Ice Storm",
            Self::Lightning => "Lightning",
            Self::StrongWind => "Strong Wind",
            Self::Tsunami => "Tsunami",
            Self::VolcanicActivity => "Volcanic Activity",
        }
    }

    /// Display icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::RiverineFlood | Self::CoastalSurge | Self::CoastalWave | Self::Tsunami => "🌊",
            Self::Earthquake | Self::VolcanicActivity => "🌋",
            Self::Hurricane => "🌀",
            Self::Tornado => "🌪️",
            Self::Wildfire => "🔥",
            Self::Drought => "☀️",
            Self::ExtremeHeat => "🌡️",
            Self::Landslide | Self::Avalanche => "🏔️",
            Self::SevereWinterWeather => "❄️",
            Self::Hail | Self::IceStorm => "🧊",
            Self::Lightning => "⚡",
            Self::StrongWind => "💨",
        }
    }
}

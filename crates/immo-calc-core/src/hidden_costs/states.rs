use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// Transfer tax applied when a state code is not recognised.
pub const DEFAULT_TRANSFER_TAX_RATE: Percent = dec!(5.0);

/// The sixteen German federal states (Bundesländer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    #[serde(rename = "BY")]
    Bavaria,
    #[serde(rename = "BE")]
    Berlin,
    #[serde(rename = "BB")]
    Brandenburg,
    #[serde(rename = "HB")]
    Bremen,
    #[serde(rename = "HH")]
    Hamburg,
    #[serde(rename = "HE")]
    Hesse,
    #[serde(rename = "MV")]
    MecklenburgVorpommern,
    #[serde(rename = "NI")]
    LowerSaxony,
    #[serde(rename = "NW")]
    NorthRhineWestphalia,
    #[serde(rename = "RP")]
    RhinelandPalatinate,
    #[serde(rename = "SL")]
    Saarland,
    #[serde(rename = "SN")]
    Saxony,
    #[serde(rename = "ST")]
    SaxonyAnhalt,
    #[serde(rename = "SH")]
    SchleswigHolstein,
    #[serde(rename = "TH")]
    Thuringia,
}

impl FederalState {
    pub const ALL: [FederalState; 16] = [
        FederalState::BadenWuerttemberg,
        FederalState::Bavaria,
        FederalState::Berlin,
        FederalState::Brandenburg,
        FederalState::Bremen,
        FederalState::Hamburg,
        FederalState::Hesse,
        FederalState::MecklenburgVorpommern,
        FederalState::LowerSaxony,
        FederalState::NorthRhineWestphalia,
        FederalState::RhinelandPalatinate,
        FederalState::Saarland,
        FederalState::Saxony,
        FederalState::SaxonyAnhalt,
        FederalState::SchleswigHolstein,
        FederalState::Thuringia,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "BW",
            FederalState::Bavaria => "BY",
            FederalState::Berlin => "BE",
            FederalState::Brandenburg => "BB",
            FederalState::Bremen => "HB",
            FederalState::Hamburg => "HH",
            FederalState::Hesse => "HE",
            FederalState::MecklenburgVorpommern => "MV",
            FederalState::LowerSaxony => "NI",
            FederalState::NorthRhineWestphalia => "NW",
            FederalState::RhinelandPalatinate => "RP",
            FederalState::Saarland => "SL",
            FederalState::Saxony => "SN",
            FederalState::SaxonyAnhalt => "ST",
            FederalState::SchleswigHolstein => "SH",
            FederalState::Thuringia => "TH",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "Baden-Württemberg",
            FederalState::Bavaria => "Bayern",
            FederalState::Berlin => "Berlin",
            FederalState::Brandenburg => "Brandenburg",
            FederalState::Bremen => "Bremen",
            FederalState::Hamburg => "Hamburg",
            FederalState::Hesse => "Hessen",
            FederalState::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            FederalState::LowerSaxony => "Niedersachsen",
            FederalState::NorthRhineWestphalia => "Nordrhein-Westfalen",
            FederalState::RhinelandPalatinate => "Rheinland-Pfalz",
            FederalState::Saarland => "Saarland",
            FederalState::Saxony => "Sachsen",
            FederalState::SaxonyAnhalt => "Sachsen-Anhalt",
            FederalState::SchleswigHolstein => "Schleswig-Holstein",
            FederalState::Thuringia => "Thüringen",
        }
    }

    /// Grunderwerbsteuer rate in percent.
    pub fn transfer_tax_rate(self) -> Percent {
        match self {
            FederalState::BadenWuerttemberg => dec!(5.0),
            FederalState::Bavaria => dec!(3.5),
            FederalState::Berlin => dec!(6.0),
            FederalState::Brandenburg => dec!(6.5),
            FederalState::Bremen => dec!(5.0),
            FederalState::Hamburg => dec!(5.5),
            FederalState::Hesse => dec!(6.0),
            FederalState::MecklenburgVorpommern => dec!(6.0),
            FederalState::LowerSaxony => dec!(5.0),
            FederalState::NorthRhineWestphalia => dec!(6.5),
            FederalState::RhinelandPalatinate => dec!(5.0),
            FederalState::Saarland => dec!(6.5),
            FederalState::Saxony => dec!(5.5),
            FederalState::SaxonyAnhalt => dec!(5.0),
            FederalState::SchleswigHolstein => dec!(6.5),
            FederalState::Thuringia => dec!(5.0),
        }
    }

    /// Case-insensitive lookup by two-letter code.
    pub fn from_code(code: &str) -> Option<FederalState> {
        let code = code.trim();
        FederalState::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for FederalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Transfer tax rate for a state code, falling back to
/// [`DEFAULT_TRANSFER_TAX_RATE`] for unknown codes.
pub fn transfer_tax_rate(code: &str) -> Percent {
    FederalState::from_code(code)
        .map(FederalState::transfer_tax_rate)
        .unwrap_or(DEFAULT_TRANSFER_TAX_RATE)
}

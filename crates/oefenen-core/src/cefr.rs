//! CEFR proficiency levels used to tag exercise difficulty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A level on the Common European Framework of Reference scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// The three broad user groups the six levels fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CefrBand {
    Basic,
    Independent,
    Proficient,
}

impl fmt::Display for CefrBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefrBand::Basic => write!(f, "basisgebruiker"),
            CefrBand::Independent => write!(f, "onafhankelijke gebruiker"),
            CefrBand::Proficient => write!(f, "vaardige gebruiker"),
        }
    }
}

impl CefrLevel {
    /// All levels in ascending order.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn band(&self) -> CefrBand {
        match self {
            CefrLevel::A1 | CefrLevel::A2 => CefrBand::Basic,
            CefrLevel::B1 | CefrLevel::B2 => CefrBand::Independent,
            CefrLevel::C1 | CefrLevel::C2 => CefrBand::Proficient,
        }
    }

    /// Short can-do statement for the level.
    pub fn descriptor(&self) -> &'static str {
        match self {
            CefrLevel::A1 => {
                "Je begrijpt en gebruikt vertrouwde, alledaagse uitdrukkingen en heel eenvoudige zinnen."
            }
            CefrLevel::A2 => {
                "Je begrijpt zinnen over directe onderwerpen zoals familie, winkelen en werk, en kunt eenvoudige routinetaken uitvoeren."
            }
            CefrLevel::B1 => {
                "Je begrijpt de hoofdpunten van duidelijke standaardtaal over bekende zaken en kunt je redden op reis."
            }
            CefrLevel::B2 => {
                "Je begrijpt de hoofdgedachte van complexe teksten en kunt vlot en spontaan communiceren met moedertaalsprekers."
            }
            CefrLevel::C1 => {
                "Je begrijpt veeleisende, lange teksten en kunt je vloeiend en spontaan uitdrukken zonder veel naar woorden te zoeken."
            }
            CefrLevel::C2 => {
                "Je begrijpt vrijwel alles wat je hoort of leest en kunt je zeer vloeiend en precies uitdrukken."
            }
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefrLevel::A1 => write!(f, "A1"),
            CefrLevel::A2 => write!(f, "A2"),
            CefrLevel::B1 => write!(f, "B1"),
            CefrLevel::B2 => write!(f, "B2"),
            CefrLevel::C1 => write!(f, "C1"),
            CefrLevel::C2 => write!(f, "C2"),
        }
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("unknown CEFR level: {other}")),
        }
    }
}

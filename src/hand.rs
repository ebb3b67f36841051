use std::fmt;
use std::str::FromStr;

use log::warn;
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Seat {
    /// Dealer
    Oya,
    Ko,
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, clap::ValueEnum)]
pub enum WinningMethod {
    Ron,
    Tsumo,
}

impl WinningMethod {
    pub fn flip(self) -> Self {
        match self {
            WinningMethod::Ron => WinningMethod::Tsumo,
            WinningMethod::Tsumo => WinningMethod::Ron,
        }
    }
}

#[derive(
    Debug,
    Default,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Copy,
    Clone,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Machi {
    #[default]
    Ryanmen,
    Kanchan,
    Penchan,
    Tanki,
    Shanpon,
}

#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum MentsuKind {
    #[default]
    Shuntsu,
    Kootsu,
    Kantsu,
}

#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Mentsu {
    pub kind: MentsuKind,
    pub is_open: bool,
    /// Terminal or honor tiles
    pub is_yaochuu: bool,
}

impl Mentsu {
    pub const CLOSED_SHUNTSU: Mentsu = Mentsu {
        kind: MentsuKind::Shuntsu,
        is_open: false,
        is_yaochuu: false,
    };

    pub fn new(kind: MentsuKind, is_open: bool, is_yaochuu: bool) -> Self {
        Self {
            kind,
            is_open,
            is_yaochuu,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum ParseMentsuError {
    EmptyString,
    UnknownKind { kind: String },
    UnknownFlag { flag: String },
}

impl fmt::Display for ParseMentsuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMentsuError::EmptyString => write!(f, "empty mentsu"),
            ParseMentsuError::UnknownKind { kind } => write!(
                f,
                "unknown mentsu kind '{kind}' (expected shuntsu, kootsu or kantsu)"
            ),
            ParseMentsuError::UnknownFlag { flag } => write!(
                f,
                "unknown mentsu flag '{flag}' (expected open or yaochuu)"
            ),
        }
    }
}

impl std::error::Error for ParseMentsuError {}

/// Parse `kind[,open][,yaochuu]`, e.g. `pon,open,yaochuu`.
impl FromStr for Mentsu {
    type Err = ParseMentsuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let kind = match parts.next() {
            None | Some("") => return Err(ParseMentsuError::EmptyString),
            Some("shuntsu") | Some("chi") => MentsuKind::Shuntsu,
            Some("kootsu") | Some("pon") => MentsuKind::Kootsu,
            Some("kantsu") | Some("kan") => MentsuKind::Kantsu,
            Some(kind) => {
                return Err(ParseMentsuError::UnknownKind {
                    kind: kind.to_owned(),
                })
            }
        };
        let mut mentsu = Mentsu::new(kind, false, false);
        for flag in parts {
            match flag {
                "open" => mentsu.is_open = true,
                "yaochuu" => mentsu.is_yaochuu = true,
                _ => {
                    return Err(ParseMentsuError::UnknownFlag {
                        flag: flag.to_owned(),
                    })
                }
            }
        }
        Ok(mentsu)
    }
}

#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Atama {
    pub is_yakuhai: bool,
    /// Pair counted twice, e.g. a seat wind that is also the round wind.
    pub is_double_yakuhai: bool,
}

#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone)]
pub struct Modifiers {
    pub pinfu: bool,
    pub tanyao: bool,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Structure {
    Standard {
        mentsu: [Mentsu; 4],
        atama: Atama,
        machi: Machi,
    },
    Chiitoitsu,
}

/// Normalized description of a won hand. Only built through
/// [`HandInput::normalize`].
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct HandDescriptor {
    seat: Seat,
    method: WinningMethod,
    structure: Structure,
    is_menzen: bool,
    modifiers: Modifiers,
    han: u32,
}

impl HandDescriptor {
    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn method(&self) -> WinningMethod {
        self.method
    }

    pub fn is_chiitoitsu(&self) -> bool {
        matches!(self.structure, Structure::Chiitoitsu)
    }

    pub fn is_menzen(&self) -> bool {
        self.is_menzen
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Chiitoitsu always waits on a single tile.
    pub fn machi(&self) -> Machi {
        match &self.structure {
            Structure::Standard { machi, .. } => *machi,
            Structure::Chiitoitsu => Machi::Tanki,
        }
    }

    pub fn atama(&self) -> Atama {
        match &self.structure {
            Structure::Standard { atama, .. } => *atama,
            Structure::Chiitoitsu => Atama::default(),
        }
    }

    pub fn mentsu(&self) -> &[Mentsu] {
        match &self.structure {
            Structure::Standard { mentsu, .. } => mentsu,
            Structure::Chiitoitsu => &[],
        }
    }

    /// 0 means no han was given yet.
    pub fn han(&self) -> u32 {
        self.han
    }

    pub fn with_method(&self, method: WinningMethod) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }
}

/// Raw hand description as typed in by a user, on the command line or in a
/// `.ron` file. Every field is optional.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandInput {
    pub oya: bool,
    pub han: i64,
    pub tsumo: bool,
    pub chiitoitsu: bool,
    pub pinfu: bool,
    pub tanyao: bool,
    pub machi: Machi,
    pub atama: Atama,
    pub mentsu: Vec<Mentsu>,
    /// Set to `Some(false)` for a hand opened only by chi.
    pub menzen: Option<bool>,
}

impl Default for HandInput {
    fn default() -> Self {
        Self {
            oya: false,
            han: 1,
            tsumo: false,
            chiitoitsu: false,
            pinfu: false,
            tanyao: false,
            machi: Machi::Ryanmen,
            atama: Atama::default(),
            mentsu: vec![Mentsu::CLOSED_SHUNTSU; 4],
            menzen: None,
        }
    }
}

impl HandInput {
    pub fn normalize(&self) -> HandDescriptor {
        let seat = if self.oya { Seat::Oya } else { Seat::Ko };
        let method = if self.tsumo {
            WinningMethod::Tsumo
        } else {
            WinningMethod::Ron
        };
        let han = if self.han < 0 {
            warn!("Negative han {} treated as no han", self.han);
            0
        } else {
            u32::try_from(self.han).unwrap_or(u32::MAX)
        };

        if self.chiitoitsu {
            if self.pinfu {
                warn!("Pinfu cannot be combined with chiitoitsu, ignored");
            }
            if self.menzen == Some(false) {
                warn!("Chiitoitsu is always a closed hand");
            }
            return HandDescriptor {
                seat,
                method,
                structure: Structure::Chiitoitsu,
                is_menzen: true,
                modifiers: Modifiers {
                    pinfu: false,
                    tanyao: self.tanyao,
                },
                han,
            };
        }

        if self.mentsu.len() > 4 {
            warn!(
                "{} mentsu given, only the first 4 are used",
                self.mentsu.len()
            );
        }
        let mut mentsu = [Mentsu::CLOSED_SHUNTSU; 4];
        for (slot, m) in mentsu.iter_mut().zip(&self.mentsu) {
            *slot = *m;
        }

        let mut atama = self.atama;
        let mut machi = self.machi;
        for m in mentsu.iter_mut() {
            if self.pinfu && *m != Mentsu::CLOSED_SHUNTSU {
                warn!("Pinfu requires closed shuntsu, {:?} replaced", m);
                *m = Mentsu::CLOSED_SHUNTSU;
            }
            if m.kind == MentsuKind::Shuntsu {
                m.is_open = false;
                m.is_yaochuu = false;
            }
            if self.tanyao {
                m.is_yaochuu = false;
            }
        }
        if self.pinfu && machi != Machi::Ryanmen {
            warn!("Pinfu requires a ryanmen wait, {:?} replaced", machi);
            machi = Machi::Ryanmen;
        }
        if (self.pinfu || self.tanyao) && (atama.is_yakuhai || atama.is_double_yakuhai) {
            warn!("Pinfu or tanyao hands cannot have a yakuhai pair");
            atama = Atama::default();
        }
        if atama.is_double_yakuhai {
            atama.is_yakuhai = true;
        }

        let is_menzen = if self.pinfu {
            true
        } else {
            mentsu.iter().all(|m| !m.is_open) && self.menzen != Some(false)
        };

        HandDescriptor {
            seat,
            method,
            structure: Structure::Standard {
                mentsu,
                atama,
                machi,
            },
            is_menzen,
            modifiers: Modifiers {
                pinfu: self.pinfu,
                tanyao: self.tanyao,
            },
            han,
        }
    }
}

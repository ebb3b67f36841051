use std::fmt;

use log::debug;

use super::hand::{HandDescriptor, Machi, Mentsu, MentsuKind, WinningMethod};

const FUUTEI: u32 = 20;
const CHIITOITSU_FU: u32 = 25;
const PINFU_TSUMO_FU: u32 = 20;

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum FuSpecial {
    Chiitoitsu,
    PinfuTsumo,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct FuBreakdown {
    pub fuutei: u32,
    /// Menzen ron or tsumo
    pub agari: u32,
    pub machi: u32,
    pub atama: u32,
    pub mentsu: [u32; 4],
    pub special: Option<FuSpecial>,
    pub unrounded: u32,
    pub rounded: u32,
}

impl FuBreakdown {
    fn special(special: FuSpecial, fu: u32) -> Self {
        Self {
            fuutei: FUUTEI,
            agari: 0,
            machi: 0,
            atama: 0,
            mentsu: [0; 4],
            special: Some(special),
            unrounded: fu,
            rounded: fu,
        }
    }
}

/// Round up to the next decade. 25 fu (chiitoitsu) is kept as is.
pub fn round_up_fu(fu: u32) -> u32 {
    if fu == CHIITOITSU_FU {
        fu
    } else {
        ((fu + 9) / 10) * 10
    }
}

pub fn mentsu_fu(mentsu: &Mentsu) -> u32 {
    let base = match mentsu.kind {
        MentsuKind::Shuntsu => return 0,
        MentsuKind::Kootsu => {
            if mentsu.is_yaochuu {
                8
            } else {
                4
            }
        }
        MentsuKind::Kantsu => {
            if mentsu.is_yaochuu {
                32
            } else {
                16
            }
        }
    };
    if mentsu.is_open {
        base / 2
    } else {
        base
    }
}

/// Shanpon is scored through the kootsu it completes.
pub fn machi_fu(machi: Machi) -> u32 {
    match machi {
        Machi::Kanchan | Machi::Penchan | Machi::Tanki => 2,
        Machi::Ryanmen | Machi::Shanpon => 0,
    }
}

pub fn compute_fu(hand: &HandDescriptor) -> FuBreakdown {
    if hand.is_chiitoitsu() {
        return FuBreakdown::special(FuSpecial::Chiitoitsu, CHIITOITSU_FU);
    }
    let pinfu = hand.modifiers().pinfu;
    if pinfu && hand.method() == WinningMethod::Tsumo {
        return FuBreakdown::special(FuSpecial::PinfuTsumo, PINFU_TSUMO_FU);
    }

    let agari = match hand.method() {
        WinningMethod::Ron if hand.is_menzen() => 10,
        WinningMethod::Tsumo if !pinfu => 2,
        _ => 0,
    };
    let machi = machi_fu(hand.machi());
    let atama = match hand.atama() {
        a if a.is_double_yakuhai => {
            debug!("Double yakuhai atama scored at 4 fu");
            4
        }
        a if a.is_yakuhai => 2,
        _ => 0,
    };
    let mut mentsu = [0; 4];
    for (fu, m) in mentsu.iter_mut().zip(hand.mentsu()) {
        *fu = mentsu_fu(m);
    }

    let unrounded = FUUTEI + agari + machi + atama + mentsu.iter().sum::<u32>();
    let rounded = round_up_fu(unrounded);
    debug!(
        "fu: {} + agari {} + machi {} + atama {} + mentsu {:?} = {} -> {}",
        FUUTEI, agari, machi, atama, mentsu, unrounded, rounded
    );

    FuBreakdown {
        fuutei: FUUTEI,
        agari,
        machi,
        atama,
        mentsu,
        special: None,
        unrounded,
        rounded,
    }
}

impl fmt::Display for FuBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special {
            Some(FuSpecial::Chiitoitsu) => {
                return writeln!(f, "Chiitoitsu: {}符 (fixed)", self.rounded)
            }
            Some(FuSpecial::PinfuTsumo) => {
                return writeln!(f, "Pinfu tsumo: {}符 (fixed)", self.rounded)
            }
            None => {}
        }
        writeln!(f, "Fuutei: {}符", self.fuutei)?;
        if self.agari == 10 {
            writeln!(f, "Menzen ron: {}符", self.agari)?;
        } else if self.agari > 0 {
            writeln!(f, "Tsumo: {}符", self.agari)?;
        }
        if self.machi > 0 {
            writeln!(f, "Machi: {}符", self.machi)?;
        }
        if self.atama > 0 {
            writeln!(f, "Atama: {}符", self.atama)?;
        }
        for (i, fu) in self.mentsu.iter().enumerate() {
            if *fu > 0 {
                writeln!(f, "Mentsu {}: {}符", i + 1, fu)?;
            }
        }
        writeln!(f, "Total: {}符 -> {}符", self.unrounded, self.rounded)
    }
}

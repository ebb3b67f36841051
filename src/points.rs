use std::fmt;

use super::hand::{Seat, WinningMethod};

const KO_MANGAN: u32 = 8000;
const OYA_MANGAN: u32 = KO_MANGAN * 3 / 2;
const KO_HANEMAN: u32 = 12000;
const OYA_HANEMAN: u32 = KO_HANEMAN * 3 / 2;
const KO_BAIMAN: u32 = 16000;
const OYA_BAIMAN: u32 = KO_BAIMAN * 3 / 2;
const KO_SANBAIMAN: u32 = 24000;
const OYA_SANBAIMAN: u32 = KO_SANBAIMAN * 3 / 2;
const KO_YAKUMAN: u32 = 32000;
const OYA_YAKUMAN: u32 = KO_YAKUMAN * 3 / 2;

/// Basic points from which a hand is always at least mangan.
const MANGAN_BASE_POINTS: u64 = 2000;

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Limit {
    Mangan,
    Haneman,
    Baiman,
    Sanbaiman,
    Yakuman,
}

impl Limit {
    pub fn name(self) -> &'static str {
        match self {
            Limit::Mangan => "満貫",
            Limit::Haneman => "跳満",
            Limit::Baiman => "倍満",
            Limit::Sanbaiman => "三倍満",
            Limit::Yakuman => "役満",
        }
    }

    pub fn points(self, seat: Seat) -> u32 {
        match (self, seat) {
            (Limit::Mangan, Seat::Oya) => OYA_MANGAN,
            (Limit::Mangan, Seat::Ko) => KO_MANGAN,
            (Limit::Haneman, Seat::Oya) => OYA_HANEMAN,
            (Limit::Haneman, Seat::Ko) => KO_HANEMAN,
            (Limit::Baiman, Seat::Oya) => OYA_BAIMAN,
            (Limit::Baiman, Seat::Ko) => KO_BAIMAN,
            (Limit::Sanbaiman, Seat::Oya) => OYA_SANBAIMAN,
            (Limit::Sanbaiman, Seat::Ko) => KO_SANBAIMAN,
            (Limit::Yakuman, Seat::Oya) => OYA_YAKUMAN,
            (Limit::Yakuman, Seat::Ko) => KO_YAKUMAN,
        }
    }
}

/// A hand reaches `limit` once it has at least `han` han and `fu` fu.
#[derive(Debug, Copy, Clone)]
pub struct LimitRule {
    pub han: u32,
    pub fu: u32,
    pub limit: Limit,
}

/// Checked in order, first match wins.
pub const LIMIT_RULES: [LimitRule; 8] = [
    LimitRule {
        han: 13,
        fu: 0,
        limit: Limit::Yakuman,
    },
    LimitRule {
        han: 11,
        fu: 0,
        limit: Limit::Sanbaiman,
    },
    LimitRule {
        han: 8,
        fu: 0,
        limit: Limit::Baiman,
    },
    LimitRule {
        han: 6,
        fu: 0,
        limit: Limit::Haneman,
    },
    LimitRule {
        han: 5,
        fu: 0,
        limit: Limit::Mangan,
    },
    LimitRule {
        han: 4,
        fu: 40,
        limit: Limit::Mangan,
    },
    LimitRule {
        han: 3,
        fu: 70,
        limit: Limit::Mangan,
    },
    LimitRule {
        han: 2,
        fu: 120,
        limit: Limit::Mangan,
    },
];

pub fn find_limit(han: u32, fu: u32) -> Option<Limit> {
    LIMIT_RULES
        .iter()
        .find(|rule| han >= rule.han && fu >= rule.fu)
        .map(|rule| rule.limit)
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum TsumoPayment {
    /// Dealer won: every other player pays the same amount
    All(u32),
    Split { oya: u32, ko: u32 },
}

impl TsumoPayment {
    pub fn total(self) -> u32 {
        match self {
            TsumoPayment::All(each) => each * 3,
            TsumoPayment::Split { oya, ko } => oya + ko * 2,
        }
    }
}

impl fmt::Display for TsumoPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsumoPayment::All(each) => write!(f, "{} All", each),
            TsumoPayment::Split { oya, ko } => write!(f, "{} / {}", oya, ko),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum ScoreResult {
    Limit {
        limit: Limit,
        total: u32,
        tsumo: TsumoPayment,
    },
    Regular {
        base_points: u32,
        ron: u32,
        tsumo: TsumoPayment,
    },
}

impl ScoreResult {
    pub fn limit(&self) -> Option<Limit> {
        match self {
            ScoreResult::Limit { limit, .. } => Some(*limit),
            ScoreResult::Regular { .. } => None,
        }
    }

    pub fn ron(&self) -> u32 {
        match self {
            ScoreResult::Limit { total, .. } => *total,
            ScoreResult::Regular { ron, .. } => *ron,
        }
    }

    pub fn tsumo(&self) -> TsumoPayment {
        match self {
            ScoreResult::Limit { tsumo, .. } | ScoreResult::Regular { tsumo, .. } => *tsumo,
        }
    }

    /// Points received by the winner. Limit hands always show their nominal
    /// total.
    pub fn total(&self, method: WinningMethod) -> u32 {
        match (self, method) {
            (ScoreResult::Limit { total, .. }, _) => *total,
            (ScoreResult::Regular { ron, .. }, WinningMethod::Ron) => *ron,
            (ScoreResult::Regular { tsumo, .. }, WinningMethod::Tsumo) => tsumo.total(),
        }
    }
}

pub fn round_up_100(points: u64) -> u32 {
    let rounded = (points + 99) / 100 * 100;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn ceil_share(total: u32, parts: u32) -> u32 {
    let total = u64::from(total);
    let step = u64::from(parts) * 100;
    u32::try_from((total + step - 1) / step * 100).unwrap_or(u32::MAX)
}

fn limit_score(limit: Limit, seat: Seat) -> ScoreResult {
    let total = limit.points(seat);
    // Each share is rounded on its own, so the shares may not add up to `total`.
    let tsumo = match seat {
        Seat::Oya => TsumoPayment::All(ceil_share(total, 3)),
        Seat::Ko => TsumoPayment::Split {
            oya: ceil_share(total, 2),
            ko: ceil_share(total, 4),
        },
    };
    ScoreResult::Limit {
        limit,
        total,
        tsumo,
    }
}

pub fn compute_score(han: u32, fu: u32, seat: Seat) -> ScoreResult {
    if let Some(limit) = find_limit(han, fu) {
        return limit_score(limit, seat);
    }

    // Every han >= 5 was caught above, so the shift cannot overflow.
    let base_points = u64::from(fu) << (han + 2);
    if base_points >= MANGAN_BASE_POINTS {
        return limit_score(Limit::Mangan, seat);
    }

    let (ron, tsumo) = match seat {
        Seat::Oya => (
            round_up_100(base_points * 6),
            TsumoPayment::All(round_up_100(base_points * 2)),
        ),
        Seat::Ko => (
            round_up_100(base_points * 4),
            TsumoPayment::Split {
                oya: round_up_100(base_points * 2),
                ko: round_up_100(base_points),
            },
        ),
    };
    ScoreResult::Regular {
        base_points: base_points as u32,
        ron,
        tsumo,
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreResult::Limit {
                limit,
                total,
                tsumo,
            } => write!(f, "{} {}点 (ツモ {})", limit.name(), total, tsumo),
            ScoreResult::Regular { ron, tsumo, .. } => {
                write!(f, "ロン {}点 / ツモ {}", ron, tsumo)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FU: [u32; 11] = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    #[test]
    fn test_oya_ron_3han_30fu() {
        let score = compute_score(3, 30, Seat::Oya);
        assert_eq!(score.limit(), None);
        assert_eq!(score.ron(), 5800);
        assert_eq!(score.tsumo(), TsumoPayment::All(2000));
    }

    #[test]
    fn test_ko_tsumo_2han_40fu() {
        let score = compute_score(2, 40, Seat::Ko);
        assert_eq!(score.tsumo(), TsumoPayment::Split { oya: 1300, ko: 700 });
        assert_eq!(score.total(WinningMethod::Tsumo), 2700);
        assert_eq!(score.ron(), 2600);
    }

    #[test]
    fn test_yakuman_any_fu() {
        for fu in FU {
            assert_eq!(compute_score(13, fu, Seat::Ko).limit(), Some(Limit::Yakuman));
            assert_eq!(compute_score(13, fu, Seat::Ko).ron(), 32000);
            assert_eq!(compute_score(13, fu, Seat::Oya).ron(), 48000);
        }
        assert_eq!(compute_score(26, 30, Seat::Oya).limit(), Some(Limit::Yakuman));
    }

    #[test]
    fn test_limit_thresholds() {
        assert_eq!(find_limit(12, 30), Some(Limit::Sanbaiman));
        assert_eq!(find_limit(11, 30), Some(Limit::Sanbaiman));
        assert_eq!(find_limit(10, 30), Some(Limit::Baiman));
        assert_eq!(find_limit(8, 30), Some(Limit::Baiman));
        assert_eq!(find_limit(7, 30), Some(Limit::Haneman));
        assert_eq!(find_limit(6, 30), Some(Limit::Haneman));
        assert_eq!(find_limit(5, 20), Some(Limit::Mangan));
        assert_eq!(find_limit(4, 40), Some(Limit::Mangan));
        assert_eq!(find_limit(4, 30), None);
        assert_eq!(find_limit(3, 70), Some(Limit::Mangan));
        assert_eq!(find_limit(3, 60), None);
        assert_eq!(find_limit(2, 120), Some(Limit::Mangan));
        assert_eq!(find_limit(2, 110), None);
        assert_eq!(find_limit(1, 110), None);
    }

    #[test]
    fn test_oya_limits_are_one_and_a_half_ko() {
        for limit in [
            Limit::Mangan,
            Limit::Haneman,
            Limit::Baiman,
            Limit::Sanbaiman,
            Limit::Yakuman,
        ] {
            assert_eq!(limit.points(Seat::Oya) * 2, limit.points(Seat::Ko) * 3);
        }
        assert_eq!(Limit::Mangan.points(Seat::Ko), 8000);
        assert_eq!(Limit::Yakuman.points(Seat::Oya), 48000);
    }

    #[test]
    fn test_base_points_mangan() {
        // 4 han 40 fu: 2560 basic points, both rules agree
        assert_eq!(compute_score(4, 40, Seat::Ko).limit(), Some(Limit::Mangan));
        assert_eq!(compute_score(4, 40, Seat::Ko).ron(), 8000);
        // 4 han 30 fu: 1920, no kiriage
        let score = compute_score(4, 30, Seat::Ko);
        assert_eq!(score.limit(), None);
        assert_eq!(score.ron(), 7700);
        // 1 han 500 fu only reaches mangan through basic points
        assert_eq!(compute_score(1, 500, Seat::Ko).limit(), Some(Limit::Mangan));
    }

    #[test]
    fn test_limit_tsumo_shares() {
        assert_eq!(
            compute_score(5, 30, Seat::Oya).tsumo(),
            TsumoPayment::All(4000)
        );
        assert_eq!(
            compute_score(6, 30, Seat::Ko).tsumo(),
            TsumoPayment::Split { oya: 6000, ko: 3000 }
        );
        assert_eq!(
            compute_score(13, 30, Seat::Ko).tsumo(),
            TsumoPayment::Split {
                oya: 16000,
                ko: 8000
            }
        );
    }

    #[test]
    fn test_ceil_share_is_not_corrected() {
        assert_eq!(ceil_share(1000, 3), 400);
        assert_ne!(ceil_share(1000, 3) * 3, 1000);
        assert_eq!(ceil_share(12000, 3), 4000);
    }

    #[test]
    fn test_known_values() {
        // Compared with the usual printed score tables
        assert_eq!(compute_score(1, 30, Seat::Ko).ron(), 1000);
        assert_eq!(compute_score(1, 30, Seat::Oya).ron(), 1500);
        assert_eq!(compute_score(2, 25, Seat::Ko).ron(), 1600);
        assert_eq!(compute_score(3, 40, Seat::Oya).ron(), 7700);
        assert_eq!(compute_score(1, 110, Seat::Ko).ron(), 3600);
        assert_eq!(
            compute_score(2, 20, Seat::Ko).tsumo(),
            TsumoPayment::Split { oya: 700, ko: 400 }
        );
        assert_eq!(
            compute_score(1, 30, Seat::Ko).tsumo(),
            TsumoPayment::Split { oya: 500, ko: 300 }
        );
        assert_eq!(
            compute_score(3, 25, Seat::Oya).tsumo(),
            TsumoPayment::All(1600)
        );
    }

    #[test]
    fn test_pure_over_random_inputs() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            let han = rng.gen_range(1..=20);
            let fu = FU[rng.gen_range(0..FU.len())];
            let seat = if rng.gen() { Seat::Oya } else { Seat::Ko };
            let score = compute_score(han, fu, seat);
            assert_eq!(score, compute_score(han, fu, seat));
            assert!(score.ron() % 100 == 0);
            if score.limit().is_none() {
                assert!(score.ron() < Limit::Mangan.points(seat));
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            compute_score(2, 40, Seat::Ko).to_string(),
            "ロン 2600点 / ツモ 1300 / 700"
        );
        assert_eq!(
            compute_score(5, 30, Seat::Oya).to_string(),
            "満貫 12000点 (ツモ 4000 All)"
        );
    }
}

use std::fmt;

use log::info;

use super::fu::{compute_fu, FuBreakdown};
use super::hand::{HandDescriptor, WinningMethod};
use super::points::{compute_score, ScoreResult};
use super::table::ScoreTable;

/// Everything shown for one hand.
#[derive(Debug, Clone)]
pub struct Report {
    pub hand: HandDescriptor,
    pub ron_fu: FuBreakdown,
    pub tsumo_fu: FuBreakdown,
    pub ron: Option<ScoreResult>,
    pub tsumo: Option<ScoreResult>,
    /// Closed hands get menzen tsumo for one more han.
    pub menzen_tsumo: Option<ScoreResult>,
    pub table: ScoreTable,
}

impl Report {
    pub fn fu(&self, method: WinningMethod) -> &FuBreakdown {
        match method {
            WinningMethod::Ron => &self.ron_fu,
            WinningMethod::Tsumo => &self.tsumo_fu,
        }
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }

    /// Score for the way the hand was actually won.
    pub fn score(&self) -> Option<&ScoreResult> {
        match self.hand.method() {
            WinningMethod::Ron => self.ron.as_ref(),
            WinningMethod::Tsumo => self.tsumo.as_ref(),
        }
    }
}

pub fn evaluate(hand: &HandDescriptor, view: Option<WinningMethod>) -> Report {
    let ron_fu = compute_fu(&hand.with_method(WinningMethod::Ron));
    let tsumo_fu = compute_fu(&hand.with_method(WinningMethod::Tsumo));
    let han = hand.han();
    let seat = hand.seat();

    let (ron, tsumo, menzen_tsumo) = if han == 0 {
        (None, None, None)
    } else {
        let menzen_tsumo = if hand.is_menzen() {
            Some(compute_score(han + 1, tsumo_fu.rounded, seat))
        } else {
            None
        };
        (
            Some(compute_score(han, ron_fu.rounded, seat)),
            Some(compute_score(han, tsumo_fu.rounded, seat)),
            menzen_tsumo,
        )
    };

    let view = view.unwrap_or_else(|| hand.method());
    let mut table = ScoreTable::generate(seat, view);
    if han > 0 {
        let fu = match view {
            WinningMethod::Ron => ron_fu.rounded,
            WinningMethod::Tsumo => tsumo_fu.rounded,
        };
        table.highlight(han, fu);
    }

    let report = Report {
        hand: hand.clone(),
        ron_fu,
        tsumo_fu,
        ron,
        tsumo,
        menzen_tsumo,
        table,
    };
    if let Some(score) = report.score() {
        info!(
            "{}han {}fu {:?} {:?}: {}",
            han,
            report.fu(hand.method()).rounded,
            seat,
            hand.method(),
            score.total(hand.method())
        );
    }
    report
}

/// Report without the score table.
pub struct Summary<'a>(&'a Report);

impl<'a> fmt::Display for Summary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let han = report.hand.han();
        let fu = format!(
            "(ロン{}符 / ツモ{}符)",
            report.ron_fu.rounded, report.tsumo_fu.rounded
        );
        if han == 0 {
            writeln!(f, "-飜 {}", fu)?;
        } else {
            writeln!(f, "{}飜 {}", han, fu)?;
        }
        writeln!(f)?;
        write!(f, "{}", report.fu(report.hand.method()))?;
        writeln!(f)?;
        match (&report.ron, &report.tsumo) {
            (Some(ron), Some(tsumo)) => {
                writeln!(f, "ロン: {}", score_line(ron, WinningMethod::Ron))?;
                writeln!(f, "ツモ: {}", score_line(tsumo, WinningMethod::Tsumo))?;
            }
            _ => writeln!(f, "-")?,
        }
        if let Some(score) = &report.menzen_tsumo {
            writeln!(
                f,
                "門前ツモ {}飜: {}",
                han + 1,
                score_line(score, WinningMethod::Tsumo)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        write!(f, "{}", self.table)
    }
}

fn score_line(score: &ScoreResult, method: WinningMethod) -> String {
    let payments = match method {
        WinningMethod::Ron => format!("{}点", score.ron()),
        WinningMethod::Tsumo => format!("{} ({}点)", score.tsumo(), score.total(method)),
    };
    match score.limit() {
        Some(limit) => format!("{} {}", limit.name(), payments),
        None => payments,
    }
}

#[cfg(test)]
mod tests {
    use super::super::hand::{HandInput, Machi, Mentsu, MentsuKind, Seat};
    use super::super::points::{Limit, TsumoPayment};
    use super::*;

    #[test]
    fn test_kanchan_both_views() {
        let hand = HandInput {
            machi: Machi::Kanchan,
            ..Default::default()
        }
        .normalize();

        let report = evaluate(&hand, None);
        assert_eq!(report.ron_fu.rounded, 40);
        assert_eq!(report.tsumo_fu.rounded, 30);
        assert!(report.to_string().starts_with("1飜 (ロン40符 / ツモ30符)\n"));
        assert_eq!(report.table.view(), WinningMethod::Ron);
        assert_eq!(report.table.highlighted(), Some((0, 3)));

        let report = evaluate(&hand, Some(WinningMethod::Tsumo));
        assert_eq!(report.table.view(), WinningMethod::Tsumo);
        assert_eq!(report.table.highlighted(), Some((0, 2)));
    }

    #[test]
    fn test_scores() {
        let hand = HandInput {
            oya: true,
            han: 3,
            mentsu: vec![Mentsu::new(MentsuKind::Kootsu, true, false)],
            ..Default::default()
        }
        .normalize();
        let report = evaluate(&hand, None);
        // Open: 20 + 2 -> 30 either way
        assert_eq!(report.ron_fu.rounded, 30);
        assert_eq!(report.ron.map(|s| s.ron()), Some(5800));
        assert_eq!(report.tsumo.map(|s| s.tsumo()), Some(TsumoPayment::All(2000)));
        assert_eq!(report.menzen_tsumo, None);
        assert_eq!(report.score(), report.ron.as_ref());
    }

    #[test]
    fn test_menzen_tsumo_one_more_han() {
        let hand = HandInput {
            han: 4,
            pinfu: true,
            tsumo: true,
            ..Default::default()
        }
        .normalize();
        let report = evaluate(&hand, None);
        assert_eq!(report.tsumo_fu.rounded, 20);
        assert_eq!(report.ron_fu.rounded, 30);
        assert_eq!(
            report.menzen_tsumo.and_then(|s| s.limit()),
            Some(Limit::Mangan)
        );
        assert_eq!(report.score().and_then(|s| s.limit()), None);
        assert_eq!(report.table.highlighted(), Some((3, 0)));
        assert_eq!(hand.seat(), Seat::Ko);
    }

    #[test]
    fn test_no_han_yet() {
        let hand = HandInput {
            han: 0,
            ..Default::default()
        }
        .normalize();
        let report = evaluate(&hand, None);
        assert_eq!(report.ron, None);
        assert_eq!(report.tsumo, None);
        assert_eq!(report.menzen_tsumo, None);
        assert_eq!(report.table.highlighted(), None);
        let s = report.to_string();
        assert!(s.starts_with("-飜"));
        assert!(s.contains("\n-\n"));
    }

    #[test]
    fn test_chiitoitsu_report() {
        let hand = HandInput {
            han: 2,
            chiitoitsu: true,
            ..Default::default()
        }
        .normalize();
        let report = evaluate(&hand, None);
        assert_eq!(report.ron_fu.rounded, 25);
        assert_eq!(report.tsumo_fu.rounded, 25);
        assert_eq!(report.ron.map(|s| s.ron()), Some(1600));
        assert_eq!(report.table.highlighted(), Some((1, 1)));
    }
}

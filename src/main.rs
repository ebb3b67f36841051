use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

mod fu;
mod hand;
mod points;
mod report;
mod table;
mod tui;

use hand::{Atama, HandInput, Machi, Mentsu, WinningMethod};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load hand from a .ron file (other hand options are ignored)
    #[arg(long)]
    hand: Option<PathBuf>,

    /// Save the hand to a .ron file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Han of the hand, 0 or less for none yet
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    han: i64,
    /// Winner is the dealer
    #[arg(long)]
    oya: bool,
    /// Won by self draw instead of ron
    #[arg(long)]
    tsumo: bool,
    /// Seven pairs
    #[arg(long)]
    chiitoitsu: bool,
    #[arg(long)]
    pinfu: bool,
    #[arg(long)]
    tanyao: bool,
    #[arg(long, value_enum, default_value_t = Machi::Ryanmen)]
    machi: Machi,
    /// Pair is a value tile
    #[arg(long)]
    yakuhai_atama: bool,
    /// Pair is a value tile twice over (4 fu)
    #[arg(long)]
    double_yakuhai_atama: bool,
    /// Meld as `kind[,open][,yaochuu]`, up to 4 times. Missing melds are
    /// closed shuntsu.
    #[arg(long)]
    mentsu: Vec<Mentsu>,
    /// Hand contains an open chi
    #[arg(long)]
    open_chi: bool,

    /// Score table to show (defaults to the winning method)
    #[arg(long, value_enum)]
    view: Option<WinningMethod>,
    /// Show the result in a terminal dialog
    #[arg(long)]
    tui: bool,
}

impl Args {
    fn hand_input(&self) -> Result<HandInput> {
        if let Some(file) = &self.hand {
            let f = std::fs::File::open(file)
                .with_context(|| format!("Cannot open {}", file.display()))?;
            let input = ron::de::from_reader(f)
                .with_context(|| format!("Cannot read hand from {}", file.display()))?;
            return Ok(input);
        }

        let mut input = HandInput {
            oya: self.oya,
            han: self.han,
            tsumo: self.tsumo,
            chiitoitsu: self.chiitoitsu,
            pinfu: self.pinfu,
            tanyao: self.tanyao,
            machi: self.machi,
            atama: Atama {
                is_yakuhai: self.yakuhai_atama,
                is_double_yakuhai: self.double_yakuhai_atama,
            },
            menzen: if self.open_chi { Some(false) } else { None },
            ..Default::default()
        };
        if !self.mentsu.is_empty() {
            input.mentsu = self.mentsu.clone();
        }
        Ok(input)
    }
}

fn save(input: &HandInput, file: &Path) -> Result<()> {
    let s = ron::ser::to_string_pretty(input, Default::default())
        .context("Cannot serialize hand")?;
    std::fs::write(file, s).with_context(|| format!("Cannot write {}", file.display()))?;
    info!("Hand saved to {}", file.display());
    Ok(())
}

fn main() -> Result<()> {
    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder.target(env_logger::Target::Stderr).init();

    let args = Args::parse();

    let input = args.hand_input()?;
    debug!("Input: {:?}", input);
    let hand = input.normalize();
    debug!("Hand: {:?}", hand);

    if let Some(file) = &args.save {
        save(&input, file)?;
    }

    if args.tui {
        tui::show(&hand, args.view);
    } else {
        let report = report::evaluate(&hand, args.view);
        print!("{}", report);
    }

    Ok(())
}

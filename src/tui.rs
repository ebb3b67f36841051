use cursive::traits::{Nameable, Scrollable};
use cursive::views::{Dialog, LinearLayout, TextView};
use cursive::Cursive;
use cursive::CursiveExt;
use log::debug;

use super::hand::{HandDescriptor, WinningMethod};
use super::report::evaluate;

/// Show the report of `hand` in a dialog. The table can be switched between
/// its ron and tsumo views. Press `q` to quit.
pub fn show(hand: &HandDescriptor, view: Option<WinningMethod>) {
    let report = evaluate(hand, view);
    let ron_table = evaluate(hand, Some(WinningMethod::Ron)).table.to_string();
    let tsumo_table = evaluate(hand, Some(WinningMethod::Tsumo)).table.to_string();

    let mut siv = Cursive::default();
    siv.add_global_callback('q', |s| s.quit());
    siv.set_user_data(report.table.view());

    let layout = LinearLayout::vertical()
        .child(TextView::new(report.summary().to_string()))
        .child(TextView::new(report.table.to_string()).with_name("table"));

    let dialog = Dialog::around(layout.scrollable())
        .title("点数")
        .button("ロン/ツモ", move |s| {
            let view = s
                .with_user_data(|view: &mut WinningMethod| {
                    *view = view.flip();
                    *view
                })
                .unwrap_or(WinningMethod::Ron);
            debug!("Switch table to {:?}", view);
            let content = match view {
                WinningMethod::Ron => ron_table.clone(),
                WinningMethod::Tsumo => tsumo_table.clone(),
            };
            s.call_on_name("table", |table: &mut TextView| table.set_content(content));
        })
        .button("Quit", |s| s.quit());
    siv.add_layer(dialog);

    siv.run();
}

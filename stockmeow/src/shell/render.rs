use crate::{AppWindow, AxisTick};
use slint::{ModelRc, SharedString, VecModel};
use stockmeow::app::state::{AppState, SELL_CONFIRMATION};
use stockmeow::chart::{self, build_chart_view};

pub fn render(state: &AppState, ui: &AppWindow) {
    ui.set_symbol(SharedString::from(state.symbol.as_str()));
    ui.set_price_text(SharedString::from(state.price_label.as_str()));
    ui.set_sell_enabled(state.sell_enabled);
    ui.set_status_text(SharedString::from(state.status_line()));
    ui.set_status_kind(state.status.kind() as i32);
    ui.set_current_time(SharedString::from(state.current_time.as_str()));

    ui.set_sell_dialog_open(state.sell_dialog_open);
    ui.set_sell_dialog_message(SharedString::from(SELL_CONFIRMATION));

    let view = build_chart_view(&state.series.snapshot());
    ui.set_chart_empty(view.is_empty());
    ui.set_chart_commands(SharedString::from(view.commands.as_str()));
    ui.set_price_ticks(axis_model(&view.price_ticks));
    ui.set_time_ticks(axis_model(&view.time_ticks));
}

fn axis_model(ticks: &[chart::AxisTick]) -> ModelRc<AxisTick> {
    let rows: Vec<AxisTick> = ticks
        .iter()
        .map(|t| AxisTick {
            pos: t.pos,
            label: SharedString::from(t.label.as_str()),
        })
        .collect();
    ModelRc::new(VecModel::from(rows))
}

use crate::AppWindow;
use std::sync::mpsc::Sender;
use stockmeow::app::{AppEvent, UiEvent};

pub fn wire_ui(ui: &AppWindow, tx: Sender<AppEvent>) {
    {
        let tx = tx.clone();
        ui.on_sell_clicked(move || {
            let _ = tx.send(AppEvent::Ui(UiEvent::SellClicked));
        });
    }
    {
        let tx = tx.clone();
        ui.on_sell_dialog_dismissed(move || {
            let _ = tx.send(AppEvent::Ui(UiEvent::SellDialogDismissed));
        });
    }
}

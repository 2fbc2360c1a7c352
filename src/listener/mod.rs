mod event_printer;
mod event_writer;

pub use self::{event_printer::EventPrinter, event_writer::EventWriter};

use std::fmt;

use crate::model::*;

// エンジンからのイベント通知を受け取るオブジェクト
pub trait Listener: Send {
    fn notify_event(&mut self, _ledger: &GameLedger, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}

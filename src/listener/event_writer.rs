use serde_json::{json, Value};

use super::*;
use crate::util::misc::{unixtime_now, write_to_file};

// 局単位のイベント列をjsonファイルに書き出すListener
// data/{開始時刻}/{局の通し番号}.json に保存する
#[derive(Debug)]
pub struct EventWriter {
    start_time: u64,
    hand_index: usize,
    record: Vec<Value>,
}

impl EventWriter {
    pub fn new() -> Self {
        Self {
            start_time: unixtime_now(),
            hand_index: 0,
            record: vec![],
        }
    }

    fn flush(&mut self) {
        let path = format!("data/{}/{:02}.json", self.start_time, self.hand_index);
        let data = Value::Array(std::mem::take(&mut self.record));
        if let Err(e) = write_to_file(&path, &data.to_string()) {
            crate::error!("{}", e);
        }
        self.hand_index += 1;
    }
}

impl Default for EventWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _ledger: &GameLedger, event: &Event) {
        self.record.push(json!(event));
        match event {
            Event::Win(_) | Event::Draw(_) | Event::End(_) => self.flush(),
            Event::Begin(_) | Event::Riichi(_) => {}
        }
    }
}

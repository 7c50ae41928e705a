//! Latest-block widget shown in the navigation header

use crossterm::event::KeyEvent;

use crate::core::{Action, Fetch, FetchState, Module, RequestId};
use crate::infrastructure::RuntimeCommand;

#[derive(Default)]
pub struct LatestBlockWidget {
    number: Fetch<u64>,
}

impl LatestBlockWidget {
    pub fn state(&self) -> &FetchState<u64> {
        self.number.state()
    }

    pub fn label(&self) -> String {
        match self.number.state() {
            FetchState::Idle | FetchState::Loading => "Loading...".to_string(),
            FetchState::Loaded(number) => format!("#{number}"),
            FetchState::Errored(_) => "Unavailable".to_string(),
        }
    }

    pub fn apply(&mut self, id: RequestId, result: Result<u64, String>) -> Action {
        self.number.finish(id, result);
        Action::None
    }
}

impl Module for LatestBlockWidget {
    fn mount(&mut self) -> Action {
        let id = self.number.start();
        Action::Dispatch(RuntimeCommand::LoadBlockNumber { id })
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }
}

//! Discrete control signals shared by gesture and keyboard input

use serde::{Deserialize, Serialize};

/// One discrete control signal. Only ever passed by value, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Jump,
    Duck,
    Left,
    Right,
    #[default]
    None,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Jump => "JUMP",
            Action::Duck => "DUCK",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::None => "NONE",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

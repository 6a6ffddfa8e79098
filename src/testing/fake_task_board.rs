use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{BoardMember, Card, TaskBoard};

pub fn member(username: &str) -> BoardMember {
    BoardMember { id: format!("id-{}", username), username: username.to_string(), full_name: None }
}

pub struct FakeTaskBoard {
    pub members: Vec<BoardMember>,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTaskBoard {
    pub fn with_members(members: Vec<BoardMember>) -> Self {
        Self { members, fail: false, calls: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { members: Vec::new(), fail: true, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TaskBoard for FakeTaskBoard {
    fn get_card(&self, card_id: &str) -> Result<Card, AppError> {
        self.calls.lock().unwrap().push(format!("get_card:{}", card_id));
        if self.fail {
            return Err(AppError::Http {
                service: "Trello",
                details: "GET cards/card1 returned 404: not found".into(),
            });
        }
        Ok(Card { id: card_id.to_string(), name: "On call".to_string() })
    }

    fn get_card_members(&self, card: &Card) -> Result<Vec<BoardMember>, AppError> {
        self.calls.lock().unwrap().push(format!("get_card_members:{}", card.id));
        Ok(self.members.clone())
    }
}

//! Task board (Trello) port definition.

use crate::domain::AppError;

/// A card on the task board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub name: String,
}

/// A member assigned to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMember {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
}

/// Port for task board operations.
pub trait TaskBoard {
    /// Fetch a card by identifier.
    fn get_card(&self, card_id: &str) -> Result<Card, AppError>;

    /// Members assigned to the card, in the order the service returns them.
    fn get_card_members(&self, card: &Card) -> Result<Vec<BoardMember>, AppError>;
}

use crate::ports::{AlertingService, TaskBoard};

/// Application context holding the two remote services a sync talks to.
pub struct AppContext<B: TaskBoard, A: AlertingService> {
    board: B,
    alerting: A,
}

impl<B: TaskBoard, A: AlertingService> AppContext<B, A> {
    /// Create a new application context.
    pub fn new(board: B, alerting: A) -> Self {
        Self { board, alerting }
    }

    /// Get a reference to the task board client.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Get a reference to the alerting service client.
    pub fn alerting(&self) -> &A {
        &self.alerting
    }
}

mod client;
mod ticket;

pub use client::{JiraClient, TicketSource};
pub use ticket::TicketSummary;

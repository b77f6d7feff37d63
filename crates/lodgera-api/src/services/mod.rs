pub mod mailer;
pub mod receipts;

pub use mailer::Mailer;
pub use receipts::ReceiptStore;

pub mod notification_reader;
pub mod payment_writer;

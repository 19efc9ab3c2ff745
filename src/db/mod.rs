pub mod connection;
pub mod mysql_adapter;
pub mod port;

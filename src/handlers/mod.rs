pub mod championship_handler;

pub mod message_loop;

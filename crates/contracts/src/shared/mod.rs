pub mod week_key;

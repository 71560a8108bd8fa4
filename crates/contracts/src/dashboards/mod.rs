pub mod d400_weekly_operations;

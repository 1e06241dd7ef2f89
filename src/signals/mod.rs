pub mod pullback;

pub mod animation;
pub mod fsm;
pub mod sync;

mod action;
mod action_record;
mod betting;
mod config;
mod hand_result;
mod phase;
mod position;
mod pot;
mod seat;
mod showdown;
mod sidepot;
mod view;

pub use action::Action;
pub use action::Decision;
pub use action_record::MultiActionRecord;
pub use hand_result::HandResult;
pub use betting::call_amount;
pub use betting::first_to_act;
pub use betting::is_hand_over_early;
pub use betting::max_raise_amount;
pub use betting::min_raise_amount;
pub use betting::process_action;
pub use betting::round_complete;
pub use betting::should_skip_to_showdown;
pub use betting::street_reset;
pub use betting::valid_actions;
pub use betting::BettingState;
pub use config::TableConfig;
pub use phase::ArenaGamePhase;
pub use position::assign_positions;
pub use position::Position;
pub use pot::SidePot;
pub use seat::Seat;
pub use seat::SeatStatus;
pub use showdown::resolve_fold_win;
pub use showdown::resolve_showdown;
pub use showdown::WinnerShare;
pub use sidepot::compute_side_pots;
pub use view::PlayerView;
pub use view::PublicSeat;

mod bus;
mod event;

pub use bus::DashboardBus;
pub use event::DashboardEvent;
pub use event::InitialState;
pub use event::StatsSnapshot;
pub use event::WinRateEntry;

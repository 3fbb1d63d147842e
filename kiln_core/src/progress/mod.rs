//! Build progress reporting.
//!
//! Raw progress ticks from the build tool flow through
//! [`PercentageSmoother`] into either the shared [`ProgressBus`] (redrawn in
//! place on a terminal) or the [`NonTtyLogger`] (one plain line per tick),
//! depending on the plugin's [`RenderTarget`].

pub use bus::*;
pub use driver::*;
pub use non_tty::*;
pub use percentage::*;
pub use plugin::*;
pub use state::*;
pub use target::*;

mod bus;
mod driver;
mod non_tty;
mod percentage;
mod plugin;
mod state;
mod target;

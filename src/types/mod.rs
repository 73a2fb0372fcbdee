pub mod analysis;
pub mod bar;
pub mod forecast;
pub mod timeframe;

pub use analysis::*;
pub use bar::*;
pub use forecast::*;
pub use timeframe::*;

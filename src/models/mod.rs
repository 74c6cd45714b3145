pub mod layout;
pub mod seat;
pub mod section;

pub use layout::{Aisle, LayoutSummary, LayoutType, PriceCategory, SeatingLayout, Stage, ViewBox};
pub use seat::{Seat, SeatStatus, SeatType};
pub use section::{PricingTier, RowCurve, SeatRow, Section, SectionType};

mod period;
mod price_bar;
mod stock;

pub use period::Period;
pub use price_bar::PriceBar;
pub use stock::{Stock, StockListItem, StockSearchResult};

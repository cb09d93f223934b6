mod color;
mod style;
mod theme;

pub use color::{Color, Rgb};
pub use style::{Style, TextStyle};
pub use theme::TreeTheme;
